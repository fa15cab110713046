//! secp256k1 primitives behind a common verification seam.
//!
//! Each scheme gets its own [`Curve`] impl so the verifiers above stay
//! byte-oriented: fixed-width signatures and keys in, recovered or confirmed
//! public key out. Failures collapse to `None`; callers decide whether that
//! means `valid: false` or an error.

use k256::{
    ecdsa,
    ecdsa::signature::hazmat::PrehashVerifier,
    schnorr,
};

pub trait Curve {
    type PublicKey;
    type Signature;

    /// Message that can be signed by this curve
    type Message: AsRef<[u8]> + ?Sized;

    /// Public key that should be known prior to verification
    type VerifyingKey;

    fn verify(
        signature: &Self::Signature,
        message: &Self::Message,
        verifying_key: &Self::VerifyingKey,
    ) -> Option<Self::PublicKey>;
}

/// ECDSA with public-key recovery, as used by legacy signed messages.
pub struct Secp256k1;

impl Curve for Secp256k1 {
    /// SEC1 compressed.
    type PublicKey = [u8; 33];

    /// Concatenated `r`, `s` and `v` (recovery byte, 0..=3).
    type Signature = [u8; 65];

    // Output of a cryptographic hash function
    type Message = [u8; 32];

    /// ECDSA signatures are recoverable, so you don't need a verifying key
    type VerifyingKey = ();

    fn verify(
        [signature @ .., v]: &Self::Signature,
        hash: &Self::Message,
        (): &(),
    ) -> Option<Self::PublicKey> {
        let mut signature = ecdsa::Signature::from_slice(signature).ok()?;
        let mut recovery_id = ecdsa::RecoveryId::from_byte(*v)?;

        // Recovery is defined over low-S signatures. Normalizing S mirrors
        // the point R, which flips the recovery id's parity bit.
        if let Some(normalized) = signature.normalize_s() {
            signature = normalized;
            recovery_id = ecdsa::RecoveryId::from_byte(recovery_id.to_byte() ^ 1)?;
        }

        let key = ecdsa::VerifyingKey::recover_from_prehash(hash, &signature, recovery_id).ok()?;
        // Do not accept malleable recovery: the signature must hold against
        // the key it claims to recover.
        key.verify_prehash(hash, &signature).ok()?;

        key.to_sec1_bytes().as_ref().try_into().ok()
    }
}

/// ECDSA against a known compressed key, as used by witness-v0 spends.
pub struct Secp256k1Prehashed;

impl Curve for Secp256k1Prehashed {
    type PublicKey = [u8; 33];

    /// Fixed-width `r ‖ s`.
    type Signature = [u8; 64];

    type Message = [u8; 32];

    /// SEC1 compressed.
    type VerifyingKey = [u8; 33];

    fn verify(
        signature: &Self::Signature,
        hash: &Self::Message,
        verifying_key: &Self::VerifyingKey,
    ) -> Option<Self::PublicKey> {
        let signature = ecdsa::Signature::from_slice(signature).ok()?;
        // Accept high-S signatures; wallets predating the low-S policy
        // still produce them.
        let signature = signature.normalize_s().unwrap_or(signature);

        let key = ecdsa::VerifyingKey::from_sec1_bytes(verifying_key).ok()?;
        key.verify_prehash(hash, &signature).ok()?;

        Some(*verifying_key)
    }
}

/// BIP-340 Schnorr against an x-only key, as used by Taproot key-path spends.
pub struct Schnorr;

impl Curve for Schnorr {
    /// X-only.
    type PublicKey = [u8; 32];

    type Signature = [u8; 64];

    type Message = [u8; 32];

    /// X-only; for Taproot this is the tweaked output key.
    type VerifyingKey = [u8; 32];

    fn verify(
        signature: &Self::Signature,
        hash: &Self::Message,
        verifying_key: &Self::VerifyingKey,
    ) -> Option<Self::PublicKey> {
        let signature = schnorr::Signature::try_from(signature.as_slice()).ok()?;
        let key = schnorr::VerifyingKey::from_bytes(verifying_key).ok()?;

        key.verify_raw(hash, &signature).ok()?;
        Some(*verifying_key)
    }
}

/// Decompress a SEC1 compressed key to its 65-byte uncompressed form.
pub fn decompress_pubkey(pubkey: &[u8; 33]) -> Option<[u8; 65]> {
    let key = ecdsa::VerifyingKey::from_sec1_bytes(pubkey).ok()?;
    key.to_encoded_point(false).as_bytes().try_into().ok()
}
