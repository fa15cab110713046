//! Legacy header-byte signed messages (BIP-137).
//!
//! A signature is exactly 65 bytes: a header encoding the recovery id and
//! the signer's script type, then `r ‖ s`. The public key is recovered from
//! the signature itself, so no address is supplied; the claimed address is
//! an output of verification.

use crate::{
    VerificationResult,
    address::{p2pkh_address, p2sh_p2wpkh_address, p2wpkh_address},
    curve::{Curve, Secp256k1, decompress_pubkey},
    error::VerifyError,
    message::signed_message_hash,
};

pub const SIGNATURE_LEN: usize = 65;

const HEADER_MIN: u8 = 27;
const HEADER_MAX: u8 = 42;

/// Script type the header byte claims the signer used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerScript {
    P2pkhUncompressed,
    P2pkhCompressed,
    P2shP2wpkh,
    P2wpkh,
}

/// Recovery id and script type decoded from a header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryInfo {
    pub recovery_id: u8,
    pub script: SignerScript,
}

/// Decode a header byte. Each script type spans four consecutive header
/// values, one per recovery id.
pub fn recovery_info(header: u8) -> Result<RecoveryInfo, VerifyError> {
    let script = match header {
        27..=30 => SignerScript::P2pkhUncompressed,
        31..=34 => SignerScript::P2pkhCompressed,
        35..=38 => SignerScript::P2shP2wpkh,
        39..=42 => SignerScript::P2wpkh,
        _ => return Err(VerifyError::InvalidHeader(header)),
    };
    let base = match script {
        SignerScript::P2pkhUncompressed => 27,
        SignerScript::P2pkhCompressed => 31,
        SignerScript::P2shP2wpkh => 35,
        SignerScript::P2wpkh => 39,
    };
    Ok(RecoveryInfo {
        recovery_id: header - base,
        script,
    })
}

/// Whether `signature` has the 65-byte header-prefixed shape.
pub fn matches_signature_shape(signature: &[u8]) -> bool {
    signature.len() == SIGNATURE_LEN
        && (HEADER_MIN..=HEADER_MAX).contains(&signature[0])
}

/// Verify a 65-byte legacy signature and derive the signer's address.
///
/// Malformed input (wrong length, out-of-range header) is an error; a
/// well-formed signature that fails recovery or re-verification yields
/// `valid: false`.
pub fn verify_bip137(signature: &[u8], message: &str) -> Result<VerificationResult, VerifyError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(VerifyError::InvalidLength(signature.len()));
    }
    let info = recovery_info(signature[0])?;

    let hash = signed_message_hash(message)?;

    // Reorder header ‖ r ‖ s into r ‖ s ‖ recovery_id.
    let mut recoverable = [0u8; SIGNATURE_LEN];
    recoverable[..64].copy_from_slice(&signature[1..]);
    recoverable[64] = info.recovery_id;

    let Some(pubkey) = Secp256k1::verify(&recoverable, &hash, &()) else {
        return Ok(VerificationResult::invalid(String::new()));
    };

    let Some(address) = derive_address(info.script, &pubkey) else {
        return Ok(VerificationResult::invalid(String::new()));
    };

    Ok(VerificationResult {
        valid: true,
        address,
        public_key: hex::encode(pubkey),
    })
}

fn derive_address(script: SignerScript, pubkey: &[u8; 33]) -> Option<String> {
    Some(match script {
        SignerScript::P2pkhUncompressed => p2pkh_address(&decompress_pubkey(pubkey)?),
        SignerScript::P2pkhCompressed => p2pkh_address(pubkey),
        SignerScript::P2shP2wpkh => p2sh_p2wpkh_address(pubkey),
        SignerScript::P2wpkh => p2wpkh_address(pubkey),
    })
}
