//! Taproot key-path verification: BIP341 sighash, Schnorr.
//!
//! The bech32m payload of a `bc1p` address is the tweaked output key
//! itself, so verification checks the Schnorr signature against that key
//! directly; no tweak is recomputed here.

use crate::{
    curve::{Curve, Schnorr},
    encode::OP_PUSHNUM_1,
    sighash::taproot_key_spend_sighash,
    transaction::create_to_spend,
    witness::WitnessStack,
};

/// Verify a single-item witness holding a 64-byte Schnorr signature for
/// `message` against the claimed address's output key.
///
/// Only key-path spends with the default sighash and no annex are
/// supported; any other witness shape fails.
pub fn verify_witness(witness: &[u8], message: &str, output_key: &[u8; 32]) -> Option<[u8; 32]> {
    let stack = WitnessStack::parse(witness)?;
    if stack.len() != 1 {
        return None;
    }
    let signature: [u8; 64] = stack.nth(0)?.try_into().ok()?;

    let mut script_pubkey = Vec::with_capacity(34);
    script_pubkey.push(OP_PUSHNUM_1);
    script_pubkey.push(32);
    script_pubkey.extend_from_slice(output_key);

    let to_spend_txid = create_to_spend(message, &script_pubkey).txid().ok()?;
    let sighash = taproot_key_spend_sighash(&to_spend_txid, &script_pubkey).ok()?;

    Schnorr::verify(&signature, &sighash, output_key)
}

#[cfg(test)]
mod tests {
    use k256::schnorr::SigningKey;

    use super::*;

    fn sign(key: &SigningKey, message: &str) -> (Vec<u8>, [u8; 32]) {
        let output_key: [u8; 32] = key.verifying_key().to_bytes().into();

        let mut script_pubkey = vec![OP_PUSHNUM_1, 32];
        script_pubkey.extend_from_slice(&output_key);
        let txid = create_to_spend(message, &script_pubkey).txid().unwrap();
        let sighash = taproot_key_spend_sighash(&txid, &script_pubkey).unwrap();

        let signature = key.sign_raw(&sighash, &[0u8; 32]).unwrap();
        let mut witness = Vec::with_capacity(66);
        witness.push(0x01); // item count
        witness.push(64);
        witness.extend_from_slice(&signature.to_bytes());

        (witness, output_key)
    }

    #[test]
    fn verifies_key_path_signature() {
        let key = SigningKey::from_bytes(&[0x23; 32]).unwrap();
        let (witness, output_key) = sign(&key, "ownership challenge");

        assert_eq!(
            verify_witness(&witness, "ownership challenge", &output_key),
            Some(output_key)
        );
    }

    #[test]
    fn rejects_wrong_message() {
        let key = SigningKey::from_bytes(&[0x23; 32]).unwrap();
        let (witness, output_key) = sign(&key, "ownership challenge");

        assert_eq!(verify_witness(&witness, "other challenge", &output_key), None);
    }

    #[test]
    fn rejects_wrong_key() {
        let key = SigningKey::from_bytes(&[0x23; 32]).unwrap();
        let (witness, _) = sign(&key, "msg");
        let other = SigningKey::from_bytes(&[0x24; 32]).unwrap();
        let other_key: [u8; 32] = other.verifying_key().to_bytes().into();

        assert_eq!(verify_witness(&witness, "msg", &other_key), None);
    }

    #[test]
    fn rejects_non_default_sighash_suffix() {
        let key = SigningKey::from_bytes(&[0x23; 32]).unwrap();
        let (mut witness, output_key) = sign(&key, "msg");
        // 65-byte item carrying an explicit hashtype byte
        witness[1] = 65;
        witness.push(0x01);

        assert_eq!(verify_witness(&witness, "msg", &output_key), None);
    }

    #[test]
    fn rejects_multi_item_stack() {
        let key = SigningKey::from_bytes(&[0x23; 32]).unwrap();
        let (mut witness, output_key) = sign(&key, "msg");
        witness[0] = 2;
        witness.push(0x00); // second, empty item

        assert_eq!(verify_witness(&witness, "msg", &output_key), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(verify_witness(b"garbage", "msg", &[0x11; 32]), None);
    }
}
