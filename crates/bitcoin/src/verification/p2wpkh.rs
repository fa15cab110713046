//! Witness-v0 key-hash verification: BIP143 sighash, ECDSA.

use crate::{
    address::{hash160, p2pkh_script},
    curve::{Curve, Secp256k1Prehashed},
    der::parse_der_signature,
    sighash::{SIGHASH_ALL, segwit_v0_sighash},
    transaction::create_to_spend,
    witness::WitnessStack,
};

/// Verify a witness `[der_signature ++ hashtype, compressed_pubkey]` for
/// `message` against the 20-byte program of the claimed address.
pub fn verify_witness(witness: &[u8], message: &str, program: &[u8; 20]) -> Option<[u8; 33]> {
    let stack = WitnessStack::parse(witness)?;
    if stack.len() != 2 {
        return None;
    }

    let pubkey: [u8; 33] = stack.nth(1)?.try_into().ok()?;
    let pubkey_hash = hash160(&pubkey);
    // The key must hash to the claimed address's program.
    if pubkey_hash != *program {
        return None;
    }

    let [der @ .., hashtype] = stack.nth(0)? else {
        return None;
    };
    if *hashtype != SIGHASH_ALL {
        return None;
    }
    let (r, s) = parse_der_signature(der)?;
    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&r);
    compact[32..].copy_from_slice(&s);

    let mut script_pubkey = Vec::with_capacity(22);
    script_pubkey.push(0x00);
    script_pubkey.push(20);
    script_pubkey.extend_from_slice(&pubkey_hash);

    let to_spend_txid = create_to_spend(message, &script_pubkey).txid().ok()?;
    let sighash = segwit_v0_sighash(&to_spend_txid, &p2pkh_script(&pubkey_hash)).ok()?;

    Secp256k1Prehashed::verify(&compact, &sighash, &pubkey)
}
