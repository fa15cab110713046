//! Sighash computation for the virtual `to_sign` spend.
//!
//! Both paths hash the same conceptual transaction: one input spending
//! `to_spend:0` with sequence 0 and a zero-value witness utxo, one zero-value
//! `OP_RETURN` output, version 0, lock time 0. Witness v0 inputs use the
//! BIP143 preimage with double SHA-256 component hashes; Taproot key-path
//! inputs use the BIP341 sigMsg with single SHA-256 component hashes and a
//! `TapSighash` tagged digest over the whole message.

use digest::Digest;
use keyport_bip340::TaggedDigest;
use sha2::Sha256;

use crate::{
    encode::{OP_RETURN, push_varint},
    error::VerifyError,
    message::double_sha256,
};

pub const SIGHASH_ALL: u8 = 0x01;

/// Tag for the BIP341 signature-message digest.
const TAP_SIGHASH_TAG: &[u8] = b"TapSighash";

/// The single unspendable output of `to_sign`.
const OP_RETURN_SCRIPT: [u8; 1] = [OP_RETURN];

const ZERO_AMOUNT: [u8; 8] = [0u8; 8];
const ZERO_U32: [u8; 4] = [0u8; 4];

/// The serialized `to_sign` outputs, shared by both preimages.
fn outputs_preimage() -> Result<Vec<u8>, VerifyError> {
    let mut buf = Vec::with_capacity(10);
    buf.extend_from_slice(&ZERO_AMOUNT);
    push_varint(&mut buf, OP_RETURN_SCRIPT.len() as u64)?;
    buf.extend_from_slice(&OP_RETURN_SCRIPT);
    Ok(buf)
}

/// The `to_spend:0` outpoint in wire byte order.
///
/// `to_spend_txid` arrives in display order, so it is reversed back before
/// serialization.
fn outpoint(to_spend_txid: &[u8; 32]) -> [u8; 36] {
    let mut out = [0u8; 36];
    out[..32].copy_from_slice(to_spend_txid);
    out[..32].reverse();
    // vout 0 is already zeroed
    out
}

/// BIP143 witness-v0 sighash for the `to_sign` input, `SIGHASH_ALL`.
///
/// `script_code` is the P2PKH template for the signing key's hash, per the
/// BIP143 rules for key-hash inputs.
pub fn segwit_v0_sighash(
    to_spend_txid: &[u8; 32],
    script_code: &[u8],
) -> Result<[u8; 32], VerifyError> {
    let outpoint = outpoint(to_spend_txid);

    let hash_prevouts = double_sha256(&outpoint);
    let hash_sequence = double_sha256(&ZERO_U32);
    let hash_outputs = double_sha256(&outputs_preimage()?);

    let mut preimage = Vec::with_capacity(160 + script_code.len());
    preimage.extend_from_slice(&ZERO_U32); // nVersion
    preimage.extend_from_slice(&hash_prevouts);
    preimage.extend_from_slice(&hash_sequence);
    preimage.extend_from_slice(&outpoint);
    push_varint(&mut preimage, script_code.len() as u64)?;
    preimage.extend_from_slice(script_code);
    preimage.extend_from_slice(&ZERO_AMOUNT); // input amount
    preimage.extend_from_slice(&ZERO_U32); // nSequence
    preimage.extend_from_slice(&hash_outputs);
    preimage.extend_from_slice(&ZERO_U32); // nLockTime
    preimage.extend_from_slice(&u32::from(SIGHASH_ALL).to_le_bytes());

    Ok(double_sha256(&preimage))
}

/// BIP341 key-path sighash for the `to_sign` input: `SIGHASH_DEFAULT`, no
/// annex, no script path.
pub fn taproot_key_spend_sighash(
    to_spend_txid: &[u8; 32],
    script_pubkey: &[u8],
) -> Result<[u8; 32], VerifyError> {
    let outpoint = outpoint(to_spend_txid);

    let hash_prevouts: [u8; 32] = Sha256::digest(outpoint).into();
    let hash_amounts: [u8; 32] = Sha256::digest(ZERO_AMOUNT).into();
    let hash_sequences: [u8; 32] = Sha256::digest(ZERO_U32).into();
    let hash_outputs: [u8; 32] = Sha256::digest(outputs_preimage()?).into();

    let mut spks = Vec::with_capacity(script_pubkey.len() + 1);
    push_varint(&mut spks, script_pubkey.len() as u64)?;
    spks.extend_from_slice(script_pubkey);
    let hash_script_pubkeys: [u8; 32] = Sha256::digest(&spks).into();

    let mut sig_msg = Vec::with_capacity(180);
    sig_msg.push(0x00); // epoch
    sig_msg.push(0x00); // hash type (SIGHASH_DEFAULT)
    sig_msg.extend_from_slice(&ZERO_U32); // nVersion
    sig_msg.extend_from_slice(&ZERO_U32); // nLockTime
    sig_msg.extend_from_slice(&hash_prevouts);
    sig_msg.extend_from_slice(&hash_amounts);
    sig_msg.extend_from_slice(&hash_script_pubkeys);
    sig_msg.extend_from_slice(&hash_sequences);
    sig_msg.extend_from_slice(&hash_outputs);
    sig_msg.push(0x00); // spend type: key path, no annex
    sig_msg.extend_from_slice(&ZERO_U32); // input index

    Ok(Sha256::tagged(TAP_SIGHASH_TAG)
        .chain_update(&sig_msg)
        .finalize()
        .into())
}
