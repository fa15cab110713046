//! The BIP-322 `to_spend` virtual transaction.
//!
//! BIP-322 binds a message and a destination script together by building a
//! deterministic, never-broadcast transaction and using its txid as the
//! anchor every sighash derives from. The structure is fixed:
//!
//! - version 0, lock time 0
//! - one input spending `0000...0000:0xFFFFFFFF` with
//!   `scriptSig = OP_0 PUSH32(tagged_message_hash)` and sequence 0
//! - one zero-value output paying the claimed script

use crate::{
    encode::{OP_0, push_varint},
    error::VerifyError,
    message::{bip322_message_hash, double_sha256},
};

/// The coinbase-style outpoint index marking a virtual input.
const VIRTUAL_VOUT: u32 = 0xFFFF_FFFF;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    /// Previous txid in wire byte order.
    pub prev_txid: [u8; 32],
    pub prev_vout: u32,
    pub script_sig: Vec<u8>,
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    pub value: u64,
    pub script_pubkey: Vec<u8>,
}

/// A legacy (non-segwit) transaction, which is all BIP-322 serializes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: u32,
    pub lock_time: u32,
    pub input: Vec<TxIn>,
    pub output: Vec<TxOut>,
}

impl Transaction {
    /// Legacy consensus serialization (no witness marker).
    pub fn consensus_encode(&self, buf: &mut Vec<u8>) -> Result<(), VerifyError> {
        buf.extend_from_slice(&self.version.to_le_bytes());

        push_varint(buf, self.input.len() as u64)?;
        for input in &self.input {
            buf.extend_from_slice(&input.prev_txid);
            buf.extend_from_slice(&input.prev_vout.to_le_bytes());
            push_varint(buf, input.script_sig.len() as u64)?;
            buf.extend_from_slice(&input.script_sig);
            buf.extend_from_slice(&input.sequence.to_le_bytes());
        }

        push_varint(buf, self.output.len() as u64)?;
        for output in &self.output {
            buf.extend_from_slice(&output.value.to_le_bytes());
            push_varint(buf, output.script_pubkey.len() as u64)?;
            buf.extend_from_slice(&output.script_pubkey);
        }

        buf.extend_from_slice(&self.lock_time.to_le_bytes());
        Ok(())
    }

    /// Transaction id in display order: `reverse(double_sha256(serialized))`.
    pub fn txid(&self) -> Result<[u8; 32], VerifyError> {
        let mut buf = Vec::with_capacity(128);
        self.consensus_encode(&mut buf)?;
        let mut id = double_sha256(&buf);
        id.reverse();
        Ok(id)
    }
}

/// Build the `to_spend` transaction for `message` locked to `script_pubkey`.
pub fn create_to_spend(message: &str, script_pubkey: &[u8]) -> Transaction {
    let message_hash = bip322_message_hash(message);

    let mut script_sig = Vec::with_capacity(34);
    script_sig.push(OP_0);
    script_sig.push(32);
    script_sig.extend_from_slice(&message_hash);

    Transaction {
        version: 0,
        lock_time: 0,
        input: vec![TxIn {
            prev_txid: [0u8; 32],
            prev_vout: VIRTUAL_VOUT,
            script_sig,
            sequence: 0,
        }],
        output: vec![TxOut {
            value: 0,
            script_pubkey: script_pubkey.to_vec(),
        }],
    }
}
