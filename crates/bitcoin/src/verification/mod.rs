//! BIP-322 simple verification, one module per supported script type.
//!
//! Both verifiers take the decoded witness bytes, the message, and the
//! program extracted from the claimed address, and return the confirmed
//! public key on success. `None` covers every structural and cryptographic
//! failure; the dispatcher folds it into `valid: false`.

pub mod p2tr;
pub mod p2wpkh;
