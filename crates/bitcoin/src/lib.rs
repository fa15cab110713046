//! Bitcoin message-signature verification for address ownership checks.
//!
//! Two incompatible schemes are supported behind one entry point:
//!
//! - legacy 65-byte header-prefixed ECDSA signatures
//!   ([BIP-137](https://github.com/bitcoin/bips/blob/master/bip-0137.mediawiki)),
//!   which recover their own address, and
//! - the simple flavor of
//!   [BIP-322](https://github.com/bitcoin/bips/blob/master/bip-0322.mediawiki),
//!   a base64 witness stack verified against a claimed segwit address
//!   (witness v0 key hash or Taproot key path).
//!
//! [`verify`] classifies the signature by shape and dispatches. It is a pure
//! oracle: no network, no chain state, no key material.

use std::str::FromStr;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

pub mod address;
pub mod bip137;
pub mod curve;
pub mod der;
pub mod encode;
pub mod error;
pub mod message;
pub mod sighash;
pub mod transaction;
pub mod verification;
pub mod witness;


use self::address::Address;
pub use self::error::VerifyError;

/// Outcome of a verification attempt.
///
/// `address` is the claimed address for BIP-322 and the derived address for
/// BIP-137. `public_key` is the hex-encoded recovered key on the BIP-137
/// path; BIP-322 has no recoverable key, so it stays empty there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub valid: bool,
    pub address: String,
    pub public_key: String,
}

impl VerificationResult {
    fn invalid(address: String) -> Self {
        Self {
            valid: false,
            address,
            public_key: String::new(),
        }
    }
}

/// Decode a signature given as 130-char hex or as base64.
fn decode_signature(signature: &str) -> Result<Vec<u8>, VerifyError> {
    if signature.len() == 130 && signature.bytes().all(|b| b.is_ascii_hexdigit()) {
        return hex::decode(signature).map_err(|_| VerifyError::Encoding);
    }
    BASE64.decode(signature).map_err(|_| VerifyError::Encoding)
}

/// Verify a signed ownership challenge.
///
/// Signatures matching the 65-byte header-prefixed shape take the BIP-137
/// path and ignore `address`; anything else is treated as a BIP-322 witness
/// and requires one. Cryptographic failures yield `valid: false`; only
/// malformed input errors.
pub fn verify(
    signature: &str,
    message: &str,
    address: Option<&str>,
) -> Result<VerificationResult, VerifyError> {
    let bytes = decode_signature(signature)?;

    if bip137::matches_signature_shape(&bytes) {
        return bip137::verify_bip137(&bytes, message);
    }

    let claimed = address.ok_or(VerifyError::MissingAddress)?;

    // Dispatch on the prefix alone; a recognized prefix that fails to
    // decode is untrusted input, not a caller bug, and folds below.
    let valid = match claimed.get(..4).map(str::to_ascii_lowercase).as_deref() {
        Some("bc1q" | "tb1q") => match Address::from_str(claimed) {
            Ok(Address::P2wpkh { program }) => {
                verification::p2wpkh::verify_witness(&bytes, message, &program).is_some()
            }
            _ => false,
        },
        Some("bc1p" | "tb1p") => match Address::from_str(claimed) {
            Ok(Address::P2tr { output_key }) => {
                verification::p2tr::verify_witness(&bytes, message, &output_key).is_some()
            }
            _ => false,
        },
        _ => return Err(VerifyError::UnsupportedAddressType(claimed.to_owned())),
    };

    Ok(VerificationResult {
        valid,
        address: claimed.to_owned(),
        public_key: String::new(),
    })
}
