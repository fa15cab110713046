//! Error taxonomy for signature verification.
//!
//! Only caller bugs surface as errors: a signature string that is neither
//! hex nor base64, a malformed BIP-137 envelope, or a BIP-322 call without a
//! usable address. Failures caused by untrusted signature *content* (bad
//! witness shape, bad DER, failed curve math, address mismatch) never raise;
//! the verifiers fold them into `valid: false` so forged input cannot crash
//! the caller or leak which internal step rejected it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Signature string is neither a 130-char hex string nor valid base64,
    /// or a message exceeds the varint cap.
    #[error("signature encoding is neither hex nor base64")]
    Encoding,

    /// BIP-137 signature is not exactly 65 bytes.
    #[error("invalid BIP-137 signature length: {0}")]
    InvalidLength(usize),

    /// BIP-137 header byte outside `27..=42`.
    #[error("invalid BIP-137 header byte: {0}")]
    InvalidHeader(u8),

    /// BIP-322 verification requires the claimed address.
    #[error("missing address for BIP-322 verification")]
    MissingAddress,

    /// Address prefix does not map to a supported BIP-322 script type.
    #[error("unsupported address type: {0}")]
    UnsupportedAddressType(String),
}
