//! Message framing and hashing.
//!
//! Two incompatible commitments coexist here:
//!
//! - BIP-137 wallets sign `double_sha256("\x18Bitcoin Signed Message:\n" +
//!   varint(len) + message)`.
//! - BIP-322 wallets commit to the message with the BIP-340 tagged hash
//!   `sha256(sha256(tag) || sha256(tag) || message)` where
//!   `tag = "BIP0322-signed-message"`, and that commitment is then buried in
//!   a virtual transaction (see [`crate::transaction`]).

use digest::Digest;
use keyport_bip340::{Double, TaggedDigest};
use sha2::Sha256;

use crate::{encode, error::VerifyError};

/// Double SHA-256, Bitcoin's ubiquitous digest.
pub type DoubleSha256 = Double<Sha256>;

/// The fixed framing prefix, including its own one-byte length prefix
/// (`0x18` is the length of the literal that follows, not of the message).
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x18Bitcoin Signed Message:\n";

/// Domain-separation tag for the BIP-322 message commitment.
pub const BIP322_TAG: &[u8] = b"BIP0322-signed-message";

/// Build the exact bytes a BIP-137 wallet signs.
pub fn frame_message(message: &str) -> Result<Vec<u8>, VerifyError> {
    let msg = message.as_bytes();
    let mut framed = Vec::with_capacity(SIGNED_MESSAGE_PREFIX.len() + 5 + msg.len());
    framed.extend_from_slice(SIGNED_MESSAGE_PREFIX);
    encode::push_varint(&mut framed, msg.len() as u64)?;
    framed.extend_from_slice(msg);
    Ok(framed)
}

/// The digest a BIP-137 signature covers.
pub fn signed_message_hash(message: &str) -> Result<[u8; 32], VerifyError> {
    Ok(DoubleSha256::digest(frame_message(message)?).into())
}

pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    DoubleSha256::digest(data).into()
}

/// The BIP-322 tagged commitment embedded in the `to_spend` scriptSig.
pub fn bip322_message_hash(message: &str) -> [u8; 32] {
    Sha256::tagged(BIP322_TAG)
        .chain_update(message.as_bytes())
        .finalize()
        .into()
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn empty_message_frames_to_27_bytes() {
        let framed = frame_message("").unwrap();
        assert_eq!(framed.len(), 27);
        assert_eq!(framed[0], 0x18);
        assert_eq!(&framed[1..26], b"Bitcoin Signed Message:\n");
        assert_eq!(framed[26], 0x00);
    }

    #[test]
    fn framing_appends_varint_length_and_message() {
        let framed = frame_message("abc").unwrap();
        assert_eq!(&framed[26..], b"\x03abc");
    }

    #[test]
    fn bip322_hash_matches_reference_vector() {
        // Published alongside BIP-322: tagged_hash("Hello World")
        assert_eq!(
            bip322_message_hash("Hello World"),
            hex!("f0eb03b1a75ac6d9847f55c624a99169b5dccba2a31f5b23bea77ba270de0a7a")
        );
    }

    #[test]
    fn commitments_are_domain_separated() {
        assert_ne!(
            bip322_message_hash("Hello World").to_vec(),
            signed_message_hash("Hello World").unwrap().to_vec()
        );
    }
}
