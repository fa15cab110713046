use digest::Digest;

/// The BIP-340 tagged-hash construction: `H(H(tag) ‖ H(tag) ‖ payload)`.
///
/// Hashing the tag twice up front pushes the hasher to a tag-specific
/// midstate, so a digest computed under one tag can never collide with one
/// computed under another. Consumers here feed it the
/// `BIP0322-signed-message` commitment and the `TapSighash` message.
pub trait TaggedDigest: Digest {
    /// A hasher pre-fed with both copies of `sha256(tag)`, ready for the
    /// payload.
    fn tagged(tag: impl AsRef<[u8]>) -> Self;
}

impl<D: Digest> TaggedDigest for D {
    fn tagged(tag: impl AsRef<[u8]>) -> Self {
        let tag = Self::digest(tag);
        Self::new().chain_update(&tag).chain_update(&tag)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rstest::rstest;
    use sha2::Sha256;

    use super::*;

    #[rstest]
    #[case(
        b"TapSighash".as_slice(),
        &[0x00],
        hex!("c2fd0de003889a09c4afcf676656a0d8a1fb706313ff7d509afb00c323c010cd")
    )]
    #[case(
        b"BIP0340/aux".as_slice(),
        &[0u8; 32],
        hex!("54f169cfc9e2e5727480441f90ba25c488f461c70b5ea5dcaaf7af69270aa514")
    )]
    fn tagged_vectors(#[case] tag: &[u8], #[case] payload: &[u8], #[case] output: [u8; 32]) {
        assert_eq!(
            Sha256::tagged(tag).chain_update(payload).finalize(),
            output.into()
        );
    }

    #[test]
    fn tags_separate_domains() {
        let payload = b"identical payload";
        assert_ne!(
            Sha256::tagged(b"TapSighash").chain_update(payload).finalize(),
            Sha256::tagged(b"TapLeaf").chain_update(payload).finalize()
        );
    }
}
