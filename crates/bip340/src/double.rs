use digest::{FixedOutput, HashMarker, OutputSizeUser, Update};

/// Two passes of `D`, the first finalized into the second.
///
/// `Double<Sha256>` is Bitcoin's `hash256`: the digest behind txids, signed
/// message hashes and base58check checksums. Wrapping it as a [`digest`]
/// hasher lets callers stream data in instead of buffering a full
/// serialization before the first pass.
#[derive(Debug, Clone, Default)]
pub struct Double<D>(D);

impl<D> Update for Double<D>
where
    D: Update,
{
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }
}

impl<D> OutputSizeUser for Double<D>
where
    D: OutputSizeUser,
{
    type OutputSize = D::OutputSize;
}

impl<D> FixedOutput for Double<D>
where
    D: FixedOutput + Update + Default,
{
    fn finalize_into(self, out: &mut digest::Output<Self>) {
        D::default()
            .chain(self.0.finalize_fixed())
            .finalize_into(out);
    }
}

impl<D> HashMarker for Double<D> where D: HashMarker {}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rstest::rstest;
    use sha2::{Digest, Sha256};

    use super::*;

    #[rstest]
    #[case(b"abc".as_slice(), hex!("4f8b42c22dd3729b519ba6f68d2da7cc5b2d606d05daed5ad5128cc03e6c6358"))]
    #[case(&[0u8; 64], hex!("e2f61c3f71d1defd3fa999dfa36953755c690689799962b48bebd836974e8cf9"))]
    fn hash256_vectors(#[case] input: &[u8], #[case] output: [u8; 32]) {
        assert_eq!(Double::<Sha256>::digest(input), output.into());
    }

    #[test]
    fn streaming_matches_two_manual_passes() {
        let streamed = Double::<Sha256>::new()
            .chain_update(b"version")
            .chain_update(b"inputs")
            .chain_update(b"outputs")
            .finalize();
        let buffered = Sha256::digest(Sha256::digest(b"versioninputsoutputs"));
        assert_eq!(streamed, buffered);
    }
}
