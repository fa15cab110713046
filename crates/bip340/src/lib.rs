//! Digest combinators for Bitcoin's two hashing conventions: the classic
//! double SHA-256 applied to txids and base58check checksums, and the
//! domain-separated tagged hashes introduced with
//! [BIP-340](https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki)
//! that BIP-322 and Taproot sighashing build on.

mod double;
mod tagged;

pub use self::{double::*, tagged::*};
