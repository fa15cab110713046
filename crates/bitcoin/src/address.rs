//! Bitcoin address handling for the supported script types.
//!
//! BIP-322 callers hand us a bech32(m) address to check against; BIP-137
//! derives an address *from* the recovered key. Both directions live here,
//! together with the script templates the sighash paths need.

use std::str::FromStr;

use bech32::{Hrp, hrp, segwit};
use digest::Digest;
use ripemd::Ripemd160;
use sha2::Sha256;

use crate::{
    encode::{OP_CHECKSIG, OP_DUP, OP_EQUALVERIFY, OP_HASH160, OP_PUSHNUM_1, OP_0},
    error::VerifyError,
    message::double_sha256,
};

const P2PKH_VERSION: u8 = 0x00;
const P2SH_VERSION: u8 = 0x05;

/// A claimed address, decoded down to the bytes verification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// Native segwit v0 key hash (`bc1q...`/`tb1q...`).
    P2wpkh { program: [u8; 20] },
    /// Taproot (`bc1p...`/`tb1p...`). The witness program *is* the tweaked
    /// output key, so no tweak is ever re-applied here.
    P2tr { output_key: [u8; 32] },
}

impl Address {
    /// The output script this address locks to.
    pub fn script_pubkey(&self) -> Vec<u8> {
        match self {
            Self::P2wpkh { program } => {
                let mut script = Vec::with_capacity(22);
                script.push(OP_0);
                script.push(20);
                script.extend_from_slice(program);
                script
            }
            Self::P2tr { output_key } => {
                let mut script = Vec::with_capacity(34);
                script.push(OP_PUSHNUM_1);
                script.push(32);
                script.extend_from_slice(output_key);
                script
            }
        }
    }
}

impl FromStr for Address {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || VerifyError::UnsupportedAddressType(s.to_owned());

        let (hrp, version, program) = segwit::decode(s).map_err(|_| unsupported())?;
        if !hrp.as_str().eq_ignore_ascii_case("bc") && !hrp.as_str().eq_ignore_ascii_case("tb") {
            return Err(unsupported());
        }

        match (version.to_u8(), program.len()) {
            (0, 20) => Ok(Self::P2wpkh {
                program: program.try_into().map_err(|_| unsupported())?,
            }),
            (1, 32) => Ok(Self::P2tr {
                output_key: program.try_into().map_err(|_| unsupported())?,
            }),
            _ => Err(unsupported()),
        }
    }
}

/// `RIPEMD160(SHA256(data))`, Bitcoin's address hash.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

/// The BIP143 scriptCode for a key-hash input, which is the P2PKH template
/// rather than the witness program itself.
pub fn p2pkh_script(pubkey_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(25);
    script.push(OP_DUP);
    script.push(OP_HASH160);
    script.push(20);
    script.extend_from_slice(pubkey_hash);
    script.push(OP_EQUALVERIFY);
    script.push(OP_CHECKSIG);
    script
}

fn base58check(version: u8, payload: &[u8; 20]) -> String {
    let mut data = Vec::with_capacity(25);
    data.push(version);
    data.extend_from_slice(payload);
    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data).into_string()
}

/// Legacy P2PKH address for a SEC1-encoded public key (either compression).
pub fn p2pkh_address(pubkey: &[u8]) -> String {
    base58check(P2PKH_VERSION, &hash160(pubkey))
}

/// P2SH address wrapping a P2WPKH redeem script for a compressed key.
pub fn p2sh_p2wpkh_address(pubkey: &[u8; 33]) -> String {
    let mut redeem = Vec::with_capacity(22);
    redeem.push(OP_0);
    redeem.push(20);
    redeem.extend_from_slice(&hash160(pubkey));
    base58check(P2SH_VERSION, &hash160(&redeem))
}

/// Native segwit P2WPKH address for a compressed key (mainnet).
pub fn p2wpkh_address(pubkey: &[u8; 33]) -> String {
    encode_segwit_v0(hrp::BC, &hash160(pubkey))
}

fn encode_segwit_v0(hrp: Hrp, program: &[u8; 20]) -> String {
    // Infallible: the program length is valid for v0 by construction.
    segwit::encode_v0(hrp, program).expect("valid witness program")
}
