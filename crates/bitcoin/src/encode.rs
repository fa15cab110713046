//! Bitcoin wire-format integer encoding.
//!
//! Every byte path in this crate (legacy transaction serialization, the
//! BIP143 preimage and the BIP341 sigMsg) funnels its variable-length
//! integers through here so the off-by-one risk lives in exactly one place.

use crate::error::VerifyError;

// Script opcodes used by the supported output types.
pub const OP_0: u8 = 0x00;
pub const OP_PUSHNUM_1: u8 = 0x51;
pub const OP_RETURN: u8 = 0x6a;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;

/// Largest value accepted when serializing a varint.
///
/// Bitcoin's `CompactSize` has a 9-byte form for larger values, but nothing
/// this crate serializes can legitimately reach it, so it is rejected.
pub const VARINT_MAX: u64 = 0xFFFF_FFFF;

/// Encode `n` as a Bitcoin `CompactSize` varint.
///
/// - `n < 0xfd`: single byte
/// - `n <= 0xffff`: `0xfd` + 2-byte little-endian
/// - `n <= 0xffffffff`: `0xfe` + 4-byte little-endian
/// - larger: rejected with [`VerifyError::Encoding`]
pub fn varint(n: u64) -> Result<Vec<u8>, VerifyError> {
    let mut buf = Vec::with_capacity(5);
    push_varint(&mut buf, n)?;
    Ok(buf)
}

/// Append the varint encoding of `n` to `buf`.
pub fn push_varint(buf: &mut Vec<u8>, n: u64) -> Result<(), VerifyError> {
    match n {
        0..=0xFC => buf.push(n as u8),
        0xFD..=0xFFFF => {
            buf.push(0xFD);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=VARINT_MAX => {
            buf.push(0xFE);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => return Err(VerifyError::Encoding),
    }
    Ok(())
}

/// Read a varint from `data` starting at `cursor`.
///
/// Returns `(value, bytes_consumed)`, or `None` on truncated input. The
/// 9-byte (`0xFF`) form is accepted on read so foreign witness blobs parse
/// far enough to be rejected by shape instead of by encoding.
pub fn read_varint(data: &[u8], cursor: usize) -> Option<(u64, usize)> {
    match *data.get(cursor)? {
        n @ 0..=0xFC => Some((u64::from(n), 1)),
        0xFD => {
            let bytes = data.get(cursor + 1..cursor + 3)?;
            Some((u64::from(u16::from_le_bytes(bytes.try_into().ok()?)), 3))
        }
        0xFE => {
            let bytes = data.get(cursor + 1..cursor + 5)?;
            Some((u64::from(u32::from_le_bytes(bytes.try_into().ok()?)), 5))
        }
        0xFF => {
            let bytes = data.get(cursor + 1..cursor + 9)?;
            Some((u64::from_le_bytes(bytes.try_into().ok()?), 9))
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0x00, &[0x00])]
    #[case(0xFC, &[0xFC])]
    #[case(0xFD, &[0xFD, 0xFD, 0x00])]
    #[case(0xFFFF, &[0xFD, 0xFF, 0xFF])]
    #[case(0x1_0000, &[0xFE, 0x00, 0x00, 0x01, 0x00])]
    #[case(VARINT_MAX, &[0xFE, 0xFF, 0xFF, 0xFF, 0xFF])]
    fn varint_encoding(#[case] n: u64, #[case] expected: &[u8]) {
        assert_eq!(varint(n).unwrap(), expected);
    }

    #[test]
    fn varint_rejects_values_above_cap() {
        assert_eq!(varint(0x1_0000_0000), Err(VerifyError::Encoding));
    }

    #[rstest]
    #[case(&[0x42], Some((0x42, 1)))]
    #[case(&[0xFD, 0xFD, 0x00], Some((0xFD, 3)))]
    #[case(&[0xFE, 0x00, 0x00, 0x01, 0x00], Some((0x1_0000, 5)))]
    #[case(&[0xFF, 1, 0, 0, 0, 0, 0, 0, 0], Some((1, 9)))]
    #[case(&[0xFD, 0xFD], None)]
    #[case(&[], None)]
    fn varint_decoding(#[case] data: &[u8], #[case] expected: Option<(u64, usize)>) {
        assert_eq!(read_varint(data, 0), expected);
    }

    #[test]
    fn varint_round_trips() {
        for n in [0u64, 0x7B, 0xFC, 0xFD, 0x1234, 0xFFFF, 0x1_0000, VARINT_MAX] {
            let encoded = varint(n).unwrap();
            assert_eq!(read_varint(&encoded, 0), Some((n, encoded.len())));
        }
    }
}
