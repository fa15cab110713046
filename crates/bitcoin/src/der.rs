//! DER ⇄ compact conversion for ECDSA signatures.
//!
//! Witness stacks carry ECDSA signatures as ASN.1 DER:
//!
//! ```text
//! 0x30 <total-len> 0x02 <r-len> <r> 0x02 <s-len> <s>
//! ```
//!
//! The curve primitives want the fixed-width 64-byte `r ‖ s` form instead,
//! so parsing strips any `0x00` padding byte DER inserts when an integer's
//! high bit is set and left-pads short integers back to 32 bytes.

/// Parse a DER-encoded ECDSA signature into fixed-width `(r, s)`.
///
/// Rejects wrong tags, length mismatches, trailing data, and integers that
/// cannot fit 32 bytes after unpadding.
pub fn parse_der_signature(der: &[u8]) -> Option<([u8; 32], [u8; 32])> {
    if der.len() < 8 || der[0] != 0x30 {
        return None;
    }
    // Canonical Bitcoin signatures never need DER's long-form lengths.
    let total_len = usize::from(der[1]);
    if der[1] >= 0x80 || der.len() != total_len + 2 {
        return None;
    }

    let (r, rest) = parse_der_integer(&der[2..])?;
    let (s, rest) = parse_der_integer(rest)?;
    rest.is_empty().then_some((r, s))
}

fn parse_der_integer(data: &[u8]) -> Option<([u8; 32], &[u8])> {
    if data.len() < 2 || data[0] != 0x02 {
        return None;
    }
    let len = usize::from(data[1]);
    if data[1] >= 0x80 || len == 0 {
        return None;
    }
    let value = data.get(2..2 + len)?;

    // Drop the sign-padding byte, if any; anything wider than 32 bytes
    // after that cannot be a secp256k1 scalar.
    let value = match value {
        [0x00, rest @ ..] => rest,
        _ => value,
    };
    if value.len() > 32 {
        return None;
    }

    let mut fixed = [0u8; 32];
    fixed[32 - value.len()..].copy_from_slice(value);
    Some((fixed, &data[2 + len..]))
}

/// Encode fixed-width `(r, s)` as DER.
pub fn encode_der_signature(r: &[u8; 32], s: &[u8; 32]) -> Vec<u8> {
    let r = der_integer(r);
    let s = der_integer(s);

    let mut der = Vec::with_capacity(r.len() + s.len() + 2);
    der.push(0x30);
    der.push((r.len() + s.len()) as u8);
    der.extend_from_slice(&r);
    der.extend_from_slice(&s);
    der
}

fn der_integer(value: &[u8; 32]) -> Vec<u8> {
    // Strip leading zeros down to a single byte, then re-pad with one zero
    // byte if the top bit would make the integer read as negative.
    let start = value.iter().position(|&b| b != 0).unwrap_or(31);
    let trimmed = &value[start..];
    let pad = usize::from(trimmed[0] & 0x80 != 0);

    let mut out = Vec::with_capacity(trimmed.len() + pad + 2);
    out.push(0x02);
    out.push((trimmed.len() + pad) as u8);
    if pad == 1 {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
    out
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rstest::rstest;

    use super::*;

    fn scalar(hex_tail: u8, fill: u8) -> [u8; 32] {
        let mut out = [fill; 32];
        out[31] = hex_tail;
        out
    }

    #[rstest]
    #[case(scalar(0x01, 0x00), scalar(0x02, 0x00))] // minimal one-byte integers
    #[case(scalar(0x7F, 0x12), scalar(0x55, 0x34))] // full-width, low top bit
    #[case(scalar(0x00, 0x80), scalar(0xFF, 0xC0))] // top bit set: forces 0x00 pad
    #[case([0u8; 32], [0u8; 32])] // all-zero encodes as single zero byte
    fn round_trips(#[case] r: [u8; 32], #[case] s: [u8; 32]) {
        let der = encode_der_signature(&r, &s);
        assert_eq!(parse_der_signature(&der), Some((r, s)));
    }

    #[test]
    fn high_bit_integer_gets_padding_byte() {
        let der = encode_der_signature(&[0x80; 32], &scalar(0x01, 0x00));
        // 0x02 0x21 0x00 <33 bytes total for r>
        assert_eq!(&der[2..5], &[0x02, 0x21, 0x00]);
        assert_eq!(der[5], 0x80);
    }

    #[test]
    fn parses_reference_signature() {
        // DER body of the BIP-322 "Hello World" P2WPKH signature
        let der = hex!(
            "304402206517c8637a7bfc3a154edcba6196d64bbd5b73955cb7da7d1626bcdde466c364"
            "022022bf10d19fc0bb69b4596e306b362acaa835293cf693bb176f7324b531f5afec"
        );
        let (r, s) = parse_der_signature(&der).unwrap();
        assert_eq!(
            r,
            hex!("6517c8637a7bfc3a154edcba6196d64bbd5b73955cb7da7d1626bcdde466c364")
        );
        assert_eq!(
            s,
            hex!("22bf10d19fc0bb69b4596e306b362acaa835293cf693bb176f7324b531f5afec")
        );
    }

    #[rstest]
    #[case(&[] as &[u8])]
    #[case(&hex!("3106020101020102"))] // wrong sequence tag
    #[case(&hex!("3006030101020102"))] // wrong integer tag
    #[case(&hex!("3008020101020102"))] // declared length too long
    #[case(&hex!("3006020101020102ff"))] // trailing byte
    #[case(&hex!("3006020000020102"))] // zero-length integer
    fn rejects_malformed(#[case] der: &[u8]) {
        assert_eq!(parse_der_signature(der), None);
    }
}
