//! Decoding of serialized segwit witness stacks.
//!
//! BIP-322 simple signatures are a base64-encoded witness stack: a varint
//! item count followed by varint-length-prefixed items.

use crate::encode::read_varint;

// Bounds on untrusted input; far above anything a supported scheme produces.
const MAX_ITEMS: u64 = 100;
const MAX_ITEM_LEN: u64 = 10_000;

/// A parsed witness stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessStack {
    items: Vec<Vec<u8>>,
}

impl WitnessStack {
    /// Parse a serialized witness stack, requiring every input byte to be
    /// consumed. Trailing garbage means this is not a witness.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let (count, consumed) = read_varint(data, 0)?;
        if count > MAX_ITEMS {
            return None;
        }
        let mut cursor = consumed;

        let mut items = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let (item_len, consumed) = read_varint(data, cursor)?;
            if item_len > MAX_ITEM_LEN {
                return None;
            }
            cursor += consumed;

            let item = data.get(cursor..cursor + item_len as usize)?;
            items.push(item.to_vec());
            cursor += item_len as usize;
        }

        (cursor == data.len()).then_some(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn nth(&self, index: usize) -> Option<&[u8]> {
        self.items.get(index).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_item_stack() {
        let mut data = vec![0x02, 0x03];
        data.extend_from_slice(b"sig");
        data.push(0x02);
        data.extend_from_slice(b"pk");

        let stack = WitnessStack::parse(&data).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.nth(0), Some(b"sig".as_slice()));
        assert_eq!(stack.nth(1), Some(b"pk".as_slice()));
        assert_eq!(stack.nth(2), None);
    }

    #[test]
    fn parses_empty_stack() {
        let stack = WitnessStack::parse(&[0x00]).unwrap();
        assert!(stack.is_empty());
    }

    #[test]
    fn rejects_truncated_item() {
        assert_eq!(WitnessStack::parse(&[0x01, 0x05, b'a', b'b']), None);
    }

    #[test]
    fn rejects_trailing_bytes() {
        assert_eq!(WitnessStack::parse(&[0x01, 0x01, 0xAA, 0xBB]), None);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(WitnessStack::parse(&[]), None);
    }
}
