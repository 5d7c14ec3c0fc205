// Synchsafe integer codec
//
// A synchsafe integer spreads 28 bits over four bytes, seven bits each, so
// the top bit of every byte stays clear and never forms an MPEG sync word.

use crate::error::{Result, TagError};

/// Largest value a synchsafe integer can hold (2^28 - 1).
pub const MAX_SYNCHSAFE: u32 = 0x0FFF_FFFF;

/// Decode the first four bytes of `bytes` as a synchsafe integer.
///
/// Bytes with their high bit set violate the format but are tolerated: the
/// bit is masked off rather than rejected.
pub fn decode(bytes: &[u8]) -> Result<u32> {
    let raw: [u8; 4] = bytes
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or(TagError::InvalidLength {
            expected: 4,
            found: bytes.len(),
        })?;

    Ok(decode_u32(u32::from_be_bytes(raw)))
}

/// Decode a 32-bit value that already holds the synchsafe bit pattern.
pub fn decode_u32(raw: u32) -> u32 {
    if raw & 0x8080_8080 != 0 {
        tracing::warn!(raw, "non-compliant synchsafe integer, masking high bits");
    }
    let raw = raw & 0x7F7F_7F7F;

    (((raw >> 24) & 0x7F) << 21)
        | (((raw >> 16) & 0x7F) << 14)
        | (((raw >> 8) & 0x7F) << 7)
        | (raw & 0x7F)
}

/// Encode `value` as four synchsafe bytes. Bits above the 28th are dropped.
pub fn encode(value: u32) -> [u8; 4] {
    let value = value & MAX_SYNCHSAFE;
    [
        ((value >> 21) & 0x7F) as u8,
        ((value >> 14) & 0x7F) as u8,
        ((value >> 7) & 0x7F) as u8,
        (value & 0x7F) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decodes_known_value() {
        assert_eq!(decode(&[0x00, 0x00, 0x02, 0x01]).unwrap(), 257);
        assert_eq!(decode(&[0x7F, 0x7F, 0x7F, 0x7F]).unwrap(), MAX_SYNCHSAFE);
        assert_eq!(decode(&[0, 0, 0, 0]).unwrap(), 0);
    }

    #[test]
    fn ignores_bytes_past_the_fourth() {
        assert_eq!(decode(&[0x00, 0x00, 0x02, 0x01, 0xFF]).unwrap(), 257);
    }

    #[test]
    fn masks_high_bits() {
        assert_eq!(decode(&[0x80, 0x80, 0x82, 0x81]).unwrap(), 257);
        assert_eq!(decode_u32(0x0000_0281), 257);
    }

    #[test]
    fn short_input_is_invalid_length() {
        match decode(&[0x01, 0x02, 0x03]) {
            Err(TagError::InvalidLength { expected: 4, found: 3 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn encodes_known_value() {
        assert_eq!(encode(257), [0x00, 0x00, 0x02, 0x01]);
    }

    proptest! {
        #[test]
        fn decode_then_encode_is_identity(bytes in prop::array::uniform4(0u8..0x80)) {
            let value = decode(&bytes).unwrap();
            prop_assert!(value <= MAX_SYNCHSAFE);
            prop_assert_eq!(encode(value), bytes);
        }
    }
}
