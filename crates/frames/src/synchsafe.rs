//! Synchsafe integers.
//!
//! A 28-bit value stored big-endian in four bytes, seven bits per byte, so the
//! encoded form never contains an MPEG sync pattern (`0xFF` followed by a byte
//! with its high bits set). Tag sizes and v2.4 frame sizes use this encoding.

use thiserror::Error;

/// Largest value a synchsafe integer can hold (2^28 - 1).
pub const MAX: u32 = 0x0FFF_FFFF;

/// A value could not be converted to or from synchsafe form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SynchsafeError {
    /// One of the bytes has its high bit set.
    #[error("byte 0x{0:02X} has its high bit set")]
    HighBit(u8),
    /// The value needs more than 28 bits.
    #[error("{0} does not fit in 28 bits")]
    Overflow(u32),
}

/// Decode four synchsafe bytes.
///
/// # Errors
///
/// Returns [`SynchsafeError::HighBit`] if any byte is `>= 0x80`.
pub fn decode(bytes: [u8; 4]) -> Result<u32, SynchsafeError> {
    bytes.iter().try_fold(0u32, |acc, &byte| {
        if byte & 0x80 != 0 {
            return Err(SynchsafeError::HighBit(byte));
        }
        // acc < 2^21 before the shift, so the result stays below 2^28.
        Ok(acc.wrapping_shl(7) | u32::from(byte))
    })
}

/// Encode `value` as four synchsafe bytes.
///
/// # Errors
///
/// Returns [`SynchsafeError::Overflow`] if `value > MAX`.
#[allow(clippy::cast_possible_truncation)] // masked to 7 bits before the cast
pub fn encode(value: u32) -> Result<[u8; 4], SynchsafeError> {
    if value > MAX {
        return Err(SynchsafeError::Overflow(value));
    }
    Ok([
        (value.wrapping_shr(21) & 0x7F) as u8,
        (value.wrapping_shr(14) & 0x7F) as u8,
        (value.wrapping_shr(7) & 0x7F) as u8,
        (value & 0x7F) as u8,
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(decode([0x00, 0x00, 0x02, 0x01]).unwrap(), 257);
        assert_eq!(encode(257).unwrap(), [0x00, 0x00, 0x02, 0x01]);
        assert_eq!(encode(MAX).unwrap(), [0x7F, 0x7F, 0x7F, 0x7F]);
        assert_eq!(decode([0x7F, 0x7F, 0x7F, 0x7F]).unwrap(), MAX);
    }

    #[test]
    fn rejects_high_bit() {
        assert_eq!(
            decode([0x00, 0x80, 0x00, 0x00]),
            Err(SynchsafeError::HighBit(0x80))
        );
    }

    #[test]
    fn rejects_values_above_28_bits() {
        assert_eq!(encode(MAX + 1), Err(SynchsafeError::Overflow(MAX + 1)));
    }

    proptest::proptest! {
        #[test]
        fn roundtrips_every_28_bit_value(value in 0u32..=MAX) {
            let bytes = encode(value).unwrap();
            proptest::prop_assert!(bytes.iter().all(|b| b & 0x80 == 0));
            proptest::prop_assert_eq!(decode(bytes).unwrap(), value);
        }
    }
}
