//! Bit and nibble helpers for single bytes.
//!
//! Bits are numbered 0 to 7, right to left.

use crate::error::DecodeError;

type Result<T> = core::result::Result<T, DecodeError>;

pub trait ByteBits: Copy {
    /// Upper nibble (bits 7-4), shifted down.
    fn upper4(self) -> u8;

    /// Lower nibble (bits 3-0).
    fn lower4(self) -> u8;

    /// State of the bit at `index`.
    fn bit(self, index: u8) -> Result<bool>;

    /// Copy of `self` with the bit at `index` set to `value`.
    fn with_bit(self, index: u8, value: bool) -> Result<Self>;
}

impl ByteBits for u8 {
    #[inline]
    fn upper4(self) -> u8 {
        (self >> 4) & 0x0F
    }

    #[inline]
    fn lower4(self) -> u8 {
        self & 0x0F
    }

    fn bit(self, index: u8) -> Result<bool> {
        check_index(index)?;
        Ok(self & (1 << index) != 0)
    }

    fn with_bit(self, index: u8, value: bool) -> Result<Self> {
        check_index(index)?;
        Ok(if value {
            self | (1 << index)
        } else {
            self & !(1 << index)
        })
    }
}

const fn check_index(index: u8) -> Result<()> {
    if index > 7 {
        return Err(DecodeError::OutOfRange {
            position: index as usize,
            len: 1,
            capacity: 8,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibbles() {
        assert_eq!(0x1Fu8.upper4(), 0x1);
        assert_eq!(0x1Fu8.lower4(), 0xF);
        assert_eq!(0xA0u8.lower4(), 0);
    }

    #[test]
    fn test_bits() {
        assert_eq!(0b1000_0001u8.bit(0), Ok(true));
        assert_eq!(0b1000_0001u8.bit(7), Ok(true));
        assert_eq!(0b1000_0001u8.bit(3), Ok(false));
        assert_eq!(0u8.with_bit(4, true), Ok(0x10));
        assert_eq!(0xFFu8.with_bit(0, false), Ok(0xFE));
    }

    #[test]
    fn test_bit_index_out_of_range() {
        assert!(matches!(
            0u8.bit(8),
            Err(DecodeError::OutOfRange { position: 8, .. })
        ));
        assert!(0u8.with_bit(9, true).is_err());
    }
}
