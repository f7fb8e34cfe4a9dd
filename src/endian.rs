//! Byte order tagging and conversion.
//!
//! Values read out of a resource are raw bit patterns; they only carry a
//! numeric meaning once the byte order they were stored in is known. The
//! conversions here are total and self-inverse: converting `a -> b -> a`
//! always yields the original bit pattern.

use crate::error::DecodeError;

/// Byte order of a multi-byte value.
///
/// The discriminants are the numeric values of the byte order marks used by
/// BRES and NW4R structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Endianness {
    /// Most significant byte first.
    Big = 0xFEFF,
    /// Least significant byte first.
    Little = 0xFFFE,
}

impl Endianness {
    /// Byte order of the host, fixed at compile time.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = Self::Little;
    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = Self::Big;

    #[inline]
    pub const fn is_native(self) -> bool {
        matches!(
            (self, Self::NATIVE),
            (Self::Big, Self::Big) | (Self::Little, Self::Little)
        )
    }

    /// Numeric byte order mark for this order.
    #[inline]
    pub const fn bom(self) -> u16 {
        self as u16
    }

    /// Maps a byte order mark read as a big-endian `u16` back to an order.
    pub const fn from_bom(value: u16) -> Result<Self, DecodeError> {
        match value {
            0xFEFF => Ok(Self::Big),
            0xFFFE => Ok(Self::Little),
            other => Err(DecodeError::InvalidByteOrderMark(other)),
        }
    }
}

/// Byte swapping and order conversion over a fixed-width bit pattern.
pub trait EndianConvert: Sized + Copy {
    /// Swaps the bytes across the full width of the value.
    fn reverse(self) -> Self;

    /// Returns `self` unchanged when `from == to`, the reversed value otherwise.
    #[inline]
    fn convert(self, from: Endianness, to: Endianness) -> Self {
        if from == to { self } else { self.reverse() }
    }

    /// Reinterprets a value stored in `from` order as a native value.
    #[inline]
    fn to_native(self, from: Endianness) -> Self {
        self.convert(from, Endianness::NATIVE)
    }

    /// Lays a native value out in `to` order.
    #[inline]
    fn from_native(self, to: Endianness) -> Self {
        self.convert(Endianness::NATIVE, to)
    }
}

macro_rules! impl_endian_convert {
    ($($t:ty),*) => {
        $(
            impl EndianConvert for $t {
                #[inline]
                fn reverse(self) -> Self {
                    self.swap_bytes()
                }
            }
        )*
    };
}

impl_endian_convert!(u16, i16, u32, i32, u64, i64);

#[inline]
pub fn reverse<T: EndianConvert>(value: T) -> T {
    value.reverse()
}

#[inline]
pub fn convert<T: EndianConvert>(value: T, from: Endianness, to: Endianness) -> T {
    value.convert(from, to)
}

#[inline]
pub fn to_native<T: EndianConvert>(value: T, from: Endianness) -> T {
    value.to_native(from)
}

#[inline]
pub fn from_native<T: EndianConvert>(value: T, to: Endianness) -> T {
    value.from_native(to)
}
