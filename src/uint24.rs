use core::cmp::Ordering;
use core::fmt;

use crate::endian::{EndianConvert, Endianness};

/// A 3-byte unsigned integer.
///
/// The raw bytes are the source of truth; the numeric value is resolved on
/// demand for a given byte order, the same way a `u32` read off disk only has
/// a meaning once its order is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UInt24([u8; 3]);

impl UInt24 {
    pub const MAX: u32 = 0xFF_FFFF;
    pub const MIN: u32 = 0;

    pub const ZERO: Self = Self([0; 3]);

    #[inline]
    pub const fn new(b0: u8, b1: u8, b2: u8) -> Self {
        Self([b0, b1, b2])
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0
    }

    /// Numeric value of the raw bytes interpreted in `order`.
    pub const fn get(self, order: Endianness) -> u32 {
        let [b0, b1, b2] = self.0;
        match order {
            Endianness::Big => ((b0 as u32) << 16) | ((b1 as u32) << 8) | b2 as u32,
            Endianness::Little => b0 as u32 | ((b1 as u32) << 8) | ((b2 as u32) << 16),
        }
    }

    /// Numeric value of the raw bytes in native order.
    #[inline]
    pub const fn value(self) -> u32 {
        self.get(Endianness::NATIVE)
    }

    /// Lays `value` out in `order`. Returns `None` above [`UInt24::MAX`].
    pub const fn from_u32(value: u32, order: Endianness) -> Option<Self> {
        if value > Self::MAX {
            return None;
        }
        let [lo, mid, hi, _] = value.to_le_bytes();
        Some(match order {
            Endianness::Big => Self([hi, mid, lo]),
            Endianness::Little => Self([lo, mid, hi]),
        })
    }
}

impl EndianConvert for UInt24 {
    #[inline]
    fn reverse(self) -> Self {
        let [b0, b1, b2] = self.0;
        Self([b2, b1, b0])
    }
}

impl Ord for UInt24 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl PartialOrd for UInt24 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<UInt24> for [u8; 3] {
    fn from(value: UInt24) -> Self {
        value.0
    }
}

impl From<[u8; 3]> for UInt24 {
    fn from(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for UInt24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [b0, b1, b2] = self.0;
        write!(f, "0x{b0:02X}{b1:02X}{b2:02X}")
    }
}
