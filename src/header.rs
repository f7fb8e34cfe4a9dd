//! Compression header detection.
//!
//! Wire layout, offsets from the start of the region:
//!
//! | Offset | Size | Field                                                    |
//! |--------|------|----------------------------------------------------------|
//! | 0x0    | 1    | type: algorithm in the upper nibble, flags in the lower  |
//! | 0x1    | 3    | decoded size, little-endian; 0 means "see extra size"    |
//! | 0x4    | 4    | decoded size, little-endian; only present when 0x1 is 0 |
//!
//! The size fields are little-endian regardless of the byte order the
//! payload itself declares.

use crate::accessor::BufferAccessor;
use crate::bits::ByteBits;
use crate::endian::{EndianConvert, Endianness};
use crate::error::DecodeError;
use crate::uint24::UInt24;

type Result<T> = core::result::Result<T, DecodeError>;

/// Size of a header whose 24-bit size field is nonzero.
pub const SHORT_HEADER_SIZE: usize = 4;

/// Size of a header that carries the 32-bit extra size.
pub const LONG_HEADER_SIZE: usize = 8;

/// Compression types this crate can expand, including parameter flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CompressionType {
    /// Placeholder for uncompressed data; never a valid header.
    None = 0x00,
    Lz77 = 0x10,
    /// LZ77 with longer length encodings.
    ExtendedLz77 = 0x11,
}

impl CompressionType {
    /// Maps a raw type byte to a known type; flags in the lower nibble other
    /// than the extended bit make the byte unknown.
    pub const fn from_byte(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::None),
            0x10 => Some(Self::Lz77),
            0x11 => Some(Self::ExtendedLz77),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }
}

/// Known compression algorithm families, supported or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CompressionAlgorithm {
    Lz77 = 0x1,
    Huffman = 0x2,
    RunLength = 0x3,
    Lz77Huffman = 0x4,
    Lz77RangeCoder = 0x5,
    Differential = 0x8,
}

impl CompressionAlgorithm {
    /// Maps the upper nibble of a type byte to its family.
    pub const fn from_nibble(value: u8) -> Option<Self> {
        match value {
            0x1 => Some(Self::Lz77),
            0x2 => Some(Self::Huffman),
            0x3 => Some(Self::RunLength),
            0x4 => Some(Self::Lz77Huffman),
            0x5 => Some(Self::Lz77RangeCoder),
            0x8 => Some(Self::Differential),
            _ => None,
        }
    }
}

/// Descriptor parsed from the first 4 or 8 bytes of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionHeader {
    kind: u8,
    size: UInt24,
    extra_size: u32,
}

impl CompressionHeader {
    /// Builds a header for `decoded_size` bytes, using the 8-byte layout only
    /// when the size does not fit the 24-bit field.
    pub fn new(kind: CompressionType, decoded_size: u32) -> Self {
        match UInt24::from_u32(decoded_size, Endianness::Little) {
            Some(size) if !size.is_zero() => Self {
                kind: kind.to_byte(),
                size,
                extra_size: 0,
            },
            _ => Self {
                kind: kind.to_byte(),
                size: UInt24::ZERO,
                extra_size: decoded_size.from_native(Endianness::Little),
            },
        }
    }

    /// Parses a header at offset 0 of `region`.
    ///
    /// Fails with [`DecodeError::MalformedHeader`] when fewer than 4 bytes are
    /// available, or when a recognized header has a zero 24-bit size and its
    /// 32-bit extra size is cut off.
    pub fn parse<B: AsRef<[u8]>>(region: &BufferAccessor<B>) -> Result<Self> {
        let available = region.capacity();
        if available < SHORT_HEADER_SIZE {
            return Err(DecodeError::MalformedHeader {
                available,
                required: SHORT_HEADER_SIZE,
            });
        }

        let mut header = Self {
            kind: region.read_u8(0)?,
            size: region.read_uint24(1)?,
            extra_size: 0,
        };
        if !header.size.is_zero() {
            return Ok(header);
        }

        match region.read::<u32>(SHORT_HEADER_SIZE) {
            Ok(extra_size) => header.extra_size = extra_size,
            // A header that will never be expanded does not need its size.
            Err(_) if !header.is_recognized() => {}
            Err(_) => {
                return Err(DecodeError::MalformedHeader {
                    available,
                    required: LONG_HEADER_SIZE,
                });
            }
        }
        Ok(header)
    }

    /// Convenience over [`parse`](Self::parse) for a plain slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::parse(&BufferAccessor::new(bytes))
    }

    /// Raw type byte, parameter flags included.
    #[inline]
    pub const fn raw_type(&self) -> u8 {
        self.kind
    }

    /// The compression type named by the type byte, if it is a known one.
    pub const fn compression(&self) -> Option<CompressionType> {
        CompressionType::from_byte(self.kind)
    }

    /// Algorithm family from the upper nibble of the type byte.
    pub fn algorithm(&self) -> Option<CompressionAlgorithm> {
        CompressionAlgorithm::from_nibble(self.kind.upper4())
    }

    /// Algorithm-specific flags from the lower nibble of the type byte.
    pub fn parameters(&self) -> u8 {
        self.kind.lower4()
    }

    /// True only for compression types this crate can expand.
    pub const fn is_recognized(&self) -> bool {
        matches!(
            self.compression(),
            Some(CompressionType::Lz77 | CompressionType::ExtendedLz77)
        )
    }

    /// Decoded payload size in native order.
    pub fn decoded_size(&self) -> u32 {
        if self.size.is_zero() {
            self.extra_size.to_native(Endianness::Little)
        } else {
            self.size.to_native(Endianness::Little).value()
        }
    }

    #[inline]
    pub const fn header_size(&self) -> usize {
        if self.size.is_zero() {
            LONG_HEADER_SIZE
        } else {
            SHORT_HEADER_SIZE
        }
    }

    /// Wire encoding, 4 or 8 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.header_size());
        out.push(self.kind);
        out.extend_from_slice(&self.size.to_bytes());
        if self.size.is_zero() {
            // `extra_size` already holds the little-endian bit pattern.
            out.extend_from_slice(&self.extra_size.to_ne_bytes());
        }
        out
    }
}
