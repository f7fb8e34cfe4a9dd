//! Bounds-checked positional access to a byte region.
//!
//! [`BufferAccessor`] wraps anything that derefs to bytes (a `Vec<u8>`, a
//! borrowed slice, a memory map) and reads or writes primitives and
//! [`Structure`] types at absolute positions. Every access that does not fit
//! inside the region fails with [`DecodeError::OutOfRange`]; nothing is
//! truncated, wrapped or read from adjacent memory.

use core::ops::Range;

use byteorder::{ByteOrder, NativeEndian};

use crate::endian::{EndianConvert, Endianness};
use crate::error::DecodeError;
use crate::uint24::UInt24;

type Result<T> = core::result::Result<T, DecodeError>;

/// A fixed-layout type with an explicit byte encoding.
///
/// Each implementor declares its own size and field order; nothing relies on
/// the in-memory layout of the Rust type.
pub trait Structure: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Decodes from exactly [`Self::SIZE`] bytes.
    ///
    /// Any other length fails with [`DecodeError::OutOfRange`].
    fn decode(bytes: &[u8]) -> Result<Self>;

    /// Encodes into exactly [`Self::SIZE`] bytes.
    ///
    /// Any other length fails with [`DecodeError::OutOfRange`] and leaves
    /// `bytes` untouched.
    fn encode(&self, bytes: &mut [u8]) -> Result<()>;
}

/// Fails unless a slice of `len` bytes holds exactly one encoded `T`.
#[inline]
pub fn check_size<T: Structure>(len: usize) -> Result<()> {
    if len == T::SIZE {
        Ok(())
    } else {
        Err(DecodeError::OutOfRange {
            position: 0,
            len: T::SIZE,
            capacity: len,
        })
    }
}

/// Copies `bytes` into an array of exactly `N` bytes.
fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| DecodeError::OutOfRange {
        position: 0,
        len: N,
        capacity: bytes.len(),
    })
}

/// Copies an encoded `T` into `bytes`, which must be exactly `T::SIZE` long.
fn store<T: Structure>(bytes: &mut [u8], encoded: &[u8]) -> Result<()> {
    check_size::<T>(bytes.len())?;
    bytes.copy_from_slice(encoded);
    Ok(())
}

impl Structure for u8 {
    const SIZE: usize = 1;

    fn decode(bytes: &[u8]) -> Result<Self> {
        let [b] = fixed::<1>(bytes)?;
        Ok(b)
    }

    fn encode(&self, bytes: &mut [u8]) -> Result<()> {
        store::<Self>(bytes, &[*self])
    }
}

impl Structure for i8 {
    const SIZE: usize = 1;

    fn decode(bytes: &[u8]) -> Result<Self> {
        let [b] = fixed::<1>(bytes)?;
        Ok(b as i8)
    }

    fn encode(&self, bytes: &mut [u8]) -> Result<()> {
        store::<Self>(bytes, &[*self as u8])
    }
}

// Primitives are stored as raw native bit patterns; callers that know the
// stored order go through the endian-aware accessors instead.
macro_rules! impl_primitive_structure {
    ($($t:ty => $read:ident, $write:ident);* $(;)?) => {
        $(
            impl Structure for $t {
                const SIZE: usize = core::mem::size_of::<$t>();

                #[inline]
                fn decode(bytes: &[u8]) -> Result<Self> {
                    check_size::<Self>(bytes.len())?;
                    Ok(NativeEndian::$read(bytes))
                }

                #[inline]
                fn encode(&self, bytes: &mut [u8]) -> Result<()> {
                    check_size::<Self>(bytes.len())?;
                    NativeEndian::$write(bytes, *self);
                    Ok(())
                }
            }
        )*
    };
}

impl_primitive_structure! {
    u16 => read_u16, write_u16;
    i16 => read_i16, write_i16;
    u32 => read_u32, write_u32;
    i32 => read_i32, write_i32;
    u64 => read_u64, write_u64;
    i64 => read_i64, write_i64;
}

impl Structure for UInt24 {
    const SIZE: usize = 3;

    fn decode(bytes: &[u8]) -> Result<Self> {
        fixed::<3>(bytes).map(Self::from_bytes)
    }

    fn encode(&self, bytes: &mut [u8]) -> Result<()> {
        store::<Self>(bytes, &self.to_bytes())
    }
}

/// Positional, bounds-checked view over a byte region.
#[derive(Debug, Clone, Default)]
pub struct BufferAccessor<B> {
    buf: B,
}

impl<B> BufferAccessor<B> {
    pub const fn new(buf: B) -> Self {
        Self { buf }
    }

    pub fn get_ref(&self) -> &B {
        &self.buf
    }

    pub fn into_inner(self) -> B {
        self.buf
    }
}

macro_rules! endian_reads {
    ($($name:ident -> $t:ty;)*) => {
        $(
            #[doc = concat!("Reads a `", stringify!($t), "` stored in `order` and returns it in native order.")]
            #[inline]
            pub fn $name(&self, position: usize, order: Endianness) -> Result<$t> {
                Ok(self.read::<$t>(position)?.to_native(order))
            }
        )*
    };
}

macro_rules! endian_writes {
    ($($name:ident <- $t:ty;)*) => {
        $(
            #[doc = concat!("Stores a native `", stringify!($t), "` laid out in `order`.")]
            #[inline]
            pub fn $name(&mut self, position: usize, value: $t, order: Endianness) -> Result<()> {
                self.write(position, &value.from_native(order))
            }
        )*
    };
}

impl<B: AsRef<[u8]>> BufferAccessor<B> {
    /// Size of the region in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.as_ref().len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_ref()
    }

    /// Validates `position..position + len` against the region.
    pub fn check(&self, position: usize, len: usize) -> Result<Range<usize>> {
        let capacity = self.capacity();
        match position.checked_add(len) {
            Some(end) if end <= capacity => Ok(position..end),
            _ => Err(DecodeError::OutOfRange {
                position,
                len,
                capacity,
            }),
        }
    }

    #[inline]
    pub fn read_u8(&self, position: usize) -> Result<u8> {
        let range = self.check(position, 1)?;
        Ok(self.buf.as_ref()[range.start])
    }

    pub fn read_bytes(&self, position: usize, len: usize) -> Result<&[u8]> {
        let range = self.check(position, len)?;
        Ok(&self.buf.as_ref()[range])
    }

    /// Decodes a `T` starting at `position`.
    pub fn read<T: Structure>(&self, position: usize) -> Result<T> {
        T::decode(self.read_bytes(position, T::SIZE)?)
    }

    /// Probe form of [`read`](Self::read): `None` instead of an error.
    pub fn try_read<T: Structure>(&self, position: usize) -> Option<T> {
        self.read(position).ok()
    }

    endian_reads! {
        read_u16 -> u16;
        read_i16 -> i16;
        read_u32 -> u32;
        read_i32 -> i32;
        read_u64 -> u64;
        read_i64 -> i64;
    }

    /// Reads the raw bytes at `position`, `position + 1`, `position + 2`.
    pub fn read_uint24(&self, position: usize) -> Result<UInt24> {
        // Check the full span first so a short tail reports the whole access.
        self.check(position, 3)?;
        Ok(UInt24::new(
            self.read_u8(position)?,
            self.read_u8(position + 1)?,
            self.read_u8(position + 2)?,
        ))
    }

    /// Reads a 24-bit value stored in `order` and converts it to native order.
    pub fn read_uint24_from(&self, position: usize, order: Endianness) -> Result<UInt24> {
        Ok(self.read_uint24(position)?.to_native(order))
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> BufferAccessor<B> {
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.buf.as_mut()
    }

    pub fn write_u8(&mut self, position: usize, value: u8) -> Result<()> {
        let range = self.check(position, 1)?;
        self.buf.as_mut()[range.start] = value;
        Ok(())
    }

    pub fn write_bytes(&mut self, position: usize, bytes: &[u8]) -> Result<()> {
        let range = self.check(position, bytes.len())?;
        self.buf.as_mut()[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Encodes `value` starting at `position`.
    pub fn write<T: Structure>(&mut self, position: usize, value: &T) -> Result<()> {
        let range = self.check(position, T::SIZE)?;
        value.encode(&mut self.buf.as_mut()[range])
    }

    endian_writes! {
        write_u16 <- u16;
        write_i16 <- i16;
        write_u32 <- u32;
        write_i32 <- i32;
        write_u64 <- u64;
        write_i64 <- i64;
    }

    pub fn write_uint24(&mut self, position: usize, value: UInt24) -> Result<()> {
        self.check(position, 3)?;
        let [b0, b1, b2] = value.to_bytes();
        self.write_u8(position, b0)?;
        self.write_u8(position + 1, b1)?;
        self.write_u8(position + 2, b2)
    }

    /// Stores a native 24-bit value laid out in `order`.
    pub fn write_uint24_as(
        &mut self,
        position: usize,
        value: UInt24,
        order: Endianness,
    ) -> Result<()> {
        self.write_uint24(position, value.from_native(order))
    }
}
