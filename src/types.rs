//! Common fixed-layout structures shared by Wii resource containers.

use core::fmt;

use crate::accessor::{BufferAccessor, Structure, check_size};
use crate::endian::Endianness;
use crate::error::DecodeError;

type Result<T> = core::result::Result<T, DecodeError>;

/// A 4-byte tag identifying a structure, such as `bres`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FileMagic([u8; 4]);

impl FileMagic {
    /// Builds a tag from the first four bytes of `tag`, padding with NULs.
    pub fn new(tag: &str) -> Self {
        let mut bytes = [0u8; 4];
        for (dst, src) in bytes.iter_mut().zip(tag.bytes()) {
            *dst = src;
        }
        Self(bytes)
    }

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }

    /// Each byte as a Latin-1 character.
    pub fn as_string(&self) -> String {
        self.0.iter().map(|&b| char::from(b)).collect()
    }
}

impl fmt::Display for FileMagic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for FileMagic {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl Structure for FileMagic {
    const SIZE: usize = 4;

    fn decode(bytes: &[u8]) -> Result<Self> {
        check_size::<Self>(bytes.len())?;
        let mut tag = [0u8; 4];
        tag.copy_from_slice(bytes);
        Ok(Self(tag))
    }

    fn encode(&self, bytes: &mut [u8]) -> Result<()> {
        check_size::<Self>(bytes.len())?;
        bytes.copy_from_slice(&self.0);
        Ok(())
    }
}

/// Byte order mark used by BRES and NW4R structures.
///
/// Holds the raw bytes; [`endianness`](Self::endianness) validates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteOrderMark([u8; 2]);

impl ByteOrderMark {
    pub const fn new(order: Endianness) -> Self {
        Self(order.bom().to_be_bytes())
    }

    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; 2] {
        self.0
    }

    /// `FE FF` is big-endian, `FF FE` little-endian, anything else an error.
    pub const fn endianness(&self) -> Result<Endianness> {
        Endianness::from_bom(u16::from_be_bytes(self.0))
    }
}

impl From<Endianness> for ByteOrderMark {
    fn from(order: Endianness) -> Self {
        Self::new(order)
    }
}

impl Structure for ByteOrderMark {
    const SIZE: usize = 2;

    fn decode(bytes: &[u8]) -> Result<Self> {
        check_size::<Self>(bytes.len())?;
        let mut mark = [0u8; 2];
        mark.copy_from_slice(bytes);
        Ok(Self(mark))
    }

    fn encode(&self, bytes: &mut [u8]) -> Result<()> {
        check_size::<Self>(bytes.len())?;
        bytes.copy_from_slice(&self.0);
        Ok(())
    }
}

/// Header of a BRES resource container.
///
/// ```text
/// 0x00  tag        "bres"
/// 0x04  bom        byte order of every following field
/// 0x06  padding    u16, always 0
/// 0x08  length     u32, size of the whole file
/// 0x0C  offset     u16, offset of the root section
/// 0x0E  sections   u16, section count including root
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BresHeader {
    pub tag: FileMagic,
    pub bom: ByteOrderMark,
    pub padding: u16,
    pub length: u32,
    pub root_offset: u16,
    pub sections: u16,
}

impl BresHeader {
    pub const TAG: &'static str = "bres";

    pub fn endianness(&self) -> Result<Endianness> {
        self.bom.endianness()
    }
}

impl Structure for BresHeader {
    const SIZE: usize = 0x10;

    fn decode(bytes: &[u8]) -> Result<Self> {
        check_size::<Self>(bytes.len())?;
        let view = BufferAccessor::new(bytes);
        let bom: ByteOrderMark = view.read(0x04)?;
        let order = bom.endianness()?;
        Ok(Self {
            tag: view.read(0x00)?,
            bom,
            padding: view.read_u16(0x06, order)?,
            length: view.read_u32(0x08, order)?,
            root_offset: view.read_u16(0x0C, order)?,
            sections: view.read_u16(0x0E, order)?,
        })
    }

    fn encode(&self, bytes: &mut [u8]) -> Result<()> {
        check_size::<Self>(bytes.len())?;
        // A header with an invalid mark keeps its numeric fields in native order.
        let order = self.bom.endianness().unwrap_or(Endianness::NATIVE);
        let mut view = BufferAccessor::new(bytes);
        view.write(0x00, &self.tag)?;
        view.write(0x04, &self.bom)?;
        view.write_u16(0x06, self.padding, order)?;
        view.write_u32(0x08, self.length, order)?;
        view.write_u16(0x0C, self.root_offset, order)?;
        view.write_u16(0x0E, self.sections, order)
    }
}
