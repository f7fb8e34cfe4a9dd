//! # Wii Resource Decoding
//!
//! `resdecode` is the byte-level substrate for reading resource containers
//! from Wii-era games: endian-aware conversion of fixed-width integers
//! (including 24-bit ones), a bounds-checked typed view over byte regions,
//! detection of the 4/8-byte compression header, and expansion of LZ77 and
//! extended LZ77 payloads.
//!
//! ## Example
//!
//! ```rust
//! use resdecode::decompress;
//!
//! // Header: LZ77, 8 decoded bytes.
//! // Control 0x08: four literals, then a back-reference of length 4
//! // reaching 4 bytes behind the output position.
//! let compressed_data = [
//!     0x10, 0x08, 0x00, 0x00,
//!     0x08,
//!     b'R', b'A', b'R', b'C',
//!     0x10, 0x02,
//! ];
//!
//! let mut buffer = Vec::new();
//! decompress(&compressed_data, &mut buffer).expect("Decompression failed");
//! assert_eq!(buffer, b"RARCRARC");
//! ```
//!
//! Files are usually opened through [`DecodedSource`], which falls back to
//! the raw bytes whenever a payload is not compressed or cannot be expanded.

#![deny(unsafe_code)]

pub mod accessor;
pub mod bits;
pub mod decompress;
pub mod endian;
pub mod error;
pub mod header;
pub mod node;
pub mod source;
pub mod types;
pub mod uint24;

pub use accessor::{BufferAccessor, Structure};
pub use decompress::{decompress, expand};
pub use endian::{EndianConvert, Endianness};
pub use error::{DecodeError, SourceError};
pub use header::{CompressionAlgorithm, CompressionHeader, CompressionType};
pub use node::ResourceNode;
pub use source::DecodedSource;
pub use types::{BresHeader, ByteOrderMark, FileMagic};
pub use uint24::UInt24;
