use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Access of {len} byte(s) at {position:#X} exceeds capacity {capacity:#X}")]
    OutOfRange {
        position: usize,
        len: usize,
        capacity: usize,
    },

    #[error("Compression header needs {required} bytes, only {available} available")]
    MalformedHeader { available: usize, required: usize },

    #[error("Unsupported compression type {0:#04X}")]
    UnsupportedAlgorithm(u8),

    #[error("Back-reference offset {offset} invalid at output position {position:#X}")]
    CorruptStream { position: usize, offset: usize },

    #[error("Compressed input ended at {position:#X}")]
    TruncatedInput { position: usize },

    #[error("Invalid byte order mark {0:#06X}")]
    InvalidByteOrderMark(u16),

    #[error("Cannot allocate {size:#X} bytes for the decoded payload")]
    AllocationFailed { size: usize },
}

/// Failure to acquire the backing region of a [`DecodedSource`](crate::DecodedSource).
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
