//! Decoded view over a resource file or buffer.
//!
//! A [`DecodedSource`] owns the original region and, when that region starts
//! with a recognized compression header, a buffer holding the expanded
//! payload. Decompression is best effort: any failure is logged and the
//! original bytes stay exposed so they can still be inspected.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};

use crate::accessor::BufferAccessor;
use crate::decompress::{check_expandable, expand, reserve_output};
use crate::error::SourceError;
use crate::header::CompressionHeader;
use crate::types::FileMagic;

#[cfg(feature = "mmap")]
use memmap2::Mmap;

/// Backing storage of the original bytes.
enum Region {
    #[cfg(feature = "mmap")]
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl AsRef<[u8]> for Region {
    fn as_ref(&self) -> &[u8] {
        match self {
            #[cfg(feature = "mmap")]
            Self::Mapped(map) => map,
            Self::Owned(bytes) => bytes,
        }
    }
}

impl Region {
    #[cfg(feature = "mmap")]
    #[allow(unsafe_code)]
    fn open(file: &File) -> std::io::Result<Self> {
        if file.metadata()?.len() == 0 {
            return Ok(Self::Owned(Vec::new()));
        }
        // The map is read-only and private to this source.
        let map = unsafe { Mmap::map(file)? };
        Ok(Self::Mapped(map))
    }

    #[cfg(not(feature = "mmap"))]
    fn open(mut file: &File) -> std::io::Result<Self> {
        use std::io::Read;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(Self::Owned(bytes))
    }
}

/// The bytes of one resource, expanded when they carry a recognized
/// compression header and exposed as they were read otherwise.
pub struct DecodedSource {
    path: Option<PathBuf>,
    original: Region,
    header: Option<CompressionHeader>,
    decompressed: Option<Vec<u8>>,
}

impl DecodedSource {
    /// Maps the file at `path` and expands it if it is compressed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let io_err = |source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let original = Region::open(&file).map_err(io_err)?;
        Ok(Self::with_region(original, Some(path.to_path_buf())))
    }

    /// Takes ownership of an in-memory region and expands it if it is compressed.
    pub fn from_bytes<B: Into<Vec<u8>>>(bytes: B) -> Self {
        Self::with_region(Region::Owned(bytes.into()), None)
    }

    fn with_region(original: Region, path: Option<PathBuf>) -> Self {
        let mut source = Self {
            path,
            original,
            header: None,
            decompressed: None,
        };
        source.decompress();
        trace!("Source tag: {:?}", source.tag());
        source
    }

    fn decompress(&mut self) {
        let original = self.original.as_ref();
        let header = match CompressionHeader::parse(&BufferAccessor::new(original)) {
            Ok(header) if header.is_recognized() => header,
            _ => return,
        };
        debug!(
            "Compression type: {:?}, size: {:#X}",
            header.compression(),
            header.decoded_size()
        );
        self.header = Some(header);

        if let Err(e) = check_expandable(&header, original) {
            warn!("Decompression failure: {e}");
            return;
        }

        let size = header.decoded_size() as usize;
        let mut output = Vec::new();
        if let Err(e) = reserve_output(&mut output, size) {
            warn!("Decompression failure: {e}");
            return;
        }
        output.resize(size, 0);

        match expand(&header, original, &mut output) {
            Ok(()) => self.decompressed = Some(output),
            Err(e) => warn!("Decompression failure: {e}"),
        }
    }

    /// The active region: decompressed bytes if expansion succeeded, the
    /// original bytes otherwise.
    pub fn source(&self) -> BufferAccessor<&[u8]> {
        BufferAccessor::new(self.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.decompressed {
            Some(bytes) => bytes,
            None => self.original.as_ref(),
        }
    }

    /// The region as it was read, compression header included.
    pub fn original(&self) -> BufferAccessor<&[u8]> {
        BufferAccessor::new(self.original.as_ref())
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn is_decompressed(&self) -> bool {
        self.decompressed.is_some()
    }

    /// Recognized compression header of the original region, kept even when
    /// expansion failed.
    pub fn compression_header(&self) -> Option<&CompressionHeader> {
        self.header.as_ref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// First four bytes of the active region, if there are four.
    pub fn magic(&self) -> Option<FileMagic> {
        self.source().try_read(0)
    }

    /// [`magic`](Self::magic) as a string; empty below four bytes.
    pub fn tag(&self) -> String {
        self.magic().map(|m| m.to_string()).unwrap_or_default()
    }
}

impl std::fmt::Debug for DecodedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedSource")
            .field("path", &self.path)
            .field("original_len", &self.original.as_ref().len())
            .field("header", &self.header)
            .field("decompressed", &self.decompressed.as_ref().map(Vec::len))
            .finish()
    }
}
