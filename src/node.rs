use std::path::Path;

use crate::accessor::BufferAccessor;
use crate::error::SourceError;
use crate::source::DecodedSource;

/// Base resource node: a named owner of one decoded buffer.
///
/// Format-specific nodes build on the bytes exposed by [`data`](Self::data).
/// Dropping the node releases its source.
#[derive(Debug)]
pub struct ResourceNode {
    name: String,
    source: DecodedSource,
}

impl ResourceNode {
    /// Opens a file, naming the node after the file name.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            source: DecodedSource::from_path(path)?,
        })
    }

    pub fn from_bytes<S: Into<String>, B: Into<Vec<u8>>>(name: S, bytes: B) -> Self {
        Self {
            name: name.into(),
            source: DecodedSource::from_bytes(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> String {
        self.source.tag()
    }

    pub fn is_compressed(&self) -> bool {
        self.source.compression_header().is_some()
    }

    pub fn data(&self) -> BufferAccessor<&[u8]> {
        self.source.source()
    }

    pub fn source(&self) -> &DecodedSource {
        &self.source
    }
}
