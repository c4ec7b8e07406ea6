use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::{InterpretError, Result};

/// Largest file the loader accepts: 20 MB.
pub const MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;

/// A user-selected file whose size is known before it is read.
pub trait FileSource {
    fn name(&self) -> &str;

    /// Declared size in bytes.
    fn size(&self) -> u64;

    /// Read the whole file. The only operation allowed to suspend.
    fn read(self) -> impl Future<Output = io::Result<Vec<u8>>> + Send;
}

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    size: u64,
}

impl LocalFile {
    /// Stat `path` without reading it.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(InterpretError::FileReadFailure)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path,
            name,
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileSource for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    async fn read(self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// Bytes already in memory, e.g. handed over by an upload widget.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    bytes: Vec<u8>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl FileSource for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    async fn read(self) -> io::Result<Vec<u8>> {
        Ok(self.bytes)
    }
}

/// Reads size-bounded files into text. Knows nothing about XML.
#[derive(Debug, Clone, Copy)]
pub struct XmlLoader {
    max_size: u64,
}

impl Default for XmlLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlLoader {
    pub const fn new() -> Self {
        Self::with_limit(MAX_FILE_SIZE)
    }

    pub const fn with_limit(max_size: u64) -> Self {
        Self { max_size }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Fails with [`InterpretError::FileTooLarge`] when `size` exceeds the limit.
    pub fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_size {
            return Err(InterpretError::FileTooLarge {
                size,
                limit: self.max_size,
            });
        }
        Ok(())
    }

    /// Check the declared size, then read and decode the file.
    ///
    /// An oversized file is rejected before `read` is ever called.
    pub async fn load<S: FileSource>(&self, source: S) -> Result<String> {
        let size = source.size();
        if let Err(e) = self.check_size(size) {
            tracing::warn!(file = source.name(), size, limit = self.max_size, "rejected oversized file");
            return Err(e);
        }

        tracing::debug!(file = source.name(), size, "reading file");
        let bytes = source.read().await.map_err(InterpretError::FileReadFailure)?;
        // The file may have grown between stat and read.
        self.check_size(bytes.len() as u64)?;
        Ok(decode_text(&bytes))
    }
}

/// Decode bytes as UTF-8 (invalid sequences replaced), dropping a leading
/// byte-order mark and leading whitespace.
pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&*text);
    text.trim_start().to_string()
}
