//! Text sources feeding an extraction batch.
//!
//! Each input implements the `TextSource` trait so the batch loop can
//! await one read at a time without caring where the text comes from:
//!   * `FileSource` reads a local file through tokio, enforcing a size cap
//!   * `InlineSource` wraps text already in memory (tests, library callers)
//!
//! Reading is the only suspension point of a batch. Non-UTF-8 bytes are
//! replaced rather than rejected, so any text-bearing file is readable.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::errors::{MailsiftError, Result};

/// A named input that can produce its full text.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Display name used in status messages (file name, label).
    fn name(&self) -> &str;

    /// Read the complete text of this source.
    async fn read_text(&self) -> Result<String>;
}

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    display: String,
    max_size: u64,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, max_size: u64) -> Self {
        let path = path.into();
        let display = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            path,
            display,
            max_size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TextSource for FileSource {
    fn name(&self) -> &str {
        &self.display
    }

    async fn read_text(&self) -> Result<String> {
        let path_str = self.path.to_string_lossy().into_owned();
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| MailsiftError::file_read(&path_str, e))?;
        if meta.len() > self.max_size {
            return Err(MailsiftError::file_too_large(
                path_str,
                meta.len(),
                self.max_size,
            ));
        }
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| MailsiftError::file_read(&path_str, e))?;
        Ok(match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

/// In-memory text with a label.
#[derive(Debug, Clone)]
pub struct InlineSource {
    name: String,
    text: String,
}

impl InlineSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl TextSource for InlineSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// Build file sources for a list of paths.
pub fn file_sources<P: AsRef<Path>>(paths: &[P], max_size: u64) -> Vec<Box<dyn TextSource>> {
    paths
        .iter()
        .map(|p| Box::new(FileSource::new(p.as_ref(), max_size)) as Box<dyn TextSource>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_file_text() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "hello a@example.com").unwrap();
        let src = FileSource::new(f.path(), 1024);
        assert_eq!(src.read_text().await.unwrap(), "hello a@example.com");
    }

    #[tokio::test]
    async fn lossy_decoding_of_invalid_utf8() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"x@example.com \xff\xfe y@example.org").unwrap();
        let text = FileSource::new(f.path(), 1024).read_text().await.unwrap();
        assert!(text.contains("x@example.com"));
        assert!(text.contains("y@example.org"));
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let src = FileSource::new("/definitely/not/here.txt", 1024);
        assert_eq!(src.name(), "here.txt");
        let err = src.read_text().await.unwrap_err();
        assert!(matches!(err, MailsiftError::FileRead { .. }));
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[b'a'; 64]).unwrap();
        let err = FileSource::new(f.path(), 16).read_text().await.unwrap_err();
        assert!(matches!(err, MailsiftError::FileTooLarge { size: 64, .. }));
    }

    #[tokio::test]
    async fn inline_source_round_trip() {
        let src = InlineSource::new("note", "b@example.com");
        assert_eq!(src.name(), "note");
        assert_eq!(src.read_text().await.unwrap(), "b@example.com");
    }
}
