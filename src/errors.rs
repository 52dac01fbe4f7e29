//! Unified error handling.
//!
//! A `thiserror`-based model with:
//!   * Typed variants for the failure domains of an extraction run
//!   * A categorization layer (`ErrorCategory`) for reporting
//!   * Helper constructors
//!   * `From` conversions for the lower-level errors we wrap
//!
//! None of these errors are fatal for a batch: the session and the app
//! layer catch them where they occur and turn them into status messages.
//! Only configuration problems abort the binary.
//!
//! Usage:
//!   use mailsift::errors::{Result, MailsiftError, ErrorCategory};
//!
//!   fn do_something() -> Result<()> {
//!       Err(MailsiftError::Configuration { message: "invalid separator".into() })
//!   }
//!
//! Categories:
//!   - Input: user / data problems (unreadable file, unknown domain)
//!   - Io: filesystem and stream failures outside a single input file
//!   - Export: formatting, document generation, archiving
//!   - Internal: logic bugs or unexpected states

use std::io;

use thiserror::Error;

/// High-level classification for structured reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Io,
    Export,
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCategory::Input => "input",
            ErrorCategory::Io => "io",
            ErrorCategory::Export => "export",
            ErrorCategory::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Primary application error type.
#[derive(Error, Debug)]
pub enum MailsiftError {
    // ------------------------ Input / Validation ----------------------------
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path} is {size} bytes, above the {limit} byte limit")]
    FileTooLarge { path: String, size: u64, limit: u64 },

    #[error("No addresses grouped under domain '{domain}'")]
    UnknownDomain { domain: String },

    #[error("Nothing to export: {what}")]
    NothingToExport { what: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ----------------------------- Export -----------------------------------
    #[error("Failed to build {format} document: {reason}")]
    Document { format: String, reason: String },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ----------------------------- I/O / FS ---------------------------------
    #[error("I/O error during {operation} on {path}: {source}")]
    Io {
        path: String,
        operation: String,
        #[source]
        source: io::Error,
    },

    // ---------------------------- Internal ----------------------------------
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MailsiftError {
    /// Categorize the error for structured output.
    pub fn category(&self) -> ErrorCategory {
        use MailsiftError::*;
        match self {
            FileRead { .. }
            | FileTooLarge { .. }
            | UnknownDomain { .. }
            | NothingToExport { .. }
            | Configuration { .. } => ErrorCategory::Input,

            Document { .. } | Archive(_) | Serialization(_) => ErrorCategory::Export,

            Io { .. } => ErrorCategory::Io,

            Internal { .. } => ErrorCategory::Internal,
        }
    }

    // ---------------------------- Constructors -----------------------------

    pub fn file_read(path: impl Into<String>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    pub fn file_too_large(path: impl Into<String>, size: u64, limit: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            size,
            limit,
        }
    }

    pub fn unknown_domain(domain: impl Into<String>) -> Self {
        Self::UnknownDomain {
            domain: domain.into(),
        }
    }

    pub fn nothing_to_export(what: impl Into<String>) -> Self {
        Self::NothingToExport { what: what.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn document(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Document {
            format: format.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<String>, operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal_with(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Public result alias.
pub type Result<T> = std::result::Result<T, MailsiftError>;

/// Map standard IO errors into `Io` variant (generic context).
impl From<io::Error> for MailsiftError {
    fn from(e: io::Error) -> Self {
        MailsiftError::Io {
            path: "<unknown>".into(),
            operation: "unspecified".into(),
            source: e,
        }
    }
}

/// Extension trait for enriching IO results with path + operation context.
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<String>, operation: impl Into<String>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, io::Error> {
    fn with_path(self, path: impl Into<String>, operation: impl Into<String>) -> Result<T> {
        self.map_err(|e| MailsiftError::io(path.into(), operation.into(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_mapping() {
        assert_eq!(
            MailsiftError::unknown_domain("x.com").category(),
            ErrorCategory::Input
        );
        assert_eq!(
            MailsiftError::document("pdf", "bad font").category(),
            ErrorCategory::Export
        );
        assert_eq!(
            MailsiftError::internal("boom").category(),
            ErrorCategory::Internal
        );
        let io_err = MailsiftError::from(io::Error::other("disk"));
        assert_eq!(io_err.category(), ErrorCategory::Io);
    }

    #[test]
    fn display_snippets() {
        let e = MailsiftError::file_too_large("big.txt", 10, 5);
        let s = e.to_string();
        assert!(s.contains("big.txt"));
        assert!(s.contains("10 bytes"));
        let i = MailsiftError::internal("boom");
        assert!(i.to_string().contains("Internal error"));
    }

    #[test]
    fn io_context() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let mapped = res.with_path("/tmp/out.zip", "write");
        match mapped.err().unwrap() {
            MailsiftError::Io {
                path, operation, ..
            } => {
                assert_eq!(path, "/tmp/out.zip");
                assert_eq!(operation, "write");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
