//! Configuration management for mailsift.
//!
//! Settings come from three layers: built-in defaults, `MAILSIFT_*`
//! environment variables, then command-line flags (highest precedence).
//! Values are kept as raw strings where the user supplies them and are
//! resolved to typed values (`Separator`, `OutputKind`) by `validate` and
//! the accessor helpers.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::output::{DEFAULT_BASENAME, OutputKind, Separator};
use crate::status::DEFAULT_SUCCESS_DISMISS;

/// Default cap on a single input file.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Main configuration structure.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Input reading settings
    pub extraction: ExtractionConfig,

    /// Export naming and format
    pub export: ExportConfig,

    /// Status message behaviour
    pub status: StatusConfig,
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Maximum file size to process (in bytes)
    pub max_file_size: u64,
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Base name for exported files
    pub basename: String,

    /// Separator token as given by the user
    pub separator: String,

    /// Export extension as given by the user
    pub extension: String,

    /// Directory that receives exports
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct StatusConfig {
    /// How long `success` messages stay visible
    pub success_dismiss: Duration,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            basename: DEFAULT_BASENAME.to_string(),
            separator: "\\n".to_string(),
            extension: ".txt".to_string(),
            out_dir: PathBuf::from("."),
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            success_dismiss: DEFAULT_SUCCESS_DISMISS,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base) = std::env::var("MAILSIFT_BASENAME") {
            config.export.basename = base;
        }

        if let Ok(sep) = std::env::var("MAILSIFT_SEPARATOR") {
            config.export.separator = sep;
        }

        if let Ok(ext) = std::env::var("MAILSIFT_EXTENSION") {
            config.export.extension = ext;
        }

        if let Ok(dir) = std::env::var("MAILSIFT_OUT_DIR") {
            config.export.out_dir = PathBuf::from(dir);
        }

        if let Ok(size) = std::env::var("MAILSIFT_MAX_FILE_SIZE")
            && let Ok(bytes) = size.parse::<u64>()
        {
            config.extraction.max_file_size = bytes;
        }

        if let Ok(ms) = std::env::var("MAILSIFT_SUCCESS_DISMISS_MS")
            && let Ok(ms) = ms.parse::<u64>()
        {
            config.status.success_dismiss = Duration::from_millis(ms);
        }

        config
    }

    /// Merge with CLI arguments, giving CLI precedence
    pub fn merge_with_cli(&mut self, cli: &crate::cli::Cli) {
        if let Some(ref sep) = cli.separator {
            self.export.separator = sep.clone();
        }
        if let Some(ref ext) = cli.extension {
            self.export.extension = ext.clone();
        }
        if let Some(ref base) = cli.output {
            self.export.basename = base.clone();
        }
        if let Some(ref dir) = cli.out_dir {
            self.export.out_dir = dir.clone();
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extraction.max_file_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "extraction.max_file_size".to_string(),
                value: "0".to_string(),
                reason: "Max file size must be greater than 0".to_string(),
            });
        }

        if self.export.separator.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "export.separator".to_string(),
            });
        }

        self.output_kind()?;

        if self.export.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "export.out_dir".to_string(),
            });
        }

        Ok(())
    }

    /// Resolved separator.
    pub fn separator(&self) -> Result<Separator, ConfigError> {
        self.export
            .separator
            .parse()
            .map_err(|_| ConfigError::MissingRequired {
                field: "export.separator".to_string(),
            })
    }

    /// Resolved export format.
    pub fn output_kind(&self) -> Result<OutputKind, ConfigError> {
        self.export
            .extension
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: "export.extension".to_string(),
                value: self.export.extension.clone(),
                reason: "expected one of .txt, .csv, .json, .pdf, .doc".to_string(),
            })
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Missing required configuration
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },
}
