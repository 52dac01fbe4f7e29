//! Mailsift Library
//!
//! A Rust library for pulling email addresses out of arbitrary text files.
//! This library provides functionality to:
//!
//! - Find address candidates with a permissive RFC 5322-style pattern
//! - Canonicalize, validate and deduplicate them in first-occurrence order
//! - Group addresses by a two-label domain key and narrow the groups
//! - Export lists as text, CSV, JSON, PDF or DOCX, or per domain in a zip
//!
//! # Example
//!
//! ```rust
//! use mailsift::facade::EmailExtractor;
//!
//! let session = EmailExtractor::extract_text("Write to Ops@Example.com or ops@example.com");
//! assert_eq!(session.addresses().to_strings(), vec!["ops@example.com"]);
//! assert!(session.domains().get("example.com").is_some());
//! ```

// Re-export all modules for library use
pub mod app;
pub mod archive;
pub mod cli;
pub mod config;
pub mod documents;
pub mod domains;
pub mod emails;
pub mod errors;
pub mod export;
pub mod facade;
pub mod output;
pub mod pattern;
pub mod session;
pub mod sources;
pub mod status;
pub mod structured_output;
pub mod styled_output;
pub mod validate;

// Re-export commonly used types and functions for convenience
pub use domains::{DomainIndex, FilterOutcome, domain_key};
pub use emails::{AddressSet, EmailAddress, canonicalize};
pub use errors::{MailsiftError, Result};
pub use facade::{EmailExtractor, ExportOptions, ExtractOptions};
pub use output::{OutputKind, Separator, create_formatter};
pub use session::ExtractionSession;
pub use styled_output::StyledFormatter;
pub use validate::is_valid_email;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
