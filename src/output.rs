//! Export formatting for address lists.
//!
//! A formatter turns an ordered address list plus a separator and caption
//! into a byte payload with a media type. Text, CSV and JSON live here;
//! PDF and DOCX are in [`crate::documents`]. File naming for single,
//! per-domain and archive exports is also defined here.

use std::fmt;
use std::str::FromStr;

use crate::documents::{DocxFormatter, PdfFormatter};
use crate::domains::key_file_stem;
use crate::errors::{MailsiftError, Result};

/// Base name used when the user leaves it blank.
pub const DEFAULT_BASENAME: &str = "extracted_emails";

/// Token placed between addresses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    Newline,
    Tab,
    Comma,
    Semicolon,
    Pipe,
    Space,
    Custom(String),
}

impl Separator {
    /// The literal text inserted between addresses.
    pub fn as_str(&self) -> &str {
        match self {
            Separator::Newline => "\n",
            Separator::Tab => "\t",
            Separator::Comma => ",",
            Separator::Semicolon => ";",
            Separator::Pipe => "|",
            Separator::Space => " ",
            Separator::Custom(s) => s,
        }
    }

    /// CSV only ever uses tab or comma.
    pub fn csv_delimiter(&self) -> &'static str {
        match self {
            Separator::Tab => "\t",
            _ => ",",
        }
    }

    pub fn is_newline(&self) -> bool {
        matches!(self, Separator::Newline)
    }
}

impl FromStr for Separator {
    type Err = MailsiftError;

    /// Accepts names (`newline`, `tab`, ...), escaped forms (`\n`, `\t`)
    /// and literal tokens. An empty token is rejected.
    fn from_str(s: &str) -> Result<Self> {
        let sep = match s {
            "" => {
                return Err(MailsiftError::configuration("separator must not be empty"));
            }
            "\\n" | "\n" | "newline" | "nl" => Separator::Newline,
            "\\t" | "\t" | "tab" => Separator::Tab,
            "," | "comma" => Separator::Comma,
            ";" | "semicolon" => Separator::Semicolon,
            "|" | "pipe" => Separator::Pipe,
            " " | "space" => Separator::Space,
            other => Separator::Custom(other.to_string()),
        };
        Ok(sep)
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Newline => f.write_str("newline"),
            Separator::Tab => f.write_str("tab"),
            Separator::Comma => f.write_str("comma"),
            Separator::Semicolon => f.write_str("semicolon"),
            Separator::Pipe => f.write_str("pipe"),
            Separator::Space => f.write_str("space"),
            Separator::Custom(s) => write!(f, "{s:?}"),
        }
    }
}

/// Requested export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    #[default]
    Text,
    Csv,
    Json,
    Pdf,
    Docx,
}

impl OutputKind {
    /// File extension including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputKind::Text => ".txt",
            OutputKind::Csv => ".csv",
            OutputKind::Json => ".json",
            OutputKind::Pdf => ".pdf",
            OutputKind::Docx => ".doc",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputKind::Text => "text",
            OutputKind::Csv => "csv",
            OutputKind::Json => "json",
            OutputKind::Pdf => "pdf",
            OutputKind::Docx => "docx",
        }
    }
}

impl FromStr for OutputKind {
    type Err = MailsiftError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match lower.as_str() {
            "txt" | "text" => Ok(OutputKind::Text),
            "csv" => Ok(OutputKind::Csv),
            "json" => Ok(OutputKind::Json),
            "pdf" => Ok(OutputKind::Pdf),
            "doc" | "docx" => Ok(OutputKind::Docx),
            _ => Err(MailsiftError::configuration(format!(
                "unsupported output extension '{s}' (expected .txt, .csv, .json, .pdf or .doc)"
            ))),
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Everything a formatter needs.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub addresses: &'a [String],
    pub separator: &'a Separator,
    /// Document title suffix (PDF/DOCX), usually the file stem.
    pub caption: &'a str,
}

/// Rendered bytes plus media type.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

/// Output formatter trait
pub trait ExportFormatter {
    /// Render the request into bytes.
    fn render(&self, request: &ExportRequest<'_>) -> Result<ExportPayload>;

    /// Get the MIME type for this format
    fn mime_type(&self) -> &'static str;

    /// Get the file extension for this format
    fn file_extension(&self) -> &'static str;
}

/// Plain join by the separator.
pub struct TextFormatter;

impl ExportFormatter for TextFormatter {
    fn render(&self, request: &ExportRequest<'_>) -> Result<ExportPayload> {
        Ok(ExportPayload {
            bytes: request.addresses.join(request.separator.as_str()).into_bytes(),
            mime_type: self.mime_type(),
        })
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }

    fn file_extension(&self) -> &'static str {
        ".txt"
    }
}

/// Single-row CSV: tab when the separator is tab, comma otherwise.
pub struct CsvFormatter;

impl ExportFormatter for CsvFormatter {
    fn render(&self, request: &ExportRequest<'_>) -> Result<ExportPayload> {
        let delim = request.separator.csv_delimiter();
        Ok(ExportPayload {
            bytes: request.addresses.join(delim).into_bytes(),
            mime_type: self.mime_type(),
        })
    }

    fn mime_type(&self) -> &'static str {
        "text/csv"
    }

    fn file_extension(&self) -> &'static str {
        ".csv"
    }
}

/// Pretty-printed JSON array of strings; the separator is ignored.
pub struct JsonFormatter;

impl ExportFormatter for JsonFormatter {
    fn render(&self, request: &ExportRequest<'_>) -> Result<ExportPayload> {
        let json = serde_json::to_string_pretty(request.addresses)?;
        Ok(ExportPayload {
            bytes: json.into_bytes(),
            mime_type: self.mime_type(),
        })
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn file_extension(&self) -> &'static str {
        ".json"
    }
}

/// Create a formatter for the requested kind.
pub fn create_formatter(kind: OutputKind) -> Box<dyn ExportFormatter> {
    match kind {
        OutputKind::Text => Box::new(TextFormatter),
        OutputKind::Csv => Box::new(CsvFormatter),
        OutputKind::Json => Box::new(JsonFormatter),
        OutputKind::Pdf => Box::new(PdfFormatter::default()),
        OutputKind::Docx => Box::new(DocxFormatter::default()),
    }
}

/// Render `addresses` with the formatter for `kind`.
pub fn render(
    kind: OutputKind,
    addresses: &[String],
    separator: &Separator,
    caption: &str,
) -> Result<ExportPayload> {
    let request = ExportRequest {
        addresses,
        separator,
        caption,
    };
    create_formatter(kind).render(&request)
}

/// Blank base names fall back to [`DEFAULT_BASENAME`].
pub fn effective_basename(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_BASENAME
    } else {
        trimmed
    }
}

/// `{base}{ext}`
pub fn single_file_name(base: &str, kind: OutputKind) -> String {
    format!("{}{}", effective_basename(base), kind.extension())
}

/// `{base}_{domain with dots as underscores}`
pub fn domain_file_stem(base: &str, domain: &str) -> String {
    format!("{}_{}", effective_basename(base), key_file_stem(domain))
}

/// `{base}_{domain with dots as underscores}{ext}`
pub fn domain_file_name(base: &str, domain: &str, kind: OutputKind) -> String {
    format!("{}{}", domain_file_stem(base, domain), kind.extension())
}

/// `{base}_domains.zip`
pub fn archive_file_name(base: &str) -> String {
    format!("{}_domains.zip", effective_basename(base))
}
