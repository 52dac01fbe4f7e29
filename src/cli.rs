use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// How the run report is printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable summary (styled unless --plain / --no-color)
    #[default]
    Text,
    /// Structured JSON report
    Json,
    /// Structured YAML report
    Yaml,
}

/// Command-line interface definition.
/// Extracts, deduplicates and groups email addresses found in text files.
///
/// Verbosity levels:
/// 0 - silent (only final output)
/// 1 - errors
/// 2 - all status messages (default)
/// 5 - debug diagnostics
/// 6 - trace diagnostics
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Extract, deduplicate and group email addresses from text files"
)]
pub struct Cli {
    /// Input files to scan. Required unless --generate-schema is given.
    #[arg(value_name = "FILES", required_unless_present = "generate_schema")]
    pub files: Vec<PathBuf>,

    /// Separator between addresses: newline, tab, comma, semicolon, pipe, space or any literal
    #[arg(long, short = 's', value_name = "SEP")]
    pub separator: Option<String>,

    /// Export file extension: .txt, .csv, .json, .pdf or .doc
    #[arg(long, short = 'e', value_name = "EXT")]
    pub extension: Option<String>,

    /// Base name for exported files (blank means "extracted_emails")
    #[arg(long, short = 'o', value_name = "NAME")]
    pub output: Option<String>,

    /// Directory exports are written to
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Narrow domain groups to keys containing TEXT (repeatable, applied in order)
    #[arg(long, short = 'f', value_name = "TEXT")]
    pub filter: Vec<String>,

    /// Write the full address list to {base}{ext}
    #[arg(long, short = 'd')]
    pub download: bool,

    /// Write one domain group to {base}_{domain}{ext} (repeatable)
    #[arg(long = "domain", value_name = "KEY")]
    pub domains: Vec<String>,

    /// Print one domain group joined by the separator (repeatable)
    #[arg(long = "copy-domain", value_name = "KEY")]
    pub copy_domains: Vec<String>,

    /// Write every domain group into {base}_domains.zip
    #[arg(long)]
    pub export_domains: bool,

    /// Report format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the JSON Schema of the structured report and exit
    #[arg(long)]
    pub generate_schema: bool,

    /// Print only the joined address list
    #[arg(long)]
    pub plain: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (0,1,2,5,6)
    #[arg(long, short = 'v', default_value_t = 2)]
    pub verbose: u8,
}

impl Cli {
    /// Parse CLI arguments from process args.
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
    }

    /// Structured (JSON/YAML) report requested?
    pub fn is_structured(&self) -> bool {
        matches!(self.format, OutputFormat::Json | OutputFormat::Yaml)
    }

    /// Any file export requested?
    pub fn wants_export(&self) -> bool {
        self.download || self.export_domains || !self.domains.is_empty()
    }

    /// Are error-level messages enabled?
    pub fn error_enabled(&self) -> bool {
        self.verbose >= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_command_line() {
        let cli = Cli::try_parse_from([
            "mailsift",
            "a.txt",
            "b.log",
            "--separator",
            "tab",
            "--extension",
            ".csv",
            "--filter",
            "example",
            "--filter",
            ".com",
            "--domain",
            "example.com",
            "--copy-domain",
            "test.net",
            "--copy-domain",
            "example.com",
            "--export-domains",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.separator.as_deref(), Some("tab"));
        assert_eq!(cli.filter, vec!["example", ".com"]);
        assert_eq!(cli.domains, vec!["example.com"]);
        assert_eq!(cli.copy_domains, vec!["test.net", "example.com"]);
        assert!(cli.is_structured());
        assert!(cli.wants_export());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn files_required_without_schema() {
        assert!(Cli::try_parse_from(["mailsift"]).is_err());
        let cli = Cli::try_parse_from(["mailsift", "--generate-schema"]).unwrap();
        assert!(cli.files.is_empty());
    }

    #[test]
    fn verbosity_helpers() {
        let cli = Cli::try_parse_from(["mailsift", "x.txt", "--verbose", "1"]).unwrap();
        assert!(cli.error_enabled());
        let quiet = Cli::try_parse_from(["mailsift", "x.txt", "--verbose", "0"]).unwrap();
        assert!(!quiet.error_enabled());
    }
}
