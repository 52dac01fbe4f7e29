//! High-level application orchestration layer.
//!
//! This module provides the CLI-facing `App` façade. It resolves the
//! configuration, runs one extraction batch over the input files, narrows
//! the domain groups, performs the requested exports and renders either
//! structured (JSON/YAML) or human-oriented output (styled / plain).
//!
//! Major steps in `App::run`:
//!   1. Schema generation early-exit
//!   2. Config load / validation
//!   3. Sequential batch over the input files
//!   4. Domain filters, in the order given
//!   5. Exports (flat list, single domains, archive)
//!   6. Structured output or styled/plain rendering
//!   7. Per-domain copies (`--copy-domain`, text mode only)
//!   8. Status messages on stderr
//!
//! Recoverable problems (unreadable files, empty filters, failed exports)
//! become status messages and the run still exits 0. Only configuration
//! errors produce a non-zero exit code.

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::errors::{MailsiftError, Result};
use crate::export::Exporter;
use crate::session::ExtractionSession;
use crate::sources::file_sources;
use crate::status::{StatusLog, StatusReporter};
use crate::structured_output::ExtractionReport;
use crate::styled_output::StyledFormatter;

/// Exit code for configuration and usage errors.
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Application façade.
pub struct App;

impl App {
    /// Execute the end-to-end extraction workflow.
    ///
    /// Returns: intended process exit code (0 = success, 2 = configuration error).
    pub async fn run(cli: &Cli) -> Result<i32> {
        if Self::maybe_print_schema(cli)? {
            return Ok(0);
        }
        let Some(config) = Self::load_config(cli) else {
            return Ok(EXIT_CONFIG_ERROR);
        };
        let (separator, kind) = match (config.separator(), config.output_kind()) {
            (Ok(sep), Ok(kind)) => (sep, kind),
            (Err(e), _) | (_, Err(e)) => {
                Self::print_config_error(cli, &e);
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let sources = file_sources(&cli.files, config.extraction.max_file_size);
        let mut session = ExtractionSession::with_success_ttl(config.status.success_dismiss)
            .run_batch(&sources)
            .await;

        for filter in &cli.filter {
            session.apply_filter(filter);
        }

        let exporter = Exporter::new(
            config.export.out_dir.clone(),
            &config.export.basename,
            kind,
            separator,
        );
        debug!(
            basename = exporter.basename(),
            kind = exporter.kind().name(),
            separator = %exporter.separator(),
            "export settings resolved"
        );
        let written = Self::run_exports(cli, &exporter, &mut session, &config);

        if cli.is_structured() {
            if !cli.copy_domains.is_empty() {
                debug!("--copy-domain ignored for structured output");
            }
            Self::render_structured(cli, &session, &written)?;
        } else {
            Self::render_human(cli, &exporter, &mut session, &written);
        }

        Self::report_status(cli, &session);
        Ok(0)
    }
}

/// Helper: exports
impl App {
    fn run_exports(
        cli: &Cli,
        exporter: &Exporter,
        session: &mut ExtractionSession,
        config: &Config,
    ) -> Vec<PathBuf> {
        let mut written = Vec::new();
        if !cli.wants_export() {
            return written;
        }
        let mut status = StatusLog::with_success_ttl(config.status.success_dismiss);

        if cli.download {
            written.extend(exporter.export_all_reported(session.addresses(), &mut status));
        }
        for key in &cli.domains {
            written.extend(exporter.export_domain_reported(session.domains(), key, &mut status));
        }
        if cli.export_domains {
            written.extend(exporter.export_archive_reported(session.domains(), &mut status));
        }

        session.status_mut().extend(status);
        written
    }
}

/// Helper: rendering
impl App {
    fn render_human(
        cli: &Cli,
        exporter: &Exporter,
        session: &mut ExtractionSession,
        written: &[PathBuf],
    ) {
        if cli.plain {
            if !session.addresses().is_empty() {
                let joined = session.addresses().join(exporter.separator().as_str());
                if let Err(e) = Self::write_stdout(&joined) {
                    debug!(error = %e, "stdout write failed");
                    session
                        .status_mut()
                        .error("Failed to write emails to stdout");
                }
            }
        } else {
            let formatter = if cli.no_color {
                StyledFormatter::without_colors()
            } else {
                StyledFormatter::new()
            };
            if let Err(e) = formatter.print_session(session, written) {
                debug!(error = %e, "summary write failed");
                session
                    .status_mut()
                    .error("Failed to write summary to stdout");
            }
        }

        let separator = exporter.separator().as_str();
        for key in &cli.copy_domains {
            session.copy_domain(key, separator, &mut io::stdout().lock());
        }
    }

    fn render_structured(cli: &Cli, session: &ExtractionSession, written: &[PathBuf]) -> Result<()> {
        let report = ExtractionReport::from_session(session, &cli.files, &cli.filter, written);
        let rendered = match cli.output_format() {
            OutputFormat::Yaml => report.to_yaml(),
            _ => report.to_json(),
        }
        .map_err(|e| MailsiftError::internal_with("Report serialization failed", e))?;
        Self::write_stdout(&rendered)
            .map_err(|e| MailsiftError::io("<stdout>", "write report", e))
    }

    fn write_stdout(text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{text}")?;
        out.flush()
    }

    fn report_status(cli: &Cli, session: &ExtractionSession) {
        let use_colors =
            !cli.no_color && atty::is(atty::Stream::Stderr) && std::env::var("NO_COLOR").is_err();
        StatusReporter::new(cli.verbose, use_colors).report_all(session.status());
    }
}

/// Helper: schema generation early-exit and configuration
impl App {
    fn maybe_print_schema(cli: &Cli) -> Result<bool> {
        if cli.generate_schema {
            match ExtractionReport::generate_json_schema() {
                Ok(schema) => {
                    println!("{schema}");
                }
                Err(e) => {
                    eprintln!("Error generating JSON schema: {e}");
                }
            }
            return Ok(true);
        }
        Ok(false)
    }

    fn load_config(cli: &Cli) -> Option<Config> {
        let mut config = Config::from_env();
        config.merge_with_cli(cli);
        if let Err(e) = config.validate() {
            Self::print_config_error(cli, &e);
            return None;
        }
        Some(config)
    }

    fn print_config_error(cli: &Cli, e: &dyn std::fmt::Display) {
        if cli.error_enabled() {
            eprintln!("Configuration error: {e}");
        }
    }
}
