use std::path::{Path, PathBuf};

use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::domains::FilterOutcome;
use crate::errors::Result;
use crate::export::Exporter;
use crate::output::{OutputKind, Separator};
use crate::session::ExtractionSession;
use crate::sources::{InlineSource, TextSource, file_sources};

/// High-level façade providing library-consumable entry points.
///
/// Wraps the session, sources and exporter behind a small API for embedding
/// in other Rust applications. Nothing here prints; outcomes are returned
/// as values and status messages live on the session.
pub struct EmailExtractor;

impl EmailExtractor {
    /// Run the pipeline over in-memory text.
    pub fn extract_text(text: &str) -> ExtractionSession {
        ExtractionSession::new().ingest_text(text)
    }

    /// Read and process files one after another, then apply `opts.filters`.
    pub async fn extract_files<P: AsRef<Path>>(
        paths: &[P],
        opts: &ExtractOptions,
    ) -> ExtractionSession {
        let sources = file_sources(paths, opts.max_file_size);
        Self::extract_sources(&sources, opts).await
    }

    /// Same as [`extract_files`](Self::extract_files) for arbitrary sources.
    pub async fn extract_sources(
        sources: &[Box<dyn TextSource>],
        opts: &ExtractOptions,
    ) -> ExtractionSession {
        let mut session = ExtractionSession::new().run_batch(sources).await;
        for filter in &opts.filters {
            session.apply_filter(filter);
        }
        session
    }

    /// Labelled in-memory inputs, processed as one batch.
    pub async fn extract_named_texts(
        inputs: &[(&str, &str)],
        opts: &ExtractOptions,
    ) -> ExtractionSession {
        let sources: Vec<Box<dyn TextSource>> = inputs
            .iter()
            .map(|(name, text)| Box::new(InlineSource::new(*name, *text)) as Box<dyn TextSource>)
            .collect();
        Self::extract_sources(&sources, opts).await
    }

    /// Narrow the session's domain groups.
    pub fn filter(session: &mut ExtractionSession, filter: &str) -> FilterOutcome {
        session.apply_filter(filter)
    }

    /// Perform the requested exports, returning every file written.
    ///
    /// The first failure aborts the remaining exports; files already
    /// written stay in place.
    pub fn export(session: &ExtractionSession, request: &ExportOptions) -> Result<Vec<PathBuf>> {
        let exporter = request.exporter();
        let mut written = Vec::new();
        if request.all {
            written.push(exporter.export_all(session.addresses())?);
        }
        for key in &request.domains {
            written.push(exporter.export_domain(session.domains(), key)?.0);
        }
        if request.archive {
            written.push(exporter.export_archive(session.domains())?);
        }
        Ok(written)
    }
}

/// Reading and filtering options.
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    pub max_file_size: u64,
    /// Applied in order after the batch.
    pub filters: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            filters: Vec::new(),
        }
    }
}

/// Which exports to write and how.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub basename: String,
    pub kind: OutputKind,
    pub separator: Separator,
    /// Write the flat list to `{base}{ext}`.
    pub all: bool,
    /// Domain keys to write one file each for.
    pub domains: Vec<String>,
    /// Write `{base}_domains.zip`.
    pub archive: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            basename: String::new(),
            kind: OutputKind::Text,
            separator: Separator::Newline,
            all: false,
            domains: Vec::new(),
            archive: false,
        }
    }
}

impl ExportOptions {
    pub fn exporter(&self) -> Exporter {
        Exporter::new(
            self.out_dir.clone(),
            &self.basename,
            self.kind,
            self.separator.clone(),
        )
    }
}
