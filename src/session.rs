//! Extraction session: the state of one batch.
//!
//! The session owns the accumulating `AddressSet` and `DomainIndex` and
//! is threaded explicitly through each step (`ingest_text` takes and
//! returns it). A batch reads its sources strictly one after another;
//! a failing source is recorded and skipped.

use std::io::Write;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::domains::{DomainIndex, FilterOutcome};
use crate::emails::{AddressSet, EmailAddress};
use crate::errors::{ErrorCategory, MailsiftError};
use crate::pattern::find_candidates;
use crate::sources::TextSource;
use crate::status::StatusLog;

/// A source that could not be processed.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub name: String,
    pub category: ErrorCategory,
    pub reason: String,
}

/// Counters for one batch.
#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    pub sources_total: usize,
    pub sources_failed: usize,
    /// Raw pattern matches before canonicalization and validation.
    pub candidates_seen: usize,
    /// Candidates rejected by the validator.
    pub candidates_rejected: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionSession {
    addresses: AddressSet,
    domains: DomainIndex,
    failures: Vec<FileFailure>,
    stats: BatchStats,
    status: StatusLog,
}

impl ExtractionSession {
    /// Fresh, empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh session whose `success` messages use `success_ttl`.
    pub fn with_success_ttl(success_ttl: Duration) -> Self {
        Self {
            status: StatusLog::with_success_ttl(success_ttl),
            ..Self::default()
        }
    }

    /// Run the pipeline over one block of text and fold the results in.
    pub fn ingest_text(mut self, text: &str) -> Self {
        for candidate in find_candidates(text) {
            self.stats.candidates_seen += 1;
            match EmailAddress::parse(candidate) {
                Some(email) => {
                    self.domains.insert(email.clone());
                    self.addresses.insert(email);
                }
                None => self.stats.candidates_rejected += 1,
            }
        }
        self
    }

    /// Record a source that failed to read.
    pub fn record_failure(mut self, name: &str, err: &MailsiftError) -> Self {
        warn!(source = name, error = %err, "failed to read source");
        self.failures.push(FileFailure {
            name: name.to_string(),
            category: err.category(),
            reason: err.to_string(),
        });
        self.stats.sources_failed += 1;
        self.status.error(format!("Error processing {name}"));
        self
    }

    /// Process every source in order, awaiting each read before the next.
    ///
    /// Always returns a session: read failures are recorded per source
    /// and the loop moves on. Ends with a `success` status when addresses
    /// were found and a `warning` otherwise.
    pub async fn run_batch(self, sources: &[Box<dyn TextSource>]) -> Self {
        let start = Instant::now();
        let mut session = self;
        for source in sources {
            session.stats.sources_total += 1;
            debug!(source = source.name(), "reading source");
            match source.read_text().await {
                Ok(text) => {
                    let before = session.addresses.len();
                    session = session.ingest_text(&text);
                    debug!(
                        source = source.name(),
                        new_addresses = session.addresses.len() - before,
                        "source processed"
                    );
                }
                Err(e) => session = session.record_failure(source.name(), &e),
            }
        }
        session.stats.duration_ms = start.elapsed().as_millis() as u64;

        if session.addresses.is_empty() {
            session.status.warning("No valid emails found in the files.");
        } else {
            let msg = format!(
                "Processed {} file(s). Found {} unique emails.",
                sources.len(),
                session.addresses.len()
            );
            session.status.success(msg);
        }
        session
    }

    /// Narrow the domain index; see [`DomainIndex::narrow`].
    pub fn apply_filter(&mut self, filter: &str) -> FilterOutcome {
        let outcome = self.domains.narrow(filter);
        match &outcome {
            FilterOutcome::Ignored => {}
            FilterOutcome::NoMatch => {
                self.status.warning("No domains match your filter");
            }
            FilterOutcome::Narrowed { addresses, .. } => {
                self.status
                    .success(format!("Found {addresses} emails in matching domains"));
            }
        }
        debug!(filter, ?outcome, "domain filter applied");
        outcome
    }

    /// Write one domain group to `out`, joined by `separator`.
    ///
    /// The key is trimmed and lower-cased. An unknown or empty group only
    /// records a warning. Returns whether anything was written.
    pub fn copy_domain<W: Write>(&mut self, key: &str, separator: &str, out: &mut W) -> bool {
        let key = key.trim().to_lowercase();
        let Some((joined, count)) = self
            .domains
            .get(&key)
            .filter(|b| !b.is_empty())
            .map(|b| (b.to_strings().join(separator), b.len()))
        else {
            self.status.warning(format!("No emails found for {key}"));
            return false;
        };
        match writeln!(out, "{joined}").and_then(|()| out.flush()) {
            Ok(()) => {
                debug!(domain = %key, count, "copied domain group");
                self.status.success(format!("Copied {count} {key} emails"));
                true
            }
            Err(e) => {
                warn!(domain = %key, error = %e, "domain copy failed");
                self.status.error("Failed to copy emails");
                false
            }
        }
    }

    pub fn addresses(&self) -> &AddressSet {
        &self.addresses
    }

    pub fn domains(&self) -> &DomainIndex {
        &self.domains
    }

    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    pub fn status(&self) -> &StatusLog {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusLog {
        &mut self.status
    }
}
