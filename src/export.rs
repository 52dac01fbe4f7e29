//! Writing exports to disk.
//!
//! Every file goes through a temp file in the target directory that is
//! persisted only once fully written, so a failed export never leaves a
//! partial file behind. The `*_reported` helpers translate outcomes into
//! status messages the way the interactive tool did.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::archive::build_domain_archive;
use crate::domains::DomainIndex;
use crate::emails::AddressSet;
use crate::errors::{IoResultExt, MailsiftError, Result};
use crate::output::{
    OutputKind, Separator, archive_file_name, domain_file_name, domain_file_stem,
    effective_basename, render, single_file_name,
};
use crate::status::StatusLog;

/// Persist `bytes` as `dir/name` atomically.
pub fn write_atomic(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let target = dir.join(name);
    let display = target.to_string_lossy().into_owned();

    let mut tmp = NamedTempFile::new_in(dir).with_path(&display, "create temp file")?;
    tmp.write_all(bytes).with_path(&display, "write")?;
    tmp.flush().with_path(&display, "flush")?;
    tmp.persist(&target)
        .map_err(|e| MailsiftError::io(display, "persist", e.error))?;
    Ok(target)
}

/// Export settings shared by all three export actions.
#[derive(Debug, Clone)]
pub struct Exporter {
    out_dir: PathBuf,
    basename: String,
    kind: OutputKind,
    separator: Separator,
}

impl Exporter {
    pub fn new(
        out_dir: impl Into<PathBuf>,
        basename: &str,
        kind: OutputKind,
        separator: Separator,
    ) -> Self {
        Self {
            out_dir: out_dir.into(),
            basename: effective_basename(basename).to_string(),
            kind,
            separator,
        }
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn kind(&self) -> OutputKind {
        self.kind
    }

    pub fn separator(&self) -> &Separator {
        &self.separator
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// `{base}{ext}` with the whole flat list.
    pub fn export_all(&self, addresses: &AddressSet) -> Result<PathBuf> {
        if addresses.is_empty() {
            return Err(MailsiftError::nothing_to_export("no addresses extracted"));
        }
        let payload = render(
            self.kind,
            &addresses.to_strings(),
            &self.separator,
            &self.basename,
        )?;
        let path = write_atomic(
            &self.out_dir,
            &single_file_name(&self.basename, self.kind),
            &payload.bytes,
        )?;
        info!(path = %path.display(), count = addresses.len(), "exported address list");
        Ok(path)
    }

    /// `{base}_{key}{ext}` with one bucket.
    pub fn export_domain(&self, index: &DomainIndex, key: &str) -> Result<(PathBuf, usize)> {
        let key = key.trim().to_lowercase();
        let bucket = index
            .get(&key)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| MailsiftError::unknown_domain(key.as_str()))?;
        let caption = domain_file_stem(&self.basename, &key);
        let payload = render(self.kind, &bucket.to_strings(), &self.separator, &caption)?;
        let path = write_atomic(
            &self.out_dir,
            &domain_file_name(&self.basename, &key, self.kind),
            &payload.bytes,
        )?;
        info!(path = %path.display(), domain = %key, count = bucket.len(), "exported domain");
        Ok((path, bucket.len()))
    }

    /// `{base}_domains.zip` with one entry per bucket.
    pub fn export_archive(&self, index: &DomainIndex) -> Result<PathBuf> {
        let bytes = build_domain_archive(index, &self.basename, self.kind, &self.separator)?;
        let path = write_atomic(&self.out_dir, &archive_file_name(&self.basename), &bytes)?;
        info!(path = %path.display(), domains = index.len(), "exported domain archive");
        Ok(path)
    }

    pub fn export_all_reported(
        &self,
        addresses: &AddressSet,
        status: &mut StatusLog,
    ) -> Option<PathBuf> {
        if addresses.is_empty() {
            status.warning("No emails to download.");
            return None;
        }
        status.info("Preparing download...");
        match self.export_all(addresses) {
            Ok(path) => {
                status.success("Download complete!");
                Some(path)
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                status.error("Failed to generate file. Please try again.");
                None
            }
        }
    }

    pub fn export_domain_reported(
        &self,
        index: &DomainIndex,
        key: &str,
        status: &mut StatusLog,
    ) -> Option<PathBuf> {
        match self.export_domain(index, key) {
            Ok((path, count)) => {
                status.success(format!("Downloaded {count} {} emails", key.trim()));
                Some(path)
            }
            Err(MailsiftError::UnknownDomain { domain }) => {
                status.warning(format!("No emails found for {domain}"));
                None
            }
            Err(e) => {
                warn!(error = %e, domain = key, "domain export failed");
                status.error("Failed to export domain emails");
                None
            }
        }
    }

    pub fn export_archive_reported(
        &self,
        index: &DomainIndex,
        status: &mut StatusLog,
    ) -> Option<PathBuf> {
        if index.is_empty() {
            status.warning("No domains to export");
            return None;
        }
        match self.export_archive(index) {
            Ok(path) => {
                status.success("All domains exported as separate files");
                Some(path)
            }
            Err(e) => {
                warn!(error = %e, "archive export failed");
                status.error("Failed to export domain emails");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emails::EmailAddress;
    use crate::status::StatusLevel;

    fn set_of(list: &[&str]) -> AddressSet {
        list.iter()
            .map(|s| EmailAddress::parse(s).unwrap())
            .collect()
    }

    fn index_of(list: &[&str]) -> DomainIndex {
        list.iter()
            .map(|s| EmailAddress::parse(s).unwrap())
            .collect()
    }

    #[test]
    fn atomic_write_leaves_only_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_atomic(dir.path(), "out.txt", b"hello").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn atomic_write_into_missing_dir_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = write_atomic(&missing, "out.txt", b"x").unwrap_err();
        assert!(matches!(err, MailsiftError::Io { .. }));
        assert!(!missing.join("out.txt").exists());
    }

    #[test]
    fn export_all_writes_flat_list() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), " ", OutputKind::Text, Separator::Comma);
        let path = exporter
            .export_all(&set_of(&["a@example.com", "b@test.net"]))
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "extracted_emails.txt");
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "a@example.com,b@test.net"
        );
    }

    #[test]
    fn export_domain_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), "list", OutputKind::Csv, Separator::Tab);
        let index = index_of(&["a@example.com", "b@mail.example.com", "c@test.net"]);
        let (path, count) = exporter.export_domain(&index, "Example.com").unwrap();
        assert_eq!(count, 2);
        assert_eq!(path.file_name().unwrap(), "list_example_com.csv");
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "a@example.com\tb@mail.example.com"
        );
    }

    #[test]
    fn reported_exports_set_status() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), "list", OutputKind::Text, Separator::Newline);
        let mut status = StatusLog::new();

        assert!(exporter
            .export_all_reported(&AddressSet::new(), &mut status)
            .is_none());
        assert_eq!(status.last().unwrap().text, "No emails to download.");

        let index = index_of(&["a@example.com"]);
        assert!(exporter
            .export_domain_reported(&index, "nowhere.org", &mut status)
            .is_none());
        assert_eq!(status.last().unwrap().text, "No emails found for nowhere.org");

        assert!(exporter
            .export_domain_reported(&index, "example.com", &mut status)
            .is_some());
        assert_eq!(
            status.last().unwrap().text,
            "Downloaded 1 example.com emails"
        );

        let zip = exporter.export_archive_reported(&index, &mut status).unwrap();
        assert_eq!(zip.file_name().unwrap(), "list_domains.zip");
        assert_eq!(status.last().unwrap().level, StatusLevel::Success);

        assert!(exporter
            .export_archive_reported(&DomainIndex::new(), &mut status)
            .is_none());
        assert_eq!(status.last().unwrap().text, "No domains to export");
    }

    #[test]
    fn failed_export_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(
            dir.path().join("missing"),
            "list",
            OutputKind::Json,
            Separator::Newline,
        );
        let mut status = StatusLog::new();
        let out = exporter.export_all_reported(&set_of(&["a@example.com"]), &mut status);
        assert!(out.is_none());
        let last = status.last().unwrap();
        assert_eq!(last.level, StatusLevel::Error);
        assert_eq!(last.text, "Failed to generate file. Please try again.");
    }
}
