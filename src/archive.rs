//! Per-domain zip archive.
//!
//! One entry per bucket, named like a single-domain export and encoded
//! with the same formatter, so unpacking the archive yields the same files
//! as exporting every domain one at a time.

use std::io::{Cursor, Write};

use tracing::debug;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::domains::DomainIndex;
use crate::errors::{MailsiftError, Result};
use crate::output::{OutputKind, Separator, domain_file_name, domain_file_stem, render};

/// Build the archive bytes for every bucket in `index`, in key order.
pub fn build_domain_archive(
    index: &DomainIndex,
    base: &str,
    kind: OutputKind,
    separator: &Separator,
) -> Result<Vec<u8>> {
    if index.is_empty() {
        return Err(MailsiftError::nothing_to_export("no domain groups"));
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for bucket in index.iter() {
        let name = domain_file_name(base, bucket.key(), kind);
        let caption = domain_file_stem(base, bucket.key());
        let payload = render(kind, &bucket.to_strings(), separator, &caption)?;
        debug!(entry = %name, bytes = payload.bytes.len(), "adding archive entry");

        writer.start_file(name.as_str(), options)?;
        writer
            .write_all(&payload.bytes)
            .map_err(|e| MailsiftError::io(name.as_str(), "write archive entry", e))?;
    }

    Ok(writer.finish()?.into_inner())
}
