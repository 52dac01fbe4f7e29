//! Structured output module for JSON and YAML serialization.
//!
//! `ExtractionReport` captures everything one run produced: the inputs,
//! the flat address list, the domain groups, per-file failures, batch
//! statistics, status messages and any files written. The schema is
//! published through `schemars` so downstream tools can validate reports.

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::session::ExtractionSession;
use crate::status::StatusLevel;

/// Root structure for all mailsift output in structured formats
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct ExtractionReport {
    /// Tool version and metadata
    pub metadata: OutputMetadata,

    /// Input files in the order they were read
    pub inputs: Vec<String>,

    /// Unique addresses in first-occurrence order
    pub addresses: Vec<String>,

    /// Domain groups, largest first
    pub domains: Vec<DomainGroup>,

    /// Inputs that could not be read
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<FailureInfo>,

    /// Filters applied to the domain groups, in order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub filters: Vec<String>,

    /// Files written by this run
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub exports: Vec<String>,

    /// Batch counters
    pub statistics: ExtractionStatistics,

    /// Status messages raised during the run
    pub messages: Vec<StatusEntry>,
}

/// Tool metadata and versioning information
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct OutputMetadata {
    /// Tool name
    pub tool_name: String,

    /// Tool version
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: chrono::DateTime<chrono::Utc>,

    /// Schema version for this output format
    pub schema_version: String,
}

/// One domain key and its addresses
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct DomainGroup {
    /// Grouping key (last two labels of the domain)
    pub domain: String,

    /// Number of addresses in the group
    pub count: usize,

    /// Addresses in insertion order
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct FailureInfo {
    pub file: String,
    /// Error class: `input`, `io`, `export` or `internal`
    pub category: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct ExtractionStatistics {
    pub files_total: usize,
    pub files_failed: usize,
    /// Raw pattern matches before validation
    pub candidates_seen: usize,
    pub candidates_rejected: usize,
    pub unique_addresses: usize,
    pub domain_groups: usize,
    pub total_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct StatusEntry {
    pub level: StatusLevel,
    pub text: String,

    /// Auto-dismiss delay, `success` only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dismiss_after_ms: Option<u64>,
}

impl ExtractionReport {
    /// Build a report from a finished session.
    pub fn from_session(
        session: &ExtractionSession,
        inputs: &[PathBuf],
        filters: &[String],
        exports: &[PathBuf],
    ) -> Self {
        let stats = session.stats();
        Self {
            metadata: OutputMetadata {
                tool_name: crate::NAME.to_string(),
                version: crate::VERSION.to_string(),
                generated_at: chrono::Utc::now(),
                schema_version: "1.0.0".to_string(),
            },
            inputs: inputs.iter().map(|p| p.display().to_string()).collect(),
            addresses: session.addresses().to_strings(),
            domains: session
                .domains()
                .sorted_by_size()
                .into_iter()
                .map(|b| DomainGroup {
                    domain: b.key().to_string(),
                    count: b.len(),
                    addresses: b.to_strings(),
                })
                .collect(),
            failures: session
                .failures()
                .iter()
                .map(|f| FailureInfo {
                    file: f.name.clone(),
                    category: f.category.to_string(),
                    reason: f.reason.clone(),
                })
                .collect(),
            filters: filters.to_vec(),
            exports: exports.iter().map(|p| p.display().to_string()).collect(),
            statistics: ExtractionStatistics {
                files_total: stats.sources_total,
                files_failed: stats.sources_failed,
                candidates_seen: stats.candidates_seen,
                candidates_rejected: stats.candidates_rejected,
                unique_addresses: session.addresses().len(),
                domain_groups: session.domains().len(),
                total_time_ms: stats.duration_ms,
            },
            messages: session
                .status()
                .messages()
                .iter()
                .map(|m| StatusEntry {
                    level: m.level,
                    text: m.text.clone(),
                    dismiss_after_ms: m.dismiss_after.map(|d| d.as_millis() as u64),
                })
                .collect(),
        }
    }

    /// Generate JSON schema for this output format
    pub fn generate_json_schema() -> Result<String> {
        let schema = schemars::schema_for!(ExtractionReport);
        Ok(serde_json::to_string_pretty(&schema)?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
