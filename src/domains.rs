//! Domain grouping and filtering.
//!
//! Addresses are bucketed under a syntactic *domain key*: the last two
//! dot-separated labels of the domain when it has three or more, the
//! whole domain otherwise. There is no public-suffix handling, so
//! `a@sub.mail.example.co.uk` lands under `co.uk`.

use std::collections::{HashMap, HashSet};

use crate::emails::EmailAddress;

/// Derive the grouping key from the domain part of an address.
pub fn domain_key(domain: &str) -> String {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() > 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        domain.to_string()
    }
}

/// Make a key safe to embed in a file name.
///
/// Dots, path separators, `:` and control characters become `_`, so an
/// IP-literal key such as `x:/y.z/w]` cannot escape the output directory.
pub fn key_file_stem(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '.' | '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Addresses sharing one domain key, deduplicated, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DomainBucket {
    key: String,
    addresses: Vec<EmailAddress>,
    seen: HashSet<EmailAddress>,
}

impl DomainBucket {
    fn new(key: String) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn addresses(&self) -> &[EmailAddress] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.addresses.iter().map(|e| e.to_string()).collect()
    }

    fn push(&mut self, email: EmailAddress) -> bool {
        if !self.seen.insert(email.clone()) {
            return false;
        }
        self.addresses.push(email);
        true
    }
}

/// Result of [`DomainIndex::narrow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Blank filter text; nothing changed.
    Ignored,
    /// No key contains the filter text; nothing changed.
    NoMatch,
    /// The index now holds only the matching buckets.
    Narrowed { domains: usize, addresses: usize },
}

/// Mapping from domain key to its bucket. Keys keep first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct DomainIndex {
    buckets: Vec<DomainBucket>,
    positions: HashMap<String, usize>,
}

impl DomainIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `email` to the bucket for its key, creating the bucket lazily.
    /// Returns whether the address was new to that bucket.
    pub fn insert(&mut self, email: EmailAddress) -> bool {
        let key = email.domain_key();
        let idx = match self.positions.get(&key) {
            Some(&idx) => idx,
            None => {
                self.buckets.push(DomainBucket::new(key.clone()));
                self.positions.insert(key, self.buckets.len() - 1);
                self.buckets.len() - 1
            }
        };
        self.buckets[idx].push(email)
    }

    pub fn get(&self, key: &str) -> Option<&DomainBucket> {
        self.positions.get(key).map(|&idx| &self.buckets[idx])
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total addresses across all buckets.
    pub fn address_count(&self) -> usize {
        self.buckets.iter().map(DomainBucket::len).sum()
    }

    /// Buckets in key insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DomainBucket> {
        self.buckets.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(DomainBucket::key)
    }

    /// Buckets by descending size; equal sizes keep key insertion order.
    pub fn sorted_by_size(&self) -> Vec<&DomainBucket> {
        let mut v: Vec<&DomainBucket> = self.buckets.iter().collect();
        v.sort_by(|a, b| b.len().cmp(&a.len()));
        v
    }

    /// Keep only buckets whose key contains `filter` (trimmed, lower-cased).
    ///
    /// Narrowing is destructive and cumulative: dropped buckets are gone
    /// for later filters. A blank filter or a filter matching nothing
    /// leaves the index untouched.
    pub fn narrow(&mut self, filter: &str) -> FilterOutcome {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return FilterOutcome::Ignored;
        }
        if !self.keys().any(|k| k.contains(&needle)) {
            return FilterOutcome::NoMatch;
        }

        let kept: Vec<DomainBucket> = std::mem::take(&mut self.buckets)
            .into_iter()
            .filter(|b| b.key.contains(&needle))
            .collect();
        self.positions = kept
            .iter()
            .enumerate()
            .map(|(i, b)| (b.key.clone(), i))
            .collect();
        self.buckets = kept;

        FilterOutcome::Narrowed {
            domains: self.len(),
            addresses: self.address_count(),
        }
    }
}

impl FromIterator<EmailAddress> for DomainIndex {
    fn from_iter<T: IntoIterator<Item = EmailAddress>>(iter: T) -> Self {
        let mut index = DomainIndex::new();
        for email in iter {
            index.insert(email);
        }
        index
    }
}
