use std::collections::HashSet;
use std::fmt;

use crate::domains::domain_key;
use crate::validate::is_valid_email;

/// Canonical comparison form: trimmed and lower-cased.
///
/// Idempotent; applied before validation, dedup and grouping so case and
/// whitespace variants of one address collapse to a single entry.
pub fn canonicalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A validated, canonical email address.
///
/// Only obtainable through [`EmailAddress::parse`], so every value upholds
/// the validator's length and structure rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Canonicalize then validate a raw candidate.
    pub fn parse(raw: &str) -> Option<Self> {
        let canonical = canonicalize(raw);
        is_valid_email(&canonical).then_some(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn local(&self) -> &str {
        self.split().0
    }

    pub fn domain(&self) -> &str {
        self.split().1
    }

    /// Grouping key for this address (see [`crate::domains::domain_key`]).
    pub fn domain_key(&self) -> String {
        domain_key(self.domain())
    }

    fn split(&self) -> (&str, &str) {
        // Exactly one '@' is a construction invariant.
        self.0.split_once('@').unwrap_or((self.0.as_str(), ""))
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Keep each distinct value once, at the position of its first occurrence.
pub fn dedup_preserving_order<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter_map(|s| {
            let s = s.as_ref();
            seen.insert(s.to_string()).then(|| s.to_string())
        })
        .collect()
}

/// Ordered set of unique addresses, in first-occurrence order across a batch.
#[derive(Default, Debug, Clone)]
pub struct AddressSet {
    order: Vec<EmailAddress>,
    seen: HashSet<EmailAddress>,
}

impl AddressSet {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `email` unless already present. Returns whether it was new.
    pub fn insert(&mut self, email: EmailAddress) -> bool {
        if self.seen.contains(&email) {
            return false;
        }
        self.seen.insert(email.clone());
        self.order.push(email);
        true
    }

    pub fn contains(&self, email: &EmailAddress) -> bool {
        self.seen.contains(email)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmailAddress> {
        self.order.iter()
    }

    /// Plain string snapshot for formatters.
    pub fn to_strings(&self) -> Vec<String> {
        self.order.iter().map(|e| e.as_str().to_string()).collect()
    }

    /// Join the addresses with a display separator.
    pub fn join(&self, separator: &str) -> String {
        self.order
            .iter()
            .map(EmailAddress::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl FromIterator<EmailAddress> for AddressSet {
    fn from_iter<T: IntoIterator<Item = EmailAddress>>(iter: T) -> Self {
        let mut set = AddressSet::new();
        for email in iter {
            set.insert(email);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_trims_and_lowercases() {
        assert_eq!(canonicalize("  Sales@Example.ORG \n"), "sales@example.org");
    }

    #[test]
    fn canonicalization_is_idempotent() {
        for raw in [" A@B.com", "x@Y.io\t", "plain@lower.net", "\"Q\"@[1.2.3.4]"] {
            let once = canonicalize(raw);
            assert_eq!(canonicalize(&once), once);
        }
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!(EmailAddress::parse("a@@b.com").is_none());
        assert!(EmailAddress::parse(&format!("{}@b.com", "x".repeat(65))).is_none());
        let e = EmailAddress::parse(" Ok@Sub.Example.com ").unwrap();
        assert_eq!(e.as_str(), "ok@sub.example.com");
        assert_eq!(e.local(), "ok");
        assert_eq!(e.domain(), "sub.example.com");
        assert_eq!(e.domain_key(), "example.com");
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let v = dedup_preserving_order(["b@x.io", "a@x.io", "b@x.io", "c@x.io", "a@x.io"]);
        assert_eq!(v, vec!["b@x.io", "a@x.io", "c@x.io"]);
    }

    #[test]
    fn dedup_is_idempotent() {
        let once = dedup_preserving_order(["a@x.io", "a@x.io", "b@x.io"]);
        let twice = dedup_preserving_order(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn address_set_merges_case_variants() {
        let mut set = AddressSet::new();
        assert!(set.insert(EmailAddress::parse("A@Example.com").unwrap()));
        assert!(!set.insert(EmailAddress::parse("a@example.com").unwrap()));
        assert!(set.insert(EmailAddress::parse("b@example.com").unwrap()));
        assert_eq!(set.len(), 2);
        assert_eq!(set.join(","), "a@example.com,b@example.com");
    }

    #[test]
    fn collect_into_set() {
        let set: AddressSet = ["x@a.io", "y@a.io", "x@a.io"]
            .into_iter()
            .filter_map(EmailAddress::parse)
            .collect();
        assert_eq!(set.to_strings(), vec!["x@a.io", "y@a.io"]);
    }
}
