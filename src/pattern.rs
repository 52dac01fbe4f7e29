//! Email-shaped substring recognition.
//!
//! A single compiled regular expression scans arbitrary text and yields
//! every non-overlapping match, left to right. Matches are *candidates*:
//! they still go through canonicalization and the length checks in
//! [`crate::validate`] before they become addresses.
//!
//! The grammar is RFC 5322-like:
//! - local part: a dot-atom or a quoted string,
//! - `@`,
//! - a dotted hostname, or a bracketed IPv4 / IP-literal.
//!
//! Case folding is ASCII-only (`(?i-u)`), so `[a-z]` never picks up
//! non-ASCII letters that happen to fold onto ASCII ones.

use once_cell::sync::Lazy;
use regex::Regex;

/// Source text of the candidate pattern.
pub const EMAIL_PATTERN: &str = concat!(
    r"(?i-u)",
    // local part: dot-atom
    r"(?:[a-z0-9!#$%&'*+/=?^_`{|}~\-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~\-]+)*",
    // local part: quoted string
    r#"|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")"#,
    r"@",
    // dotted hostname
    r"(?:(?:[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?",
    // bracketed IPv4 or IP-literal
    r"|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}",
    r"(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?",
    r"|[a-z0-9\-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])",
);

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern must compile"));

/// Iterate over every email-shaped substring of `text`, left to right.
///
/// Yields nothing when there is no match; that is not an error.
pub fn find_candidates(text: &str) -> impl Iterator<Item = &str> {
    EMAIL_RE.find_iter(text).map(|m| m.as_str())
}

/// Number of candidates in `text` (diagnostics and benches).
pub fn count_candidates(text: &str) -> usize {
    EMAIL_RE.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(text: &str) -> Vec<&str> {
        find_candidates(text).collect()
    }

    #[test]
    fn pattern_compiles() {
        assert!(Regex::new(EMAIL_PATTERN).is_ok());
    }

    #[test]
    fn finds_plain_addresses_in_order() {
        let text = "Contact A@Example.com or a@example.com, also BAD@@x, ok@sub.longdomain.io";
        assert_eq!(
            all(text),
            vec!["A@Example.com", "a@example.com", "ok@sub.longdomain.io"]
        );
    }

    #[test]
    fn no_match_yields_nothing() {
        assert!(all("no addresses here, just @ signs and dots.").is_empty());
        assert_eq!(count_candidates(""), 0);
    }

    #[test]
    fn requires_dotted_hostname() {
        assert!(all("root@localhost").is_empty());
    }

    #[test]
    fn dot_atom_specials() {
        assert_eq!(
            all("<first.last+tag@mail.example.org>"),
            vec!["first.last+tag@mail.example.org"]
        );
        assert_eq!(all("x!#$%&'*=?^_`{|}~-y@a.io"), vec!["x!#$%&'*=?^_`{|}~-y@a.io"]);
    }

    #[test]
    fn quoted_local_part() {
        assert_eq!(
            all(r#"send to "john..doe"@example.com now"#),
            vec![r#""john..doe"@example.com"#]
        );
    }

    #[test]
    fn bracketed_ipv4_literal() {
        assert_eq!(all("ops@[192.168.0.1]."), vec!["ops@[192.168.0.1]"]);
    }

    #[test]
    fn hostname_does_not_end_with_hyphen_or_dot() {
        assert_eq!(all("a@example.com."), vec!["a@example.com"]);
        assert_eq!(all("a@example.co-"), vec!["a@example.co"]);
    }

    #[test]
    fn case_insensitive_ascii() {
        assert_eq!(all("MiXeD@ExAmPlE.COM"), vec!["MiXeD@ExAmPlE.COM"]);
    }

    #[test]
    fn non_ascii_is_not_part_of_a_match() {
        // KELVIN SIGN folds to 'k' under Unicode rules only.
        assert_eq!(all("\u{212A}ab@example.com"), vec!["ab@example.com"]);
    }
}
