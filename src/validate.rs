//! Length and structure checks applied to canonical candidates.

/// Maximum local-part length (bytes).
pub const MAX_LOCAL_LEN: usize = 64;
/// Maximum domain length (bytes).
pub const MAX_DOMAIN_LEN: usize = 255;
/// Maximum length of one dot-separated domain label (bytes).
pub const MAX_LABEL_LEN: usize = 63;

/// Decide whether a canonical candidate is an admissible address.
///
/// Rules, first failure wins:
/// 1. exactly one `@`, splitting into local part and domain;
/// 2. local part at most [`MAX_LOCAL_LEN`];
/// 3. domain at most [`MAX_DOMAIN_LEN`];
/// 4. no domain label longer than [`MAX_LABEL_LEN`].
pub fn is_valid_email(candidate: &str) -> bool {
    let mut parts = candidate.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.len() > MAX_LOCAL_LEN {
        return false;
    }
    if domain.len() > MAX_DOMAIN_LEN {
        return false;
    }
    !domain.split('.').any(|label| label.len() > MAX_LABEL_LEN)
}
