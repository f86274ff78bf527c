//! Propagation verification services.

mod doh;
mod lookup;
mod matching;
mod propagation;
mod resolver;

pub use doh::parse_doh_response;
pub use lookup::{LiveLookup, NameserverLookup};
pub use matching::{MatchOutcome, evaluate_match, normalize_nameserver, normalize_set};
pub use propagation::{DEFAULT_DOH_ENDPOINT, PropagationVerifier, VerifierOptions};

use crate::error::{ToolboxError, ToolboxResult};

/// Maximum length of a domain name.
const MAX_DOMAIN_LEN: usize = 253;
/// Maximum length of a single label.
const MAX_LABEL_LEN: usize = 63;

/// Whether `c` may appear in a domain name typed by the user.
#[must_use]
pub fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

/// Validate a root domain name and return it trimmed and lower-cased.
///
/// Accepts names of 3–253 characters made of `[A-Za-z0-9.-]`, with at least one dot,
/// no empty labels, labels of at most 63 characters, and no label starting or ending
/// with `-`.
pub fn validate_domain(domain: &str) -> ToolboxResult<String> {
    let domain = domain.trim();
    let invalid = |reason: &str| ToolboxError::ValidationError(format!("{reason}: {domain}"));

    if domain.is_empty() {
        return Err(ToolboxError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    if domain.len() < 3 || domain.len() > MAX_DOMAIN_LEN {
        return Err(invalid("Domain name must be 3-253 characters"));
    }
    if !domain.chars().all(is_domain_char) {
        return Err(invalid("Domain name contains invalid characters"));
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("Domain name cannot start or end with a dot"));
    }
    if domain.contains("..") {
        return Err(invalid("Domain name cannot contain consecutive dots"));
    }
    if !domain.contains('.') {
        return Err(invalid("Domain name must contain at least one dot"));
    }
    for label in domain.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(invalid("Each label must be 1-63 characters"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid("Labels cannot start or end with a hyphen"));
        }
    }

    Ok(domain.to_ascii_lowercase())
}

/// Parent zone of `domain`, or `None` when `domain` has two labels or fewer.
///
/// `dev.example.com` → `example.com`; `example.com` → `None`.
#[must_use]
pub fn parent_domain(domain: &str) -> Option<String> {
    let domain = domain.trim_end_matches('.');
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() <= 2 {
        return None;
    }
    Some(labels[1..].join("."))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain_normal() {
        assert_eq!(validate_domain("example.com").unwrap(), "example.com");
        assert_eq!(
            validate_domain("  Dev.Example.COM ").unwrap(),
            "dev.example.com"
        );
    }

    #[test]
    fn test_validate_domain_empty() {
        assert!(matches!(
            validate_domain("   "),
            Err(ToolboxError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_domain_rejects_bad_shapes() {
        for bad in [
            "ab",
            "example",
            ".example.com",
            "example.com.",
            "example..com",
            "-example.com",
            "example-.com",
            "exa mple.com",
            "exämple.com",
            "under_score.com",
        ] {
            assert!(validate_domain(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_validate_domain_label_length() {
        let ok = format!("{}.com", "a".repeat(63));
        assert!(validate_domain(&ok).is_ok());
        let too_long = format!("{}.com", "a".repeat(64));
        assert!(validate_domain(&too_long).is_err());
    }

    #[test]
    fn test_validate_domain_total_length() {
        let label = "a".repeat(60);
        let long = [label.as_str(); 5].join(".");
        assert!(long.len() > MAX_DOMAIN_LEN);
        assert!(validate_domain(&long).is_err());
    }

    #[test]
    fn test_domain_chars() {
        assert!(is_domain_char('a'));
        assert!(is_domain_char('Z'));
        assert!(is_domain_char('7'));
        assert!(is_domain_char('-'));
        assert!(is_domain_char('.'));
        assert!(!is_domain_char('_'));
        assert!(!is_domain_char(' '));
        assert!(!is_domain_char('/'));
    }

    #[test]
    fn test_parent_domain() {
        assert_eq!(parent_domain("example.com"), None);
        assert_eq!(
            parent_domain("dev.example.com").as_deref(),
            Some("example.com")
        );
        assert_eq!(
            parent_domain("a.b.example.com.").as_deref(),
            Some("b.example.com")
        );
    }
}
