//! Hostname-style domain validation.
//!
//! Implements the relaxed hostname grammar the sink accepts on the right
//! side of an address: dot-separated labels of letters, digits,
//! underscores and hyphens, with RFC 1035 length limits. Underscores are
//! permitted anywhere in a label so that service records and DKIM-style
//! keys (`_domainkey.example.com`) route like any other name, and a
//! single trailing dot denotes a fully-qualified name.
//!
//! Validation is a total predicate: callers get `true` or `false`, never
//! a diagnostic. The address parser maps `false` to
//! [`AddressError::InvalidDomain`](crate::AddressError::InvalidDomain).

/// Maximum length of a domain in characters, including any trailing dot.
pub const MAX_DOMAIN_LENGTH: usize = 255;

/// Maximum length of a single domain label in characters.
pub const MAX_LABEL_LENGTH: usize = 63;

/// Check whether `domain` is an acceptable hostname.
///
/// Accepts 1–255 characters of dot-separated labels, where every label is
/// 1–63 characters drawn from `[A-Za-z0-9_-]` and does not begin or end
/// with a hyphen. A single trailing dot is permitted. No case folding is
/// performed; both cases validate alike.
///
/// # Examples
///
/// ```
/// use pelican_address::is_valid_domain;
///
/// assert!(is_valid_domain("example.com"));
/// assert!(is_valid_domain("_dkim.mail.example.com."));
/// assert!(!is_valid_domain("no..empty.labels"));
/// ```
#[must_use]
pub fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LENGTH {
        return false;
    }

    // One trailing dot marks a fully-qualified name.
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain.is_empty() {
        return false;
    }

    domain.split('.').all(is_valid_label)
}

/// Check a single label: 1–63 characters of `[A-Za-z0-9_-]`, with no
/// hyphen at either end.
fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return false;
    }

    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }

    label.chars().all(is_label_char)
}

#[inline]
const fn is_label_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_forms() {
        assert!(is_valid_domain("hostname"), "bare hostname is valid");
        assert!(is_valid_domain("github.com"));
        assert!(is_valid_domain("my-domain.com"), "hyphen mid-label");
        assert!(is_valid_domain("_domainkey.foo.com"), "underscore label");
        assert!(is_valid_domain("ABC.6DBS.com"), "mixed case");
        assert!(is_valid_domain("123.com"), "digits-only label");
        assert!(is_valid_domain("mail.123.com"));
    }

    #[test]
    fn test_trailing_dot_is_fully_qualified() {
        assert!(is_valid_domain("bar.com."));
        assert!(is_valid_domain("hostname."));
        assert!(!is_valid_domain("."), "root alone is not a domain");
        assert!(!is_valid_domain("bar.com.."), "only one trailing dot");
    }

    #[test]
    fn test_rejects_empty_labels() {
        assert!(!is_valid_domain(""));
        assert!(!is_valid_domain("google..com"));
        assert!(!is_valid_domain(".foo.com"));
    }

    #[test]
    fn test_rejects_bad_characters() {
        assert!(!is_valid_domain("google\r.com"));
        assert!(!is_valid_domain("bad!domain"));
        assert!(!is_valid_domain("bad domain"));
        assert!(!is_valid_domain("am@biguous.com"));
    }

    #[test]
    fn test_hyphen_cannot_edge_a_label() {
        assert!(!is_valid_domain("foo.-bar.com"));
        assert!(!is_valid_domain("foo-.bar.com"));
        assert!(!is_valid_domain("-foo.bar.com"));
        assert!(is_valid_domain("f-o-o.bar.com"));
    }

    #[test]
    fn test_label_length_limit() {
        let long = "a".repeat(MAX_LABEL_LENGTH);
        assert!(is_valid_domain(&format!("{long}.com")));
        assert!(!is_valid_domain(&format!("{long}a.com")));
    }

    #[test]
    fn test_domain_length_limit() {
        // Four 63-character labels and three dots: exactly 255.
        let label = "a".repeat(MAX_LABEL_LENGTH);
        let exact = [label.as_str(); 4].join(".");
        assert_eq!(exact.len(), MAX_DOMAIN_LENGTH);
        assert!(is_valid_domain(&exact));

        assert!(!is_valid_domain(&"a".repeat(MAX_DOMAIN_LENGTH + 1)));
        assert!(!is_valid_domain(&format!("b.{exact}")));
    }
}
