//! Error types for address parsing and mailbox-name normalization.
//!
//! Every fallible operation in this crate reports one of the variants
//! below. Parsing is deterministic, so nothing here is retryable: the
//! same input always produces the same outcome, and the caller decides
//! what (if anything) to log or send back over the wire.

use thiserror::Error;

/// Result type for address parsing
pub type Result<T> = std::result::Result<T, AddressError>;

/// Errors that can occur while parsing an address or mailbox name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The address, local part, domain, or mailbox name is empty.
    #[error("Empty input")]
    Empty,

    /// A character outside the permitted set in an unquoted position.
    #[error("Invalid character {0:?}")]
    InvalidCharacter(char),

    /// No unquoted, unescaped `@` separator was found.
    #[error("Missing unquoted '@' separator")]
    MissingAtSeparator,

    /// A quoted string was still open at end of input.
    #[error("Unterminated quoted string in local part")]
    UnterminatedQuote,

    /// A backslash escape with nothing following it.
    #[error("Backslash escape at end of input")]
    DanglingEscape,

    /// A backslash escape applied to a character outside 7-bit ASCII.
    #[error("Escaped character {0:?} is not 7-bit ASCII")]
    NonAsciiEscape(char),

    /// The local part begins or ends with a dot.
    #[error("Local part cannot begin or end with '.'")]
    LeadingOrTrailingDot,

    /// Two dots in a row inside the local part.
    #[error("Consecutive dots in local part")]
    DoubledDot,

    /// A quoted string that does not span the entire local part.
    #[error("Quoted string must span the entire local part")]
    EmbeddedQuotedString,

    /// The local part exceeds 128 characters before unescaping.
    #[error("Local part exceeds 128 characters")]
    LocalTooLong,

    /// The domain part failed hostname validation.
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_offending_input() {
        assert_eq!(
            AddressError::InvalidCharacter(' ').to_string(),
            "Invalid character ' '"
        );
        assert_eq!(
            AddressError::InvalidDomain("bad!domain".to_string()).to_string(),
            "Invalid domain: bad!domain"
        );
        assert_eq!(
            AddressError::NonAsciiEscape('\u{80}').to_string(),
            "Escaped character '\\u{80}' is not 7-bit ASCII"
        );
    }

    #[test]
    fn test_display_plain_variants() {
        assert_eq!(AddressError::Empty.to_string(), "Empty input");
        assert_eq!(
            AddressError::MissingAtSeparator.to_string(),
            "Missing unquoted '@' separator"
        );
        assert_eq!(
            AddressError::UnterminatedQuote.to_string(),
            "Unterminated quoted string in local part"
        );
    }
}
