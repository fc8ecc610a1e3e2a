//! RFC 5321 address parsing.
//!
//! Splits an SMTP `addr-spec` into its local part and domain at the
//! first `@` that is neither backslash-escaped nor inside a quoted
//! string, unescaping the local part along the way. The grammar is the
//! submission-time subset of RFC 5321 section 4.1.2:
//!
//! ```text
//! addr-spec     = local-part "@" domain
//! local-part    = dot-string / quoted-string
//! dot-string    = atom *("." atom)
//! atom          = 1*atext
//! quoted-string = DQUOTE *( qtext / quoted-pair ) DQUOTE
//! quoted-pair   = "\" VCHAR
//! ```
//!
//! The scanner is a single forward pass over the input with no
//! backtracking. Escapes are honored in both modes and the escaped
//! character must be 7-bit ASCII; a quoted string is only legal when it
//! spans the entire local part.

use std::{
    borrow::Cow,
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    domain::is_valid_domain,
    error::{AddressError, Result},
    mailbox::{self, MailboxName},
};

/// Longest local part accepted, measured on the raw input before
/// unescaping. RFC 5321 fixes 64 octets but real submissions exceed
/// that, so the limit is doubled.
pub const MAX_LOCAL_LENGTH: usize = 128;

/// A structurally valid email address, decomposed.
///
/// The local part is stored unescaped: surrounding quotes are removed
/// and `\x` escape sequences are collapsed to `x`. [`Display`] renders
/// the address back in transmissible form, re-quoting the local part
/// when it is not a plain dot-string.
///
/// # Examples
///
/// ```
/// use pelican_address::parse_email_address;
///
/// let address = parse_email_address("\"first last\"@example.com")?;
/// assert_eq!(address.local_part, "first last");
/// assert_eq!(address.domain, "example.com");
/// assert_eq!(address.to_string(), "\"first last\"@example.com");
/// # Ok::<(), pelican_address::AddressError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// The unescaped local part
    pub local_part: String,
    /// The domain the address is routed to
    pub domain: String,
}

impl Address {
    /// The mailbox this address delivers to, if the local part is a
    /// routable mailbox name.
    ///
    /// Quoted-form locals routinely carry characters mailbox names
    /// reject, so a valid address does not guarantee a mailbox.
    ///
    /// # Errors
    ///
    /// Returns the error [`mailbox::parse_mailbox_name`] reports for
    /// the local part.
    pub fn mailbox_name(&self) -> Result<MailboxName> {
        mailbox::parse_mailbox_name(&self.local_part)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", escape_local_part(&self.local_part), self.domain)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(address: &str) -> Result<Self> {
        parse_email_address(address)
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(address: &str) -> Result<Self> {
        parse_email_address(address)
    }
}

/// Scanner position within the local part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Start of input, or immediately after a dot
    Start,
    /// Inside a dot-string atom
    Normal,
    /// Immediately after a backslash in dot-string mode
    Escaped,
    /// Inside a quoted string
    Quoted,
    /// Immediately after a backslash in a quoted string
    QuotedEscaped,
    /// Immediately after the closing quote; only `@` may follow
    QuotedEnd,
}

/// Parse an address into its local part and domain.
///
/// The local part in the returned [`Address`] is unescaped. The domain
/// is validated with [`is_valid_domain`] but otherwise returned as
/// written, trailing dot and letter case included.
///
/// # Errors
///
/// Returns an [`AddressError`] naming the first structural problem
/// found: a forbidden character, misplaced dots or quotes, an
/// unterminated quote or dangling escape, a missing separator, an
/// oversized local part, or an invalid domain.
///
/// # Examples
///
/// ```
/// use pelican_address::parse_email_address;
///
/// let address = parse_email_address("user\\@internal@myhost.ca")?;
/// assert_eq!(address.local_part, "user@internal");
/// assert_eq!(address.domain, "myhost.ca");
/// # Ok::<(), pelican_address::AddressError>(())
/// ```
#[tracing::instrument(level = "trace")]
pub fn parse_email_address(address: &str) -> Result<Address> {
    if address.is_empty() {
        return Err(AddressError::Empty);
    }

    let mut state = State::Start;
    let mut local = String::with_capacity(address.len());
    let mut split = None;

    for (idx, ch) in address.char_indices() {
        state = match state {
            State::Start => match ch {
                '@' if idx == 0 => return Err(AddressError::Empty),
                '@' => return Err(AddressError::LeadingOrTrailingDot),
                '.' if idx == 0 => return Err(AddressError::LeadingOrTrailingDot),
                '.' => return Err(AddressError::DoubledDot),
                '"' if idx == 0 => State::Quoted,
                '"' => return Err(AddressError::EmbeddedQuotedString),
                '\\' => State::Escaped,
                _ if is_atext(ch) => {
                    local.push(ch);
                    State::Normal
                }
                _ => return Err(AddressError::InvalidCharacter(ch)),
            },
            State::Normal => match ch {
                '@' => {
                    split = Some(idx);
                    break;
                }
                '.' => {
                    local.push('.');
                    State::Start
                }
                '"' => return Err(AddressError::EmbeddedQuotedString),
                '\\' => State::Escaped,
                _ if is_atext(ch) => {
                    local.push(ch);
                    State::Normal
                }
                _ => return Err(AddressError::InvalidCharacter(ch)),
            },
            State::Escaped => {
                if !ch.is_ascii() {
                    return Err(AddressError::NonAsciiEscape(ch));
                }
                local.push(ch);
                State::Normal
            }
            State::Quoted => match ch {
                '"' => State::QuotedEnd,
                '\\' => State::QuotedEscaped,
                _ => {
                    local.push(ch);
                    State::Quoted
                }
            },
            State::QuotedEscaped => {
                if !ch.is_ascii() {
                    return Err(AddressError::NonAsciiEscape(ch));
                }
                local.push(ch);
                State::Quoted
            }
            State::QuotedEnd => match ch {
                '@' => {
                    split = Some(idx);
                    break;
                }
                _ => return Err(AddressError::EmbeddedQuotedString),
            },
        };
    }

    let Some(at) = split else {
        return Err(match state {
            State::Escaped => AddressError::DanglingEscape,
            State::Quoted | State::QuotedEscaped => AddressError::UnterminatedQuote,
            State::Start | State::Normal | State::QuotedEnd => {
                AddressError::MissingAtSeparator
            }
        });
    };

    // Length is judged on the wire form, escapes and quotes included.
    if at > MAX_LOCAL_LENGTH {
        return Err(AddressError::LocalTooLong);
    }

    let domain = &address[at + 1..];
    if domain.is_empty() {
        return Err(AddressError::Empty);
    }
    if !is_valid_domain(domain) {
        return Err(AddressError::InvalidDomain(domain.to_string()));
    }

    Ok(Address {
        local_part: local,
        domain: domain.to_string(),
    })
}

/// Render an unescaped local part in transmissible form.
///
/// A local part that is already a valid dot-string is returned borrowed
/// and unchanged. Anything else is wrapped in double quotes with `"`
/// and `\` backslash-escaped, which is enough to round-trip every local
/// part [`parse_email_address`] can produce.
#[must_use]
pub fn escape_local_part(local: &str) -> Cow<'_, str> {
    if is_dot_string(local) {
        return Cow::Borrowed(local);
    }

    let mut quoted = String::with_capacity(local.len() + 2);
    quoted.push('"');
    for ch in local.chars() {
        if matches!(ch, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');

    Cow::Owned(quoted)
}

fn is_dot_string(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('.')
        && !value.ends_with('.')
        && !value.contains("..")
        && value.chars().all(|ch| ch == '.' || is_atext(ch))
}

/// Is the character in the RFC 5321 `atext` set?
#[inline]
#[must_use]
pub const fn is_atext(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '-'
                | '/'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
        )
}
