//! Mailbox-name normalization and storage keys.
//!
//! A mailbox name is the internal, address-book-style identifier a
//! message is routed to: the local part of an address with any
//! `+tag` sub-address stripped and ASCII letters folded to lowercase.
//! It accepts a much narrower grammar than a full RFC 5321 local part:
//! no quoting, no escaping, printable ASCII only.
//!
//! Storage backends never see the name directly; they see its SHA-1
//! digest ([`hash_mailbox_name`]), which is stable, filesystem-safe, and
//! free of case or sub-address aliasing. The digest is an opaque key,
//! not a security boundary.

use std::{
    fmt::{self, Display},
    ops::Deref,
};

use hex::encode;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::error::{AddressError, Result};

/// A normalized mailbox name: lowercase, sub-address tag removed.
///
/// Values can only be obtained through [`parse_mailbox_name`], so holding
/// a `MailboxName` is proof the contained string has been screened and
/// folded.
///
/// # Examples
///
/// ```
/// use pelican_address::parse_mailbox_name;
///
/// let name = parse_mailbox_name("Postmaster+alerts")?;
/// assert_eq!(name.as_str(), "postmaster");
/// # Ok::<(), pelican_address::AddressError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MailboxName(String);

impl MailboxName {
    /// Get the normalized name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the name into the inner `String`
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The key this mailbox is stored under: the lowercase hex SHA-1
    /// digest of the normalized name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pelican_address::parse_mailbox_name;
    ///
    /// let name = parse_mailbox_name("mail")?;
    /// assert_eq!(
    ///     name.storage_key(),
    ///     "1d6e1cf70ec6f9ab28d3ea4b27a49a77654d370e"
    /// );
    /// # Ok::<(), pelican_address::AddressError>(())
    /// ```
    #[must_use]
    pub fn storage_key(&self) -> String {
        hash_mailbox_name(&self.0)
    }
}

impl Display for MailboxName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MailboxName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for MailboxName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<MailboxName> for String {
    fn from(name: MailboxName) -> Self {
        name.0
    }
}

/// Normalize a bare mailbox identifier (no domain) for inbox routing.
///
/// Applies, in order: reject empty input; reject any character outside
/// printable ASCII or equal to `"` or `@`; truncate at the first `+`
/// (the sub-address tag is discarded, not inspected); fold ASCII letters
/// to lowercase.
///
/// # Errors
///
/// Returns [`AddressError::Empty`] for empty input and
/// [`AddressError::InvalidCharacter`] for the first character outside
/// the permitted set.
#[tracing::instrument(level = "trace")]
pub fn parse_mailbox_name(raw: &str) -> Result<MailboxName> {
    if raw.is_empty() {
        return Err(AddressError::Empty);
    }

    for ch in raw.chars() {
        if !is_mailbox_char(ch) {
            return Err(AddressError::InvalidCharacter(ch));
        }
    }

    // "user+spam" routes to the "user" mailbox.
    let base = raw.split_once('+').map_or(raw, |(base, _tag)| base);

    Ok(MailboxName(base.to_ascii_lowercase()))
}

/// Hash a mailbox name into its opaque storage key.
///
/// Computes the SHA-1 digest of the UTF-8 bytes of `name` and renders it
/// as 40 lowercase hex digits. Defined for every string, including the
/// empty one, and stable across runs: equal names always map to the same
/// key.
///
/// # Examples
///
/// ```
/// use pelican_address::hash_mailbox_name;
///
/// assert_eq!(
///     hash_mailbox_name("mail"),
///     "1d6e1cf70ec6f9ab28d3ea4b27a49a77654d370e"
/// );
/// ```
#[must_use]
pub fn hash_mailbox_name(name: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(name.as_bytes());
    encode(hasher.finalize())
}

/// Printable ASCII, minus the double quote and `@` (either would make
/// the name ambiguous as a bare identifier).
#[inline]
const fn is_mailbox_char(ch: char) -> bool {
    ch.is_ascii_graphic() && !matches!(ch, '"' | '@')
}
