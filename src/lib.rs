//! Address handling for the Pelican mail sink.
//!
//! Everything a receiving SMTP service needs to decide, at submission
//! time, whether an address is structurally sound and which mailbox it
//! delivers to:
//!
//! - [`parse_email_address`] splits an RFC 5321 `addr-spec` into its
//!   unescaped local part and domain
//! - [`is_valid_domain`] applies hostname rules to the domain on its own
//! - [`parse_mailbox_name`] folds a local part into the mailbox it
//!   routes to, dropping any `+tag` sub-address
//! - [`hash_mailbox_name`] derives the opaque SHA-1 key a mailbox is
//!   stored under
//!
//! Parsing is a single forward pass, no allocation beyond the returned
//! parts, and no I/O. The crate never logs on its own; fallible entry
//! points carry trace-level spans and leave policy to the caller.
//!
//! ```
//! use pelican_address::parse_email_address;
//!
//! let address = parse_email_address("First.Last+invoices@example.com")?;
//! assert_eq!(address.local_part, "First.Last+invoices");
//! assert_eq!(address.domain, "example.com");
//!
//! let mailbox = address.mailbox_name()?;
//! assert_eq!(mailbox.as_str(), "first.last");
//! assert_eq!(
//!     mailbox.storage_key(),
//!     "449131ee05bd2df6a97028db9b11e70858d98ac5"
//! );
//! # Ok::<(), pelican_address::AddressError>(())
//! ```

pub mod address;
pub mod domain;
pub mod error;
pub mod mailbox;

pub use address::{Address, MAX_LOCAL_LENGTH, escape_local_part, is_atext, parse_email_address};
pub use domain::{MAX_DOMAIN_LENGTH, MAX_LABEL_LENGTH, is_valid_domain};
pub use error::{AddressError, Result};
pub use mailbox::{MailboxName, hash_mailbox_name, parse_mailbox_name};
