//! Contact actions that reach outside the directory.
//!
//! # Responsibility
//! - Build telephony and profile targets for a contact.
//! - Write phone numbers to the clipboard without ever raising to the caller.
//! - Format phone numbers for display.

use crate::model::community::Contact;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static LT_COUNTRY_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+370").expect("valid country prefix regex"));

/// Inserts a space after a leading `+370` country prefix.
///
/// `+37061111111` -> `+370 61111111`; other numbers are returned unchanged.
pub fn display_phone(phone: &str) -> String {
    LT_COUNTRY_PREFIX_RE.replace(phone, "+370 ").into_owned()
}

/// `tel:` URI for the platform telephony handler.
pub fn call_uri(contact: &Contact) -> Option<String> {
    contact.phone.as_deref().map(|phone| format!("tel:{phone}"))
}

/// External social-profile link, opened in a new browsing context.
pub fn profile_link(contact: &Contact) -> Option<&str> {
    contact.facebook.as_deref()
}

/// Clipboard write failure reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardError(pub String);

impl Display for ClipboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "clipboard write failed: {}", self.0)
    }
}

impl Error for ClipboardError {}

/// System clipboard seam.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Outcome of [`copy_phone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Confirmation state should be shown.
    Copied,
    NoPhone,
    /// Logged; the UI shows no confirmation.
    Failed,
}

/// Copies the raw phone number of `contact` to the clipboard.
pub fn copy_phone(contact: &Contact, clipboard: &mut dyn Clipboard) -> CopyOutcome {
    let Some(phone) = contact.phone.as_deref() else {
        return CopyOutcome::NoPhone;
    };

    match clipboard.write_text(phone) {
        Ok(()) => {
            info!(
                "event=clipboard_write module=actions status=ok contact_id={}",
                contact.id
            );
            CopyOutcome::Copied
        }
        Err(err) => {
            warn!(
                "event=clipboard_write module=actions status=error contact_id={} error={}",
                contact.id, err
            );
            CopyOutcome::Failed
        }
    }
}
