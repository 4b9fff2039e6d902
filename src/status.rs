//! Canonical status-text lookup.
//!
//! The dispatcher recomputes a response's `status_text` from its (possibly
//! defaulted) numeric status on every dispatch. This module provides the
//! default lookup; a different one can be injected via
//! [`Dispatcher::set_status_text`](crate::dispatcher::Dispatcher::set_status_text).

use http::StatusCode;

/// Fallback text for codes outside the IANA registry.
pub const UNKNOWN_STATUS: &str = "Unknown Status";

/// Canonical reason phrase for a numeric HTTP status code.
///
/// Unknown or out-of-range codes yield [`UNKNOWN_STATUS`] rather than an
/// error, so the lookup is total.
///
/// # Example
///
/// ```
/// assert_eq!(mockroute::status_text(200), "OK");
/// assert_eq!(mockroute::status_text(404), "Not Found");
/// assert_eq!(mockroute::status_text(799), "Unknown Status");
/// ```
#[must_use]
pub fn status_text(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or(UNKNOWN_STATUS)
}
