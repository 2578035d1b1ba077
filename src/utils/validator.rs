//! # Text Input Validation Utilities
//!
//! Email syntax pattern and helpers for turning `validator` failures into
//! client errors.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Email syntax pattern
///
/// The local part allows letters, digits and `._%+-`. The domain allows
/// letters, digits and `.-`, and must end in a top-level segment of at least
/// two letters.
///
/// # Examples
///
/// - `john@example.com` ✓ Valid
/// - `first.last+tag@sub.example.org` ✓ Valid
/// - `bad-email` ✗ Invalid format
/// - `john@example.c` ✗ Invalid format
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Failed to compile email regex")
});

/// Runs the derived `validator` checks on a request payload.
///
/// Field details are logged; the client only sees `Invalid input`.
pub fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|errors| {
        warn!(%errors, "Request payload failed validation");
        AppError::BadRequest("Invalid input".to_string())
    })
}
