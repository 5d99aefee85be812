//! Submission checks performed before any configuration lookup or I/O.

use crate::error::{ContactError, ContactResult};
use crate::models::ContactSubmission;
use regex::Regex;
use std::sync::LazyLock;

/// Something without whitespace or `@`, an `@`, then a dotted domain part.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Rejects blank fields first, then a malformed address.
pub fn validate_submission(submission: &ContactSubmission) -> ContactResult<()> {
    let blank = |value: &str| value.trim().is_empty();

    if blank(&submission.name) || blank(&submission.email) || blank(&submission.message) {
        return Err(ContactError::MissingFields);
    }

    if !is_valid_email(&submission.email) {
        return Err(ContactError::InvalidEmail);
    }

    Ok(())
}
