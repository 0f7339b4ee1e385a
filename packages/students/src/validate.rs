//! Field validation shared by the server and the client controller.
//!
//! The server re-validates every write independently of client-side checks, so
//! payloads sent straight at the API get the same treatment as form input.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// `local@domain.tld` shape. Deliberately not full RFC 5322.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,
    #[error("Course must not be empty")]
    EmptyCourse,
    #[error("Email must look like local@domain.tld")]
    InvalidEmail,
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validates the writable fields of a student record.
///
/// # Errors
///
/// * If `name` or `course` is empty or whitespace-only
/// * If `email` does not match the `local@domain.tld` shape
pub fn validate_student(name: &str, email: &str, course: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if course.trim().is_empty() {
        return Err(ValidationError::EmptyCourse);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}
