//! Pre-submission form validation
//!
//! Pure checks run before any network call. Rules are evaluated in a
//! fixed order and only the first failing rule is reported, so the user
//! sees one specific message at a time.

use thiserror::Error;

/// A failed validation rule, with its user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Username must be at least 3 characters")]
    UsernameTooShort,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please enter a valid email")]
    InvalidEmail,

    #[error("Title is required")]
    MissingTitle,

    #[error("You must be signed in to suggest a book.")]
    NotSignedIn,
}

/// Input to [`validate_registration`]
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validate a registration form.
///
/// Order: presence, username length, password length, password match,
/// email shape.
pub fn validate_registration(form: &RegistrationForm) -> Result<(), ValidationError> {
    if form.username.is_empty()
        || form.email.is_empty()
        || form.password.is_empty()
        || form.confirm_password.is_empty()
    {
        return Err(ValidationError::MissingFields);
    }
    if form.username.chars().count() < 3 {
        return Err(ValidationError::UsernameTooShort);
    }
    if form.password.chars().count() < 8 {
        return Err(ValidationError::PasswordTooShort);
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if !form.email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate new-book metadata. Only the title is required; everything
/// else is optional.
pub fn validate_new_book(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    Ok(())
}

/// Validate a suggestion submission and hand back the bearer token it
/// must carry. Any signed-in user may suggest; the admin flag is not
/// consulted.
pub fn validate_suggestion<'a>(
    title: &str,
    token: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    match token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ValidationError::NotSignedIn),
    }
}

/// Parse a year field. Unparsable input means "not provided", not an
/// error.
pub fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}
