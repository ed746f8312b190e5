//! Local form checks
//!
//! Run before any request goes out, so a malformed field never reaches the
//! resolver or the backend.

use thiserror::Error;

/// Shortest passcode the resolver accepts
pub const MIN_PASSCODE_LEN: usize = 6;

/// Shortest account password
pub const MIN_PASSWORD_LEN: usize = 6;

/// Fewest digits in a phone number
pub const MIN_PHONE_DIGITS: usize = 10;

/// A form field that failed its local check
///
/// The display strings are the messages shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Passcode shorter than [`MIN_PASSCODE_LEN`]
    #[error("passcode must be at least 6 characters")]
    PasscodeTooShort,

    /// Passcode with something other than digits
    #[error("passcode may only contain digits")]
    PasscodeNotNumeric,

    /// Email without a single `@` and a dotted domain
    #[error("email address is not valid")]
    InvalidEmail,

    /// Password shorter than [`MIN_PASSWORD_LEN`]
    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    /// Phone number that is not at least [`MIN_PHONE_DIGITS`] digits
    #[error("phone number must have at least 10 digits")]
    InvalidPhone,
}

/// Passcode typed at resolution time
///
/// # Errors
///
/// Returns [`ValidationError::PasscodeTooShort`].
pub fn passcode(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < MIN_PASSCODE_LEN {
        return Err(ValidationError::PasscodeTooShort);
    }
    Ok(())
}

/// Passcode chosen when registering a domain; digits only
///
/// # Errors
///
/// Returns [`ValidationError::PasscodeTooShort`] or [`ValidationError::PasscodeNotNumeric`].
pub fn new_passcode(value: &str) -> Result<(), ValidationError> {
    passcode(value)?;
    if !value.trim().chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasscodeNotNumeric);
    }
    Ok(())
}

/// Something `@` something `.` something, with no whitespace
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`].
pub fn email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };

    let dotted = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    let clean = !value.chars().any(char::is_whitespace) && !domain.contains('@');

    if local.is_empty() || !dotted || !clean {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Account password
///
/// # Errors
///
/// Returns [`ValidationError::PasswordTooShort`].
pub fn password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Digits with an optional leading `+`
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPhone`].
pub fn phone(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let digits = value.strip_prefix('+').unwrap_or(value);

    if digits.len() < MIN_PHONE_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}
