use garde::Validate;

use crate::error::{AppError, Result};

/// Maximum accepted password length in bytes.
pub const MAX_PASSWORD_LEN: usize = 128;

/// Shape rules for an email/password pair.
#[derive(Validate, Debug)]
pub struct CredentialRules<'a> {
    #[garde(email, length(max = 255))]
    pub email: &'a str,
    #[garde(length(min = 1, max = 128))]
    pub password: &'a str,
}

/// Validates the email/password pair submitted to signup and login.
///
/// Missing fields come first so the client sees the same message for an
/// absent and an empty field.
pub fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("Email and Password Required".to_string()));
    }

    CredentialRules { email, password }
        .validate()
        .map_err(|report| AppError::Validation(report.to_string().trim().to_string()))
}

/// Validates the fields submitted to `set-user-info`.
pub fn validate_profile(username: &str, full_name: &str, description: &str) -> Result<()> {
    if username.trim().is_empty() || full_name.trim().is_empty() || description.trim().is_empty() {
        return Err(AppError::Validation(
            "Username, Full Name and description should be included.".to_string(),
        ));
    }

    if username.len() > 255 {
        return Err(AppError::Validation(
            "Username must be at most 255 characters".to_string(),
        ));
    }

    Ok(())
}
