//! Request shape checks for registration and partial update bodies.

use crate::error::AppError;
use crate::model::{CustomerRegistrationRequest, CustomerUpdateRequest};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email pattern compiles"));

pub struct RequestValidator;

impl RequestValidator {
    /// All registration fields are required; name must be non-blank and email well-formed.
    pub fn validate_registration(request: &CustomerRegistrationRequest) -> Result<(), AppError> {
        validate_name(&request.name)?;
        validate_email(&request.email)
    }

    /// Validate only the fields present in the update. Absent fields are not checked.
    pub fn validate_update(request: &CustomerUpdateRequest) -> Result<(), AppError> {
        if let Some(name) = &request.name {
            validate_name(name)?;
        }
        if let Some(email) = &request.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("name must not be blank".into()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if !EMAIL_RE.is_match(email) {
        return Err(AppError::Validation("email must be a valid email address".into()));
    }
    Ok(())
}
