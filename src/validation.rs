use crate::error::AppError;

/// Validates a profile name (user.name)
pub fn validate_input_name(name: &str) -> Result<(), AppError> {
    validate_field("Name", name)
}

/// Validates a profile email (user.email)
pub fn validate_input_email(email: &str) -> Result<(), AppError> {
    validate_field("Email", email)
}

// Git config values are single-line, anything else would not survive a switch.
fn validate_field(label: &str, value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        Err(AppError::Validation(format!("{label} cannot be empty")))
    } else if value.contains(['\n', '\r']) {
        Err(AppError::Validation(format!("{label} cannot contain line breaks")))
    } else {
        Ok(())
    }
}
