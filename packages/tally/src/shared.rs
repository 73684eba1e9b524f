use crate::error::TallyError;

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str, what: &str) -> Result<(), TallyError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(TallyError::Validation(format!(
            "{what} must be 1-256 characters"
        )));
    }
    Ok(())
}

/// Validate that a trimmed value has at least `min` characters.
pub fn validate_min_len(value: &str, min: usize, what: &str) -> Result<(), TallyError> {
    if value.trim().chars().count() < min {
        return Err(TallyError::Validation(format!(
            "{what} must be at least {min} characters"
        )));
    }
    Ok(())
}

/// Validate a reference to another record.
pub fn require_id(id: &str, what: &str) -> Result<(), TallyError> {
    if id.trim().is_empty() {
        return Err(TallyError::Validation(format!("{what} ID is required")));
    }
    Ok(())
}

/// Validate a 1-based display number (candidate no., competition no.).
pub fn validate_number(number: u32, what: &str) -> Result<(), TallyError> {
    if number == 0 {
        return Err(TallyError::Validation(format!("{what} number must be >= 1")));
    }
    Ok(())
}
