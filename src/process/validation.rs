/*!
 * Process Parameter Validation
 * Shared checks used by every process kind's constructor and setters
 */

use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::limits::{PRIORITY_MAX, PRIORITY_MIN};
use crate::core::types::Priority;

/// Trim and require a non-empty process name
pub(crate) fn validate_name(name: &str) -> ProcessResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProcessError::InvalidName(
            "process name cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Name rule applied at registration: non-empty and at most `max_len` chars
pub(crate) fn validate_registration_name(name: &str, max_len: usize) -> ProcessResult<String> {
    let trimmed = validate_name(name)?;
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(ProcessError::InvalidName(format!(
            "name is too long ({} characters, max {})",
            len, max_len
        )));
    }
    Ok(trimmed)
}

/// Trim and require a non-empty text field
pub(crate) fn non_empty(field: &str, value: &str) -> ProcessResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProcessError::EmptyField(field.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Require `min <= value <= max`
pub(crate) fn in_range(field: &str, value: i64, min: i64, max: i64) -> ProcessResult<i64> {
    if value < min || value > max {
        return Err(ProcessError::out_of_range(field, value, min, max));
    }
    Ok(value)
}

/// Require `value >= min`
pub(crate) fn at_least(field: &str, value: i64, min: i64) -> ProcessResult<i64> {
    if value < min {
        return Err(ProcessError::below_minimum(field, value, min));
    }
    Ok(value)
}

/// Bounds-check a priority
pub(crate) fn validate_priority(priority: i64) -> ProcessResult<Priority> {
    let value = in_range(
        "priority",
        priority,
        i64::from(PRIORITY_MIN),
        i64::from(PRIORITY_MAX),
    )?;
    Ok(value as Priority)
}
