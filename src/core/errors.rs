/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process and registry errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Invalid process name: {0}")]
    #[diagnostic(
        code(process::invalid_name),
        help("Process names must be non-empty after trimming and within the configured length.")
    )]
    InvalidName(String),

    #[error("{0} cannot be empty")]
    #[diagnostic(
        code(process::empty_field),
        help("Provide a value containing at least one non-whitespace character.")
    )]
    EmptyField(String),

    #[error("{field} must be between {min} and {max}. Received: {value}")]
    #[diagnostic(code(process::out_of_range))]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("{field} must be at least {min}. Received: {value}")]
    #[diagnostic(code(process::below_minimum))]
    BelowMinimum {
        field: String,
        value: String,
        min: String,
    },

    #[error("Invalid {field}: {value}. Valid values: {valid}")]
    #[diagnostic(code(process::invalid_choice))]
    InvalidChoice {
        field: String,
        value: String,
        valid: String,
    },

    #[error("A process with PID {0} is already registered")]
    #[diagnostic(
        code(registry::duplicate_pid),
        help("PIDs are allocated by the registry. Use ProcessRegistry::register instead.")
    )]
    DuplicatePid(Pid),

    #[error("PID space exhausted")]
    #[diagnostic(
        code(registry::pids_exhausted),
        help("PIDs are never reused. Start a private allocator at a lower pid_start.")
    )]
    PidsExhausted,

    #[error("Process {0} not found")]
    #[diagnostic(
        code(registry::not_found),
        help("The process may have been removed or never registered.")
    )]
    NotFound(Pid),

    #[error("Process {pid} is a {actual} process, expected {expected}")]
    #[diagnostic(code(process::wrong_kind))]
    WrongKind {
        pid: Pid,
        expected: String,
        actual: String,
    },

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(config::invalid),
        help("Check the PROCSIM_* environment variables.")
    )]
    InvalidConfig(String),
}

impl ProcessError {
    pub(crate) fn out_of_range(
        field: &str,
        value: impl fmt::Display,
        min: impl fmt::Display,
        max: impl fmt::Display,
    ) -> Self {
        Self::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub(crate) fn below_minimum(
        field: &str,
        value: impl fmt::Display,
        min: impl fmt::Display,
    ) -> Self {
        Self::BelowMinimum {
            field: field.to_string(),
            value: value.to_string(),
            min: min.to_string(),
        }
    }

    pub(crate) fn invalid_choice(field: &str, value: &str, valid: &[&str]) -> Self {
        Self::InvalidChoice {
            field: field.to_string(),
            value: value.to_string(),
            valid: valid.join(", "),
        }
    }

    /// Whether the error was raised by parameter validation
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidName(_)
                | Self::EmptyField(_)
                | Self::OutOfRange { .. }
                | Self::BelowMinimum { .. }
                | Self::InvalidChoice { .. }
        )
    }
}
