//! Command argument validation utilities
//!
//! Checks applied after clap parsing, before any settings are touched.

use anyhow::{Result, anyhow};

/// Validation errors for command arguments
#[derive(Debug, PartialEq)]
pub enum CommandValidationError {
    /// Required argument was not provided
    MissingRequired { argument: String },
    /// Invalid argument value
    InvalidValue {
        argument: String,
        value: String,
        reason: String,
    },
}

impl std::fmt::Display for CommandValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandValidationError::MissingRequired { argument } => {
                write!(f, "{} is required", argument)
            }
            CommandValidationError::InvalidValue {
                argument,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for {}: {}", value, argument, reason)
            }
        }
    }
}

impl std::error::Error for CommandValidationError {}

/// Convert validation error to anyhow::Error
pub fn validation_error_to_anyhow(error: CommandValidationError) -> anyhow::Error {
    anyhow!(error.to_string())
}

/// Ensure a required value is not blank
pub fn validate_required(argument: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(validation_error_to_anyhow(
            CommandValidationError::MissingRequired {
                argument: argument.to_string(),
            },
        ));
    }
    Ok(())
}

/// Ensure an optional value, when given, is not blank
pub fn validate_not_blank(argument: &str, value: &Option<String>) -> Result<()> {
    if let Some(v) = value
        && v.trim().is_empty()
    {
        return Err(validation_error_to_anyhow(
            CommandValidationError::InvalidValue {
                argument: argument.to_string(),
                value: v.clone(),
                reason: format!("{argument} cannot be empty or whitespace only"),
            },
        ));
    }
    Ok(())
}

/// Validate a repository id
///
/// Ids are referenced from frontmatter, so they cannot contain whitespace.
pub fn validate_repo_id(id: &Option<String>) -> Result<()> {
    validate_not_blank("repository id", id)?;
    if let Some(id) = id
        && id.chars().any(char::is_whitespace)
    {
        return Err(validation_error_to_anyhow(
            CommandValidationError::InvalidValue {
                argument: "repository id".to_string(),
                value: id.clone(),
                reason: "repository id cannot contain whitespace".to_string(),
            },
        ));
    }
    Ok(())
}

/// Validate branch name
///
/// Ensures branch names follow basic Git naming conventions
pub fn validate_branch_name(branch: &Option<String>) -> Result<()> {
    validate_not_blank("branch", branch)?;
    if let Some(name) = branch
        && (name.starts_with('-') || name.ends_with('.') || name.contains(".."))
    {
        return Err(validation_error_to_anyhow(
            CommandValidationError::InvalidValue {
                argument: "branch".to_string(),
                value: name.clone(),
                reason: "invalid Git branch name format".to_string(),
            },
        ));
    }
    Ok(())
}
