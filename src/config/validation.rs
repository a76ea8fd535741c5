//! Repository configuration validation

use super::RepositoryConfig;
use std::collections::HashSet;

/// Enumeration of possible validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Repository id contains whitespace
    InvalidId(String),
    /// Owner is empty
    EmptyOwner(String),
    /// Repository name is empty
    EmptyRepoName(String),
    /// Duplicate repository ids found
    DuplicateId(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidId(id) => {
                write!(f, "Repository id cannot contain whitespace: '{}'", id)
            }
            ValidationError::EmptyOwner(id) => {
                write!(f, "Repository '{}' owner cannot be empty", id)
            }
            ValidationError::EmptyRepoName(id) => {
                write!(f, "Repository '{}' name cannot be empty", id)
            }
            ValidationError::DuplicateId(id) => {
                write!(f, "Duplicate repository id: '{}'", id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a single repository configuration
pub fn validate_repository(repo: &RepositoryConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if repo.id.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidId(repo.id.clone()));
    }

    if repo.owner.trim().is_empty() {
        errors.push(ValidationError::EmptyOwner(repo.id.clone()));
    }

    if repo.repo_name.trim().is_empty() {
        errors.push(ValidationError::EmptyRepoName(repo.id.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a list of repositories, checking for duplicate ids
pub fn validate_repositories(repositories: &[RepositoryConfig]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for repo in repositories {
        if !ids.insert(&repo.id) {
            errors.push(ValidationError::DuplicateId(repo.id.clone()));
        }
    }

    for repo in repositories {
        if let Err(mut repo_errors) = validate_repository(repo) {
            errors.append(&mut repo_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Join validation errors into a single message
pub fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
