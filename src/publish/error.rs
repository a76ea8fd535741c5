//! Publish failure kinds

use thiserror::Error;

/// Terminal failure of a single publish
///
/// The `Display` text of each variant is the notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// Neither the document nor the registry names a destination.
    #[error("No repo specified in frontmatter or default repo set")]
    MissingDestination,

    /// The destination id matches no registry entry.
    #[error("GitHub repo configuration not found for {0}")]
    UnknownRepository(String),

    /// The document could not be read.
    #[error("Error publishing to GitHub: {0}")]
    ContentRead(String),

    /// The API refused the write.
    #[error("Failed to publish: {message}")]
    RemoteWrite { status: u16, message: String },

    /// Anything else: transport failures, unparsable responses, metadata errors.
    #[error("Error publishing to GitHub: {0}")]
    Unexpected(String),
}

impl PublishError {
    /// Wrap an arbitrary error, keeping its context chain in the message
    pub fn unexpected(error: anyhow::Error) -> Self {
        Self::Unexpected(format!("{error:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_texts() {
        assert_eq!(
            PublishError::MissingDestination.to_string(),
            "No repo specified in frontmatter or default repo set"
        );
        assert_eq!(
            PublishError::UnknownRepository("blog".to_string()).to_string(),
            "GitHub repo configuration not found for blog"
        );
        assert_eq!(
            PublishError::RemoteWrite {
                status: 422,
                message: "conflict".to_string()
            }
            .to_string(),
            "Failed to publish: conflict"
        );
        assert_eq!(
            PublishError::Unexpected("connection refused".to_string()).to_string(),
            "Error publishing to GitHub: connection refused"
        );
    }

    #[test]
    fn test_unexpected_keeps_context() {
        let error = anyhow::anyhow!("connection refused").context("Failed to look up note.md");
        assert_eq!(
            PublishError::unexpected(error).to_string(),
            "Error publishing to GitHub: Failed to look up note.md: connection refused"
        );
    }
}
