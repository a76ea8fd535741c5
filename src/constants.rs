//! Central constants for the ghpub application

/// Default values for publishing
pub mod publish {
    /// Branch used when neither the document nor the repository names one
    pub const FALLBACK_BRANCH: &str = "main";

    /// Prefix of the synthesized commit message, followed by the effective path
    pub const COMMIT_MSG_PREFIX: &str = "Publish:";

    /// Frontmatter keys read from a document
    pub const KEY_REPO: &str = "repo";
    pub const KEY_PATH: &str = "path";
    pub const KEY_BRANCH: &str = "branch";
    pub const KEY_COMMIT: &str = "commit";
}

/// Default values for GitHub operations
pub mod github {
    /// GitHub API base URL
    pub const API_BASE: &str = ghpub_github::DEFAULT_API_BASE;
}

/// Default values for configuration
pub mod config {
    /// Default settings file name
    pub const DEFAULT_CONFIG_FILE: &str = "ghpub.yaml";

    /// Prefix of generated repository ids
    pub const ID_PREFIX: &str = "repo";

    /// Length of the UUID suffix used in generated ids
    pub const UUID_LENGTH: usize = 6;
}
