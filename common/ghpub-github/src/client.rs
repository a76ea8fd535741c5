//! GitHub client implementation

use reqwest::RequestBuilder;

/// Public GitHub REST endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Media type requested on every call
pub const ACCEPT_V3: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = concat!("ghpub/", env!("CARGO_PKG_VERSION"));

/// GitHub API client for making authenticated requests against a single API base
#[derive(Clone)]
pub struct GitHubClient {
    pub(crate) client: reqwest::Client,
    pub(crate) token: String,
    pub(crate) api_base: String,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl GitHubClient {
    /// Create a client for api.github.com authenticated with a personal access token
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_base(token, DEFAULT_API_BASE)
    }

    /// Create a client for a custom API base (GitHub Enterprise, test servers)
    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            api_base,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Attach the headers every contents call carries
    pub(crate) fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", ACCEPT_V3)
            .header("User-Agent", USER_AGENT)
    }
}
