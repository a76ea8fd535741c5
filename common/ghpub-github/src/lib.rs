//! GitHub contents API client library
//!
//! This library covers the two calls needed to publish a single file: looking up the
//! current revision of a path on a branch and creating or updating it.
//!
//! ## Modules
//!
//! - [`client`]: Authenticated client bound to one API base
//! - [`contents`]: Lookup and create-or-update of repository files
//! - [`util`]: Content encoding and URL building

mod client;
mod contents;
mod util;

// Re-export public API
pub use client::{ACCEPT_V3, DEFAULT_API_BASE, GitHubClient};
pub use contents::{ContentCommit, ContentLocation, PutContentRequest, WriteOutcome};
pub use util::{contents_url, encode_content};
