//! Utility functions for contents API operations

use anyhow::{Context, Result, anyhow};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Url;

use crate::contents::ContentLocation;

/// Encode document text the way the contents API expects it: UTF-8 bytes, standard base64
pub fn encode_content(content: &str) -> String {
    STANDARD.encode(content.as_bytes())
}

/// Build the contents endpoint URL for a location, without the `ref` query
///
/// Each `/`-separated piece of the path becomes one percent-encoded segment, so `#`, `?`
/// and spaces stay part of the file name.
///
/// # Errors
/// Returns an error if `api_base` is not an absolute http(s) URL.
pub fn contents_url(api_base: &str, location: &ContentLocation<'_>) -> Result<Url> {
    let mut url =
        Url::parse(api_base).with_context(|| format!("Invalid API base URL: {api_base}"))?;

    url.path_segments_mut()
        .map_err(|_| anyhow!("API base URL cannot hold a path: {api_base}"))?
        .pop_if_empty()
        .extend(["repos", location.owner, location.repo, "contents"])
        .extend(location.path.split('/').filter(|segment| !segment.is_empty()));

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii() {
        assert_eq!(encode_content("hello"), "aGVsbG8=");
    }

    #[test]
    fn test_encode_multibyte() {
        assert_eq!(encode_content("é"), "w6k=");
        assert_eq!(encode_content(""), "");
    }

    fn url_for(api_base: &str, path: &str) -> String {
        let location = ContentLocation::new("me", "site", path, "main");
        contents_url(api_base, &location).unwrap().to_string()
    }

    #[test]
    fn test_contents_url() {
        assert_eq!(
            url_for("https://api.github.com/", "posts/note.md"),
            "https://api.github.com/repos/me/site/contents/posts/note.md"
        );
    }

    #[test]
    fn test_contents_url_leading_slash() {
        assert_eq!(
            url_for("https://api.github.com", "/note.md"),
            "https://api.github.com/repos/me/site/contents/note.md"
        );
    }

    #[test]
    fn test_contents_url_keeps_enterprise_prefix() {
        assert_eq!(
            url_for("https://ghe.example.com/api/v3", "note.md"),
            "https://ghe.example.com/api/v3/repos/me/site/contents/note.md"
        );
    }

    #[test]
    fn test_contents_url_encodes_reserved_characters() {
        assert_eq!(
            url_for("https://api.github.com", "notes/C# tips.md"),
            "https://api.github.com/repos/me/site/contents/notes/C%23%20tips.md"
        );
        assert_eq!(
            url_for("https://api.github.com", "What?.md"),
            "https://api.github.com/repos/me/site/contents/What%3F.md"
        );
        assert_eq!(
            url_for("https://api.github.com", "100%.md"),
            "https://api.github.com/repos/me/site/contents/100%25.md"
        );
    }

    #[test]
    fn test_contents_url_rejects_bad_base() {
        let location = ContentLocation::new("me", "site", "note.md", "main");
        assert!(contents_url("not a url", &location).is_err());
    }
}
