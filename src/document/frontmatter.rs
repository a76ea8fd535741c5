//! Frontmatter extraction and the publish-relevant fields it carries

use crate::constants::publish::{KEY_BRANCH, KEY_COMMIT, KEY_PATH, KEY_REPO};
use anyhow::{Context, Result, bail};
use serde_yaml::{Mapping, Value};

/// Publish fields read from a document's frontmatter
///
/// Blank values are stored as `None`, so "absent" and "empty" resolve the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub repo: Option<String>,
    pub path: Option<String>,
    pub branch: Option<String>,
    pub commit: Option<String>,
}

impl DocumentMetadata {
    /// Pick the four publish keys out of a parsed frontmatter mapping
    pub fn from_mapping(mapping: &Mapping) -> Self {
        Self {
            repo: scalar_field(mapping, KEY_REPO),
            path: scalar_field(mapping, KEY_PATH),
            branch: scalar_field(mapping, KEY_BRANCH),
            commit: scalar_field(mapping, KEY_COMMIT),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Stringify scalar values; lists and maps are not usable as publish fields
fn scalar_field(mapping: &Mapping, key: &str) -> Option<String> {
    let value = match mapping.get(key)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };

    if value.is_empty() { None } else { Some(value) }
}

/// Return the raw YAML between the opening `---` line and the closing `---` or `...` line
///
/// The opening delimiter must be the very first line. An unterminated block is not
/// frontmatter.
pub fn split_frontmatter(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end_matches(['\r', '\n']) != "---" {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed == "---" || trimmed == "..." {
            return Some(&content[start..offset]);
        }
        offset += line.len();
    }

    None
}

/// Parse the publish fields out of a document's text
///
/// Returns `Ok(None)` when the document has no frontmatter block.
///
/// # Errors
/// Returns an error if the block is not valid YAML or is not a mapping.
pub fn parse_frontmatter(content: &str) -> Result<Option<DocumentMetadata>> {
    let Some(block) = split_frontmatter(content) else {
        return Ok(None);
    };

    let value: Value = serde_yaml::from_str(block).context("Invalid frontmatter YAML")?;

    match value {
        Value::Null => Ok(Some(DocumentMetadata::default())),
        Value::Mapping(mapping) => Ok(Some(DocumentMetadata::from_mapping(&mapping))),
        _ => bail!("Frontmatter is not a key-value mapping"),
    }
}
