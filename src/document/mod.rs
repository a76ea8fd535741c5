//! Documents and the collaborators that read them
//!
//! The publish workflow only needs two things from its host: the full text of a
//! document and the publish fields from its frontmatter. Both are traits so any host
//! (a note vault on disk, an editor buffer, a test fixture) can supply them.

pub mod frontmatter;

pub use frontmatter::{DocumentMetadata, parse_frontmatter, split_frontmatter};

use anyhow::{Context, Result, anyhow};
use colored::*;
use std::path::{Path, PathBuf};

/// A document to publish, identified by its path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name including extension, used as the default remote path
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Supplies a document's full text
pub trait DocumentStore: Send + Sync {
    /// # Errors
    /// Returns an error if the document cannot be read.
    fn read_content(&self, document: &Document) -> Result<String>;
}

/// Supplies a document's parsed frontmatter
pub trait MetadataSource: Send + Sync {
    /// Metadata for `document`, whose text was already read as `content`
    ///
    /// `Ok(None)` when the document has no usable metadata block.
    fn frontmatter(&self, document: &Document, content: &str) -> Result<Option<DocumentMetadata>>;
}

/// Documents stored as files, optionally relative to a vault directory
#[derive(Debug, Clone, Default)]
pub struct FsVault {
    root: Option<PathBuf>,
}

impl FsVault {
    /// Resolve document paths as given
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative document paths against `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, document: &Document) -> PathBuf {
        match &self.root {
            Some(root) if document.path().is_relative() => root.join(document.path()),
            _ => document.path().to_path_buf(),
        }
    }
}

impl DocumentStore for FsVault {
    fn read_content(&self, document: &Document) -> Result<String> {
        let path = self.resolve(document);
        if path.is_dir() {
            return Err(anyhow!("{} is a directory", path.display()));
        }
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

impl MetadataSource for FsVault {
    /// Malformed frontmatter yields `Ok(None)` with a warning, like a host cache that
    /// indexes nothing for an unparsable block
    fn frontmatter(&self, document: &Document, content: &str) -> Result<Option<DocumentMetadata>> {
        match parse_frontmatter(content) {
            Ok(metadata) => Ok(metadata),
            Err(e) => {
                eprintln!(
                    "{} | {}",
                    document.name().cyan().bold(),
                    format!("Ignoring frontmatter: {e:#}").yellow()
                );
                Ok(None)
            }
        }
    }
}
