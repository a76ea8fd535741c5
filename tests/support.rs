//! Common test support utilities and fixtures

#![allow(dead_code)]

use ghpub::config::{PublishSettings, RepositoryConfigBuilder};
use std::{fs, path::PathBuf, process::Command};
use tempfile::TempDir;

/// Result of running the CLI binary
#[derive(Debug)]
pub struct CliOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// A temporary vault directory with its own settings file
pub struct Workspace {
    pub root: TempDir,
    pub config_path: PathBuf,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let config_path = root.path().join("ghpub.yaml");
        Self { root, config_path }
    }

    pub fn path(&self) -> &std::path::Path {
        self.root.path()
    }

    pub fn config_str(&self) -> &str {
        self.config_path.to_str().expect("Config path not UTF-8")
    }

    pub fn vault_str(&self) -> &str {
        self.path().to_str().expect("Vault path not UTF-8")
    }

    /// Write a note relative to the workspace root
    pub fn write_note(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create note directory");
        }
        fs::write(path, content).expect("Failed to write note");
    }

    pub fn save_settings(&self, settings: &PublishSettings) {
        settings
            .save(&self.config_path)
            .expect("Failed to save settings");
    }

    pub fn load_settings(&self) -> PublishSettings {
        PublishSettings::load(&self.config_path)
            .expect("Failed to load settings")
            .expect("Settings file missing")
    }
}

/// Settings with a single `blog` entry (me/site, token `secret`) pointed at `api_base`
pub fn blog_settings(api_base: &str, default: bool) -> PublishSettings {
    let mut settings = PublishSettings::new();
    settings.api_base = api_base.to_string();
    settings.repos.push(
        RepositoryConfigBuilder::new("me", "site")
            .with_id("blog")
            .with_token("secret")
            .build(),
    );
    if default {
        settings.default_repo = "blog".to_string();
    }
    settings
}

/// Run the ghpub binary with the given arguments
pub fn run_cli(args: &[&str]) -> CliOutput {
    let output = Command::new(env!("CARGO_BIN_EXE_ghpub"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute ghpub");

    CliOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
