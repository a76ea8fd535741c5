//! Configuration management module

pub mod builder;
pub mod loader;
pub mod registry;
pub mod repository;
pub mod store;
pub mod validation;

pub use builder::RepositoryConfigBuilder;
pub use loader::PublishSettings;
pub use registry::{RegistryError, RepositoryRegistry};
pub use repository::RepositoryConfig;
pub use store::{MemorySettingsStore, SettingsStore, YamlSettingsStore};
