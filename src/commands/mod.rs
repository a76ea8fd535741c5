//! Command implementations behind the CLI

pub mod base;
pub mod ls;
pub mod publish;
pub mod repo;
pub mod validators;

pub use base::{Command, CommandContext};
pub use ls::ListCommand;
pub use publish::PublishCommand;
pub use repo::{AddRepoCommand, DefaultRepoCommand, EditRepoCommand, RemoveRepoCommand};
