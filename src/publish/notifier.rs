//! User-facing notices for publish outcomes

use colored::*;
use std::sync::Mutex;

/// Where a publish currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Idle,
    ReadingContent,
    ResolvingConfig,
    CheckingRemote,
    Writing,
    Succeeded,
    Failed,
}

impl PublishStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for PublishStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::ReadingContent => "reading content",
            Self::ResolvingConfig => "resolving configuration",
            Self::CheckingRemote => "checking remote",
            Self::Writing => "writing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Failure,
}

/// Short message shown once a publish ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Failure,
            message: message.into(),
        }
    }
}

/// Receives exactly one terminal notice per publish, plus optional stage updates
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);

    fn progress(&self, _stage: PublishStage) {}
}

/// Prints notices to the terminal
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier {
    verbose: bool,
}

impl ConsoleNotifier {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success => println!("{}", notice.message.green()),
            NoticeLevel::Failure => eprintln!("{}", notice.message.red()),
        }
    }

    fn progress(&self, stage: PublishStage) {
        if self.verbose && !stage.is_terminal() {
            eprintln!("{}", format!("  {stage}...").dimmed());
        }
    }
}

/// Records notices and stages in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
    stages: Mutex<Vec<PublishStage>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    pub fn stages(&self) -> Vec<PublishStage> {
        self.stages
            .lock()
            .map(|stages| stages.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }

    fn progress(&self, stage: PublishStage) {
        if let Ok(mut stages) = self.stages.lock() {
            stages.push(stage);
        }
    }
}
