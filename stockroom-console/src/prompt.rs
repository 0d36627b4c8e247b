//! User-facing notices and confirmations

use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Message surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Where the console reports to and asks the user
#[async_trait]
pub trait UserPrompt: Send + Sync {
    fn notify(&self, notice: Notice);

    /// Ask a yes/no question; `false` unless the user agrees
    async fn confirm(&self, question: &str) -> bool;
}

/// Terminal prompt: notices on stderr, confirmations via `dialoguer`
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every confirmation with yes without asking
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }
}

#[async_trait]
impl UserPrompt for TerminalPrompt {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => eprintln!("{notice}"),
            NoticeLevel::Error => eprintln!("error: {notice}"),
        }
    }

    async fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let question = question.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            dialoguer::Confirm::new()
                .with_prompt(question)
                .default(false)
                .interact()
        })
        .await;

        match answer {
            Ok(Ok(confirmed)) => confirmed,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Confirmation prompt failed");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Confirmation task failed");
                false
            }
        }
    }
}
