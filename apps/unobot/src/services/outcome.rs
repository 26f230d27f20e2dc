//! Structured result of every player action, handed to the messaging side.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{PlayerId, RuleError};

/// Who a message is meant for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Target {
    Channel,
    Caller,
    Mentioned(PlayerId),
}

/// A message delivered to a single recipient, usually privately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub target: Target,
    pub message: String,
}

/// Delayed work the caller must run after delivering the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUp {
    /// Second player joined; deal after the start delay.
    StartRound,
    /// A round was won; deal again after the intermission.
    RestartRound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub success: bool,
    pub log_message: String,
    pub user_message: String,
    pub target: Target,
    pub notices: Vec<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<FollowUp>,
}

impl Outcome {
    pub fn success(log_message: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            success: true,
            log_message: log_message.into(),
            user_message: user_message.into(),
            target: Target::Channel,
            notices: Vec::new(),
            follow_up: None,
        }
    }

    /// Negative outcome for a rule rejection, answered to the caller.
    pub fn rejected(err: &RuleError, context: &str) -> Self {
        Self {
            success: false,
            log_message: format!("{context}: {err}"),
            user_message: err.user_message(),
            target: Target::Caller,
            notices: Vec::new(),
            follow_up: None,
        }
    }

    pub fn to(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_notice(mut self, target: Target, message: impl Into<String>) -> Self {
        self.notices.push(Notice {
            target,
            message: message.into(),
        });
        self
    }

    pub fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = Some(follow_up);
        self
    }

    pub fn failed(mut self) -> Self {
        self.success = false;
        self
    }
}

/// Receives outcomes produced outside a request, i.e. by follow-ups.
#[async_trait]
pub trait OutcomeSink: Send + Sync {
    async fn deliver(&self, guild_id: &str, channel_id: &str, outcome: &Outcome);
}

/// Default sink: one structured log line per outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl OutcomeSink for LogSink {
    async fn deliver(&self, guild_id: &str, channel_id: &str, outcome: &Outcome) {
        if outcome.success {
            info!(
                guild_id,
                channel_id,
                notices = outcome.notices.len(),
                user_message = %outcome.user_message,
                "{}",
                outcome.log_message
            );
        } else {
            warn!(
                guild_id,
                channel_id,
                user_message = %outcome.user_message,
                "{}",
                outcome.log_message
            );
        }
    }
}
