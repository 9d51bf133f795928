//! The outline host: block storage, insertion, properties and user notices.
//!
//! The core never owns blocks. Everything it reads or writes goes through
//! [`OutlineHost`], which embedders implement over their own store. An
//! in-memory implementation is provided for tests and local tooling.

mod memory;

pub use memory::InMemoryHost;

use crate::core::{Block, BlockId, PageRef, Placement};
use crate::errors::HostError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How long notices stay visible unless a host decides otherwise.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(3000);

/// Severity of a user notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Operation completed.
    Success,
    /// Neutral information.
    Info,
    /// Nothing went wrong, but nothing happened either.
    Warning,
    /// Operation failed.
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A message shown to the user by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// The message text.
    pub message: String,
    /// Severity.
    pub level: NoticeLevel,
    /// How long the host should keep it visible.
    pub duration: Duration,
}

impl Notice {
    /// Creates a notice with the default duration.
    #[must_use]
    pub fn new(message: impl Into<String>, level: NoticeLevel) -> Self {
        Self {
            message: message.into(),
            level,
            duration: DEFAULT_NOTICE_DURATION,
        }
    }

    /// Creates a success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Success)
    }

    /// Creates a warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Warning)
    }

    /// Creates an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Error)
    }

    /// Sets the display duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Operations the core needs from the outline host.
///
/// Every call is a suspension point. Calls are issued one at a time; the core
/// never runs two of them concurrently for the same run.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutlineHost: Send + Sync {
    /// Fetches a block, with its full descendant tree when `include_descendants` is set.
    async fn get_block_tree(
        &self,
        id: BlockId,
        include_descendants: bool,
    ) -> Result<Block, HostError>;

    /// Fetches a page's top-level blocks, each with its descendants, in order.
    async fn get_page_top_level_blocks(&self, page: &PageRef) -> Result<Vec<Block>, HostError>;

    /// Inserts a block relative to `target` and returns it with its new identifier.
    async fn insert_block(
        &self,
        target: BlockId,
        content: &str,
        placement: Placement,
    ) -> Result<Block, HostError>;

    /// Sets (or replaces) one property of a block.
    async fn set_block_property(
        &self,
        id: BlockId,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), HostError>;

    /// Shows a notice to the user.
    async fn notify_user(&self, notice: &Notice) -> Result<(), HostError>;
}
