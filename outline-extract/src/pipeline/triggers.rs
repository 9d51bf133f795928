//! Trigger registration and dispatch.
//!
//! Hosts expose two actions: one on a block's context menu and one on a page
//! menu. [`install`] registers both against a [`TriggerSurface`]. The
//! in-crate [`TriggerRegistry`] doubles as the top-level error reporter: a
//! failed run is logged and, when a notice host is configured, reported to the
//! user.

use super::orchestrator::{RunOutcome, SummaryPipeline};
use super::scope::ExtractionScope;
use crate::core::{BlockId, PageRef};
use crate::errors::{ExtractError, Result};
use crate::host::{Notice, OutlineHost};
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info_span, warn, Instrument};

/// Label of both extraction actions.
pub const COMMAND_LABEL: &str = "Extract highlights";

/// Kind of host action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// An entry in a block's context menu.
    BlockAction,
    /// An entry in a page's menu.
    PageAction,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockAction => write!(f, "block_action"),
            Self::PageAction => write!(f, "page_action"),
        }
    }
}

/// What the host knows about where an action was invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerContext {
    /// The block the action was invoked on, for block actions.
    pub block: Option<BlockId>,
    /// The page the action was invoked on, for page actions.
    pub page: Option<PageRef>,
}

impl TriggerContext {
    /// Context of a block action.
    #[must_use]
    pub const fn block(id: BlockId) -> Self {
        Self {
            block: Some(id),
            page: None,
        }
    }

    /// Context of a page action.
    #[must_use]
    pub fn page(page: impl Into<PageRef>) -> Self {
        Self {
            block: None,
            page: Some(page.into()),
        }
    }

    /// Resolves the extraction scope for an action kind.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidTrigger`] when the context lacks the
    /// block (or page) the action needs.
    pub fn scope_for(&self, kind: TriggerKind) -> Result<ExtractionScope> {
        match kind {
            TriggerKind::BlockAction => self
                .block
                .map(ExtractionScope::Block)
                .ok_or_else(|| ExtractError::InvalidTrigger("block action without a block".to_string())),
            TriggerKind::PageAction => self
                .page
                .clone()
                .map(ExtractionScope::Page)
                .ok_or_else(|| ExtractError::InvalidTrigger("page action without a page".to_string())),
        }
    }
}

/// Handler invoked when an action fires.
pub type TriggerHandler =
    Arc<dyn Fn(TriggerContext) -> BoxFuture<'static, Result<RunOutcome>> + Send + Sync>;

/// Where actions are registered.
pub trait TriggerSurface {
    /// Registers a handler for an action kind under a visible label.
    fn register_trigger(&mut self, kind: TriggerKind, label: &str, handler: TriggerHandler);
}

/// Registers the block and page extraction actions for `pipeline`.
pub fn install<H, S>(pipeline: Arc<SummaryPipeline<H>>, surface: &mut S)
where
    H: OutlineHost + ?Sized + 'static,
    S: TriggerSurface + ?Sized,
{
    for kind in [TriggerKind::BlockAction, TriggerKind::PageAction] {
        let pipeline = Arc::clone(&pipeline);
        let handler: TriggerHandler = Arc::new(move |ctx: TriggerContext| {
            let pipeline = Arc::clone(&pipeline);
            async move {
                let scope = ctx.scope_for(kind)?;
                pipeline.run(&scope).await
            }
            .boxed()
        });
        surface.register_trigger(kind, COMMAND_LABEL, handler);
    }
}

struct Registration {
    kind: TriggerKind,
    label: String,
    handler: TriggerHandler,
}

/// In-process trigger surface and top-level error reporter.
#[derive(Default)]
pub struct TriggerRegistry {
    registrations: Vec<Registration>,
    notices: Option<Arc<dyn OutlineHost>>,
}

impl fmt::Debug for TriggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerRegistry")
            .field(
                "registrations",
                &self
                    .registrations
                    .iter()
                    .map(|r| (r.kind, r.label.as_str()))
                    .collect::<Vec<_>>(),
            )
            .field("has_failure_notices", &self.notices.is_some())
            .finish()
    }
}

impl TriggerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports failed runs to the user through `host`, in addition to logging.
    #[must_use]
    pub fn with_failure_notices(mut self, host: Arc<dyn OutlineHost>) -> Self {
        self.notices = Some(host);
        self
    }

    /// Labels registered for an action kind, in registration order.
    #[must_use]
    pub fn labels(&self, kind: TriggerKind) -> Vec<&str> {
        self.registrations
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.label.as_str())
            .collect()
    }

    /// Number of registered actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Fires the action registered under `kind` and `label`.
    ///
    /// Returns the run outcome, or `None` if no such action exists or the run
    /// failed. Failures never escape: they are logged here, and shown to the
    /// user when failure notices are enabled.
    pub async fn fire(
        &self,
        kind: TriggerKind,
        label: &str,
        ctx: TriggerContext,
    ) -> Option<RunOutcome> {
        let Some(registration) = self
            .registrations
            .iter()
            .find(|r| r.kind == kind && r.label == label)
        else {
            warn!(%kind, label, "No action registered");
            return None;
        };

        let span = info_span!("trigger", %kind, label);
        match (registration.handler)(ctx).instrument(span).await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                error!(%kind, label, error = %err, error_kind = err.kind(), "Extraction failed");
                self.report_failure(&err).await;
                None
            }
        }
    }

    async fn report_failure(&self, err: &ExtractError) {
        let Some(host) = &self.notices else {
            return;
        };
        let notice = Notice::error(format!("Extraction failed: {err}"));
        if let Err(notify_err) = host.notify_user(&notice).await {
            error!(error = %notify_err, "Could not show failure notice");
        }
    }
}

impl TriggerSurface for TriggerRegistry {
    fn register_trigger(&mut self, kind: TriggerKind, label: &str, handler: TriggerHandler) {
        self.registrations.push(Registration {
            kind,
            label: label.to_string(),
            handler,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_for_kind() {
        let id = BlockId::new();
        assert_eq!(
            TriggerContext::block(id).scope_for(TriggerKind::BlockAction).unwrap(),
            ExtractionScope::Block(id)
        );
        assert_eq!(
            TriggerContext::page("journal")
                .scope_for(TriggerKind::PageAction)
                .unwrap(),
            ExtractionScope::Page(PageRef::new("journal"))
        );

        let err = TriggerContext::page("journal")
            .scope_for(TriggerKind::BlockAction)
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_trigger");
    }

    #[tokio::test]
    async fn test_unknown_action_returns_none() {
        let registry = TriggerRegistry::new();
        assert!(registry.is_empty());
        assert!(registry
            .fire(TriggerKind::PageAction, COMMAND_LABEL, TriggerContext::page("p"))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_custom_handler_registration() {
        let mut registry = TriggerRegistry::new();
        registry.register_trigger(
            TriggerKind::PageAction,
            "Always empty",
            Arc::new(|_ctx: TriggerContext| async { Ok::<_, ExtractError>(RunOutcome::Empty) }.boxed()),
        );

        assert_eq!(registry.labels(TriggerKind::PageAction), vec!["Always empty"]);
        assert!(registry.labels(TriggerKind::BlockAction).is_empty());

        let outcome = registry
            .fire(TriggerKind::PageAction, "Always empty", TriggerContext::page("p"))
            .await;
        assert_eq!(outcome, Some(RunOutcome::Empty));
    }
}
