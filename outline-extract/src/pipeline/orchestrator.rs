//! The summary pipeline: one run per trigger.

use super::scope::ExtractionScope;
use crate::assemble::TreeAssembler;
use crate::config::{ConfigSource, RunConfig};
use crate::core::{BlockId, Extract, PageRef, Placement};
use crate::errors::{ExtractError, Result};
use crate::events::{event_types, EventSink, NoOpEventSink};
use crate::extract::extract;
use crate::host::{Notice, OutlineHost};
use crate::observability::{RunSpanAttributes, SpanTimer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Notice shown when a run finds no matches.
pub const NOTHING_TO_EXTRACT: &str = "Nothing to extract";

/// Notice shown when a summary was created.
pub const EXTRACTION_COMPLETED: &str = "Extraction completed!";

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// The scope the run extracted from.
    pub scope: ExtractionScope,
    /// The created summary root.
    pub summary_id: BlockId,
    /// The block the summary was placed against.
    pub anchor_id: BlockId,
    /// Placement of the summary relative to the anchor.
    pub placement: Placement,
    /// Number of extracts, equal to the number of child blocks created.
    pub extracts: usize,
    /// Distinct source blocks referenced.
    pub distinct_sources: usize,
    /// Source blocks that received a provenance tag.
    pub tagged_sources: usize,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// Wall time of the run in milliseconds.
    pub duration_ms: f64,
}

/// Result of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "report", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Nothing matched; the user was told and nothing was written.
    Empty,
    /// A summary subtree was created.
    Completed(ExtractionReport),
}

impl RunOutcome {
    /// Returns true if nothing was extracted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The report of a completed run.
    #[must_use]
    pub const fn report(&self) -> Option<&ExtractionReport> {
        match self {
            Self::Empty => None,
            Self::Completed(report) => Some(report),
        }
    }
}

/// Extracts matches from a scope and writes them as a summary subtree.
///
/// Settings are loaded and the pattern compiled at the start of every run, so
/// changes made between triggers take effect on the next one.
pub struct SummaryPipeline<H: ?Sized> {
    host: Arc<H>,
    config: Arc<dyn ConfigSource>,
    events: Arc<dyn EventSink>,
}

impl<H: ?Sized> std::fmt::Debug for SummaryPipeline<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryPipeline").finish_non_exhaustive()
    }
}

impl<H: OutlineHost + ?Sized> SummaryPipeline<H> {
    /// Creates a pipeline over a host and a settings source.
    pub fn new(host: Arc<H>, config: Arc<dyn ConfigSource>) -> Self {
        Self {
            host,
            config,
            events: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// The host this pipeline writes to.
    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Extracts from a block and its descendants.
    pub async fn run_block(&self, id: BlockId) -> Result<RunOutcome> {
        self.run(&ExtractionScope::Block(id)).await
    }

    /// Extracts from every block of a page.
    pub async fn run_page(&self, page: PageRef) -> Result<RunOutcome> {
        self.run(&ExtractionScope::Page(page)).await
    }

    /// Runs one extraction over `scope`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid pattern or settings, and on any host failure. Host
    /// failures during assembly leave the partially built summary in place.
    pub async fn run(&self, scope: &ExtractionScope) -> Result<RunOutcome> {
        let timer = SpanTimer::start();
        let mut attrs = RunSpanAttributes::new(scope.kind(), scope.target());

        match self.execute(scope, &mut attrs, &timer).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!(scope = %scope, error = %err, kind = err.kind(), "Extraction run failed");
                self.events
                    .emit(
                        event_types::RUN_FAILED,
                        Some(attrs.payload(json!({
                            "error": err.to_dict(),
                            "duration_ms": timer.elapsed_ms(),
                        }))),
                    )
                    .await;
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        scope: &ExtractionScope,
        attrs: &mut RunSpanAttributes,
        timer: &SpanTimer,
    ) -> Result<RunOutcome> {
        let started_at = Utc::now();
        let run = RunConfig::resolve(self.config.load().await?)?;
        let settings = &run.settings;
        attrs.expr = Some(settings.expr.clone());
        self.events
            .emit(event_types::RUN_STARTED, Some(attrs.payload(json!({}))))
            .await;

        let resolved = scope.resolve(&*self.host, settings.keep_summary_above).await?;
        let extracts: Vec<Extract<'_>> = extract(&resolved.roots, &run.pattern).collect();
        debug!(scope = %scope, roots = resolved.roots.len(), extracts = extracts.len(), "Extraction pass finished");

        if extracts.is_empty() {
            info!(scope = %scope, "Nothing to extract");
            self.host.notify_user(&Notice::warning(NOTHING_TO_EXTRACT)).await?;
            self.events
                .emit(
                    event_types::RUN_EMPTY,
                    Some(attrs.payload(json!({ "duration_ms": timer.elapsed_ms() }))),
                )
                .await;
            return Ok(RunOutcome::Empty);
        }

        let anchor = resolved
            .anchor
            .ok_or_else(|| ExtractError::MissingAnchor(scope.to_string()))?;
        let summary = TreeAssembler::new(&*self.host)
            .assemble(&extracts, anchor, settings.keep_summary_above, settings)
            .await?;
        self.host.notify_user(&Notice::success(EXTRACTION_COMPLETED)).await?;

        let report = ExtractionReport {
            scope: scope.clone(),
            summary_id: summary.root.id,
            anchor_id: anchor,
            placement: Placement::sibling(settings.keep_summary_above),
            extracts: extracts.len(),
            distinct_sources: summary.distinct_sources,
            tagged_sources: summary.tagged_sources,
            started_at,
            finished_at: Utc::now(),
            duration_ms: timer.elapsed_ms(),
        };
        info!(
            scope = %scope,
            summary_id = %report.summary_id,
            extracts = report.extracts,
            "Extraction completed"
        );
        self.events
            .emit(
                event_types::RUN_COMPLETED,
                Some(attrs.payload(json!({
                    "summary_id": report.summary_id.to_string(),
                    "placement": report.placement,
                    "extracts": report.extracts,
                    "distinct_sources": report.distinct_sources,
                    "tagged_sources": report.tagged_sources,
                    "duration_ms": report.duration_ms,
                }))),
            )
            .await;

        Ok(RunOutcome::Completed(report))
    }
}
