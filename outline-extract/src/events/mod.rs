//! Run events for observability.
//!
//! A pipeline emits one event when a run starts and one when it ends
//! (completed, empty or failed). Sinks are injected into the pipeline; there is
//! no process-wide sink.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

/// Event type names emitted by the pipeline.
pub mod event_types {
    /// A run resolved its settings and is about to fetch blocks.
    pub const RUN_STARTED: &str = "extraction.started";
    /// A run found nothing to extract.
    pub const RUN_EMPTY: &str = "extraction.empty";
    /// A run created a summary subtree.
    pub const RUN_COMPLETED: &str = "extraction.completed";
    /// A run failed.
    pub const RUN_FAILED: &str = "extraction.failed";
}
