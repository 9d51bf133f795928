//! Extraction pipeline: scopes, the orchestrator and trigger wiring.
//!
//! Both entry points (block and page) share one [`SummaryPipeline`]; they
//! differ only in how [`ExtractionScope`] resolves roots and the anchor.

mod orchestrator;
mod scope;
mod triggers;


pub use orchestrator::{
    ExtractionReport, RunOutcome, SummaryPipeline, EXTRACTION_COMPLETED, NOTHING_TO_EXTRACT,
};
pub use scope::ExtractionScope;
pub use triggers::{
    install, TriggerContext, TriggerHandler, TriggerKind, TriggerRegistry, TriggerSurface,
    COMMAND_LABEL,
};
