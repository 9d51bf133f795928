//! # Outline Extract
//!
//! Extracts marked fragments (highlights, bold spans, or anything a regular
//! expression selects) from an outline of blocks and writes them back as a
//! summary subtree next to their source.
//!
//! The crate is organised around a small number of pieces:
//!
//! - **Extraction**: a lazy pre-order walk that yields every match per block
//! - **Normalization**: delimiter stripping and back-reference links
//! - **Assembly**: the summary root and one child per extract, with provenance tags
//! - **Pipeline**: block- and page-scoped runs sharing a single orchestrator
//! - **Host traits**: the outline store, settings source and trigger surface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use outline_extract::prelude::*;
//! use std::sync::Arc;
//!
//! let host = Arc::new(InMemoryHost::new());
//! let block = Block::new("Keep ==this== and **that**");
//! host.add_page("reading", vec![block.clone()]);
//!
//! let pipeline = SummaryPipeline::new(host.clone(), Arc::new(ExtractSettings::default()));
//! let outcome = pipeline.run_block(block.id).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod assemble;
pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod extract;
pub mod host;
pub mod observability;
pub mod pipeline;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::assemble::{AssembledSummary, ProvenanceTagger, TreeAssembler};
    pub use crate::config::{
        settings_schema, ConfigSource, ExtractSettings, JsonFileSource, RunConfig, SettingsMap,
    };
    pub use crate::core::{Block, BlockId, Extract, PageRef, Placement};
    pub use crate::errors::{ExtractError, HostError};
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::extract::{extract, normalize};
    pub use crate::host::{InMemoryHost, Notice, NoticeLevel, OutlineHost};
    pub use crate::pipeline::{
        install, ExtractionReport, ExtractionScope, RunOutcome, SummaryPipeline,
        TriggerContext, TriggerKind, TriggerRegistry, TriggerSurface,
    };
}
