//! Core domain model types for outline extraction.
//!
//! This module contains the types every other component speaks in:
//! - Block identifiers, page references and the block tree itself
//! - Insertion placements understood by the host
//! - The ephemeral extract record produced during traversal

mod block;
mod extract;
mod placement;

pub use block::{Block, BlockId, PageRef, ID_PROPERTY};
pub use extract::Extract;
pub use placement::Placement;
