//! Provenance tagging of source blocks.

use crate::core::{Block, BlockId, ID_PROPERTY};
use crate::errors::HostError;
use crate::host::OutlineHost;
use std::collections::HashSet;
use tracing::debug;

/// Stamps source blocks with their own identifier as the `id` property.
///
/// Raw identifiers are not always surfaced by hosts; the property makes them
/// inspectable and queryable so back-reference links resolve. A tagger lives
/// for one run and remembers which blocks it has already handled, so a block
/// that produced several extracts is written at most once.
pub struct ProvenanceTagger<'h, H: ?Sized> {
    host: &'h H,
    seen: HashSet<BlockId>,
    stamped: usize,
}

impl<'h, H: OutlineHost + ?Sized> ProvenanceTagger<'h, H> {
    /// Creates a tagger for one run.
    pub fn new(host: &'h H) -> Self {
        Self {
            host,
            seen: HashSet::new(),
            stamped: 0,
        }
    }

    /// Ensures `block` carries the `id` property.
    ///
    /// Returns true if a property write was issued, false if the block was
    /// already tagged (in its snapshot or earlier in this run).
    pub async fn ensure_id(&mut self, block: &Block) -> Result<bool, HostError> {
        if !self.seen.insert(block.id) || block.has_id_property() {
            return Ok(false);
        }

        debug!(block_id = %block.id, "Stamping provenance id");
        if let Err(err) = self
            .host
            .set_block_property(block.id, ID_PROPERTY, serde_json::json!(block.id.to_string()))
            .await
        {
            self.seen.remove(&block.id);
            return Err(err);
        }
        self.stamped += 1;
        Ok(true)
    }

    /// Number of property writes issued by this tagger.
    pub fn stamped(&self) -> usize {
        self.stamped
    }

    /// Number of distinct blocks seen.
    pub fn distinct_sources(&self) -> usize {
        self.seen.len()
    }
}
