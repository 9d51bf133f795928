//! Materialization of extracts as a summary subtree.
//!
//! The assembler inserts one summary root next to the anchor block, then one
//! child per extract in extraction order. It is not transactional: if a host
//! call fails part-way the blocks created so far stay in place and the error
//! propagates.

mod provenance;

pub use provenance::ProvenanceTagger;

use crate::config::ExtractSettings;
use crate::core::{Block, BlockId, Extract, Placement};
use crate::errors::Result;
use crate::extract::normalize;
use crate::host::OutlineHost;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The subtree created by one assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledSummary {
    /// The summary root as returned by the host.
    pub root: Block,
    /// Created children, in insertion order.
    pub children: Vec<Block>,
    /// Distinct source blocks referenced by the extracts.
    pub distinct_sources: usize,
    /// Source blocks that received a provenance tag during this assembly.
    pub tagged_sources: usize,
}

/// Writes extracts into the host as a summary subtree.
pub struct TreeAssembler<'h, H: ?Sized> {
    host: &'h H,
}

impl<'h, H: OutlineHost + ?Sized> TreeAssembler<'h, H> {
    /// Creates an assembler over `host`.
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }

    /// Creates the summary root beside `anchor` and one child per extract.
    ///
    /// `extracts` must not be empty; callers report the empty case to the
    /// user instead of assembling.
    pub async fn assemble(
        &self,
        extracts: &[Extract<'_>],
        anchor: BlockId,
        before: bool,
        settings: &ExtractSettings,
    ) -> Result<AssembledSummary> {
        debug_assert!(!extracts.is_empty(), "assemble called without extracts");

        let placement = Placement::sibling(before);
        let root = self
            .host
            .insert_block(anchor, &settings.summary_title, placement)
            .await?;
        debug!(summary_id = %root.id, anchor = %anchor, %placement, "Created summary root");

        let mut tagger = ProvenanceTagger::new(self.host);
        let mut children = Vec::with_capacity(extracts.len());
        for item in extracts {
            let content = normalize(item.text, item.source_id(), settings);
            tagger.ensure_id(item.source).await?;
            let child = self
                .host
                .insert_block(root.id, &content, Placement::AsChild)
                .await?;
            debug!(child_id = %child.id, source_id = %item.source_id(), "Inserted extract");
            children.push(child);
        }

        info!(
            summary_id = %root.id,
            children = children.len(),
            tagged = tagger.stamped(),
            "Summary assembled"
        );

        Ok(AssembledSummary {
            root,
            children,
            distinct_sources: tagger.distinct_sources(),
            tagged_sources: tagger.stamped(),
        })
    }
}
