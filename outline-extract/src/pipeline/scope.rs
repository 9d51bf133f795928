//! Extraction scopes: which roots to walk and where to put the summary.

use crate::core::{Block, BlockId, PageRef};
use crate::errors::HostError;
use crate::host::OutlineHost;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a run extracts from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "target", rename_all = "snake_case")]
pub enum ExtractionScope {
    /// A block and all of its descendants; the summary sits next to that block.
    Block(BlockId),
    /// Every top-level block of a page with their descendants; the summary
    /// sits before the first or after the last top-level block.
    Page(PageRef),
}

impl ExtractionScope {
    /// `block` or `page`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Block(_) => "block",
            Self::Page(_) => "page",
        }
    }

    /// The block id or page name, as text.
    #[must_use]
    pub fn target(&self) -> String {
        match self {
            Self::Block(id) => id.to_string(),
            Self::Page(page) => page.name().to_string(),
        }
    }

    /// Fetches the roots and picks the anchor.
    ///
    /// The anchor is `None` only for a page without blocks, which can never
    /// yield extracts.
    pub(crate) async fn resolve<H: OutlineHost + ?Sized>(
        &self,
        host: &H,
        keep_summary_above: bool,
    ) -> Result<ResolvedScope, HostError> {
        match self {
            Self::Block(id) => {
                let block = host.get_block_tree(*id, true).await?;
                Ok(ResolvedScope {
                    anchor: Some(block.id),
                    roots: vec![block],
                })
            }
            Self::Page(page) => {
                let roots = host.get_page_top_level_blocks(page).await?;
                let anchor = if keep_summary_above {
                    roots.first()
                } else {
                    roots.last()
                }
                .map(|block| block.id);
                Ok(ResolvedScope { roots, anchor })
            }
        }
    }
}

impl fmt::Display for ExtractionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.target())
    }
}

impl From<BlockId> for ExtractionScope {
    fn from(id: BlockId) -> Self {
        Self::Block(id)
    }
}

impl From<PageRef> for ExtractionScope {
    fn from(page: PageRef) -> Self {
        Self::Page(page)
    }
}

/// Roots to walk and the block the summary is placed against.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedScope {
    pub(crate) roots: Vec<Block>,
    pub(crate) anchor: Option<BlockId>,
}
