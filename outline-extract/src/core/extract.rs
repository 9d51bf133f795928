//! The extract record.

use super::{Block, BlockId};

/// One matched fragment together with the block it was found in.
///
/// Extracts borrow from the block tree fetched for a single run and are
/// consumed by the assembler before that tree is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extract<'a> {
    /// The raw matched text, delimiters included.
    pub text: &'a str,
    /// The block whose content produced the match.
    pub source: &'a Block,
}

impl<'a> Extract<'a> {
    /// Creates a new extract.
    #[must_use]
    pub const fn new(text: &'a str, source: &'a Block) -> Self {
        Self { text, source }
    }

    /// Identifier of the source block.
    #[must_use]
    pub fn source_id(&self) -> BlockId {
        self.source.id
    }
}
