//! Block insertion placement.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a new block is inserted relative to its target block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// As the last child of the target.
    AsChild,
    /// As a sibling immediately before the target.
    Before,
    /// As a sibling immediately after the target.
    After,
}

impl Placement {
    /// Sibling placement for a summary kept above (`true`) or below the anchor.
    #[must_use]
    pub const fn sibling(before: bool) -> Self {
        if before {
            Self::Before
        } else {
            Self::After
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AsChild => write!(f, "as_child"),
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_placement() {
        assert_eq!(Placement::sibling(true), Placement::Before);
        assert_eq!(Placement::sibling(false), Placement::After);
    }

    #[test]
    fn test_placement_display() {
        assert_eq!(Placement::AsChild.to_string(), "as_child");
        assert_eq!(
            serde_json::to_string(&Placement::After).unwrap(),
            "\"after\""
        );
    }
}
