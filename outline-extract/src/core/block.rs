//! Blocks, block identifiers and page references.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Property key carrying a block's own identifier once it has been stamped.
pub const ID_PROPERTY: &str = "id";

/// Stable identifier of a block, assigned by the host once and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BlockId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for BlockId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Reference to a page, by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageRef(String);

impl PageRef {
    /// Creates a page reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the page name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A node in the host's ordered outline tree.
///
/// Child order is meaningful: it is both traversal order and output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Host-assigned identifier.
    pub id: BlockId,
    /// Textual content.
    #[serde(default)]
    pub content: String,
    /// Ordered child blocks.
    #[serde(default)]
    pub children: Vec<Block>,
    /// Open-ended property map.
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl Block {
    /// Creates a childless block with a fresh identifier.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_id(BlockId::new(), content)
    }

    /// Creates a childless block with the given identifier.
    #[must_use]
    pub fn with_id(id: BlockId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            children: Vec::new(),
            properties: HashMap::new(),
        }
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: Block) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several children in order.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Block>) -> Self {
        self.children.extend(children);
        self
    }

    /// Sets a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Gets a property value.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    /// Whether the block already carries its provenance tag.
    #[must_use]
    pub fn has_id_property(&self) -> bool {
        self.properties.contains_key(ID_PROPERTY)
    }

    /// Whether the block has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
