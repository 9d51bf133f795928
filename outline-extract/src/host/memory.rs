//! In-memory outline host.

use super::{Notice, OutlineHost};
use crate::core::{Block, BlockId, PageRef, Placement};
use crate::errors::HostError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Node {
    content: String,
    properties: HashMap<String, serde_json::Value>,
    children: Vec<BlockId>,
    parent: Option<BlockId>,
    page: PageRef,
}

#[derive(Debug, Default)]
struct Store {
    nodes: HashMap<BlockId, Node>,
    pages: HashMap<PageRef, Vec<BlockId>>,
    notices: Vec<Notice>,
    inserted: Vec<BlockId>,
    property_writes: usize,
    insert_budget: Option<usize>,
}

impl Store {
    fn add_tree(&mut self, block: Block, parent: Option<BlockId>, page: &PageRef) -> BlockId {
        let id = block.id;
        let children = block
            .children
            .into_iter()
            .map(|child| self.add_tree(child, Some(id), page))
            .collect();
        self.nodes.insert(
            id,
            Node {
                content: block.content,
                properties: block.properties,
                children,
                parent,
                page: page.clone(),
            },
        );
        id
    }

    fn build(&self, id: BlockId, include_descendants: bool) -> Option<Block> {
        let node = self.nodes.get(&id)?;
        let children = if include_descendants {
            node.children
                .iter()
                .filter_map(|child| self.build(*child, true))
                .collect()
        } else {
            Vec::new()
        };
        Some(Block {
            id,
            content: node.content.clone(),
            children,
            properties: node.properties.clone(),
        })
    }

    fn siblings_mut(&mut self, parent: Option<BlockId>, page: &PageRef) -> Option<&mut Vec<BlockId>> {
        match parent {
            Some(parent) => self.nodes.get_mut(&parent).map(|node| &mut node.children),
            None => self.pages.get_mut(page),
        }
    }
}

/// A thread-safe outline host that keeps pages and blocks in memory.
///
/// Besides implementing [`OutlineHost`], it records every notice and every
/// inserted block, and can be told to start failing insertions after a number
/// of successful ones.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    store: RwLock<Store>,
}

impl InMemoryHost {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a page with the given top-level blocks.
    ///
    /// Block identifiers are kept as given.
    pub fn add_page(&self, page: impl Into<PageRef>, blocks: Vec<Block>) {
        let page = page.into();
        let mut store = self.store.write();
        let top = blocks
            .into_iter()
            .map(|block| store.add_tree(block, None, &page))
            .collect();
        store.pages.insert(page, top);
    }

    /// Returns a block with its descendants.
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<Block> {
        self.store.read().build(id, true)
    }

    /// Returns a page's top-level blocks with their descendants.
    #[must_use]
    pub fn page_blocks(&self, page: &PageRef) -> Option<Vec<Block>> {
        let store = self.store.read();
        let top = store.pages.get(page)?;
        Some(top.iter().filter_map(|id| store.build(*id, true)).collect())
    }

    /// All notices shown so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.store.read().notices.clone()
    }

    /// Identifiers of every block inserted through the host, in order.
    #[must_use]
    pub fn inserted(&self) -> Vec<BlockId> {
        self.store.read().inserted.clone()
    }

    /// Number of property writes performed.
    #[must_use]
    pub fn property_writes(&self) -> usize {
        self.store.read().property_writes
    }

    /// Lets `successes` more insertions succeed, then fails every later one.
    pub fn fail_inserts_after(&self, successes: usize) {
        self.store.write().insert_budget = Some(successes);
    }
}

#[async_trait]
impl OutlineHost for InMemoryHost {
    async fn get_block_tree(
        &self,
        id: BlockId,
        include_descendants: bool,
    ) -> Result<Block, HostError> {
        self.store
            .read()
            .build(id, include_descendants)
            .ok_or(HostError::BlockNotFound(id))
    }

    async fn get_page_top_level_blocks(&self, page: &PageRef) -> Result<Vec<Block>, HostError> {
        self.page_blocks(page)
            .ok_or_else(|| HostError::PageNotFound(page.clone()))
    }

    async fn insert_block(
        &self,
        target: BlockId,
        content: &str,
        placement: Placement,
    ) -> Result<Block, HostError> {
        let mut store = self.store.write();

        if let Some(budget) = store.insert_budget.as_mut() {
            if *budget == 0 {
                return Err(HostError::storage("insert_block", "insert budget exhausted"));
            }
            *budget -= 1;
        }

        let (target_parent, page) = store
            .nodes
            .get(&target)
            .map(|node| (node.parent, node.page.clone()))
            .ok_or(HostError::BlockNotFound(target))?;

        let block = Block::new(content);
        let parent = match placement {
            Placement::AsChild => Some(target),
            Placement::Before | Placement::After => target_parent,
        };

        let siblings = store
            .siblings_mut(parent, &page)
            .ok_or_else(|| HostError::storage("insert_block", format!("dangling parent for {target}")))?;
        match placement {
            Placement::AsChild => siblings.push(block.id),
            Placement::Before | Placement::After => {
                let position = siblings
                    .iter()
                    .position(|id| *id == target)
                    .ok_or_else(|| HostError::storage("insert_block", format!("{target} missing from its parent")))?;
                let index = if placement == Placement::Before {
                    position
                } else {
                    position + 1
                };
                siblings.insert(index, block.id);
            }
        }

        store.nodes.insert(
            block.id,
            Node {
                content: block.content.clone(),
                properties: HashMap::new(),
                children: Vec::new(),
                parent,
                page,
            },
        );
        store.inserted.push(block.id);
        Ok(block)
    }

    async fn set_block_property(
        &self,
        id: BlockId,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), HostError> {
        let mut store = self.store.write();
        let node = store.nodes.get_mut(&id).ok_or(HostError::BlockNotFound(id))?;
        node.properties.insert(key.to_string(), value);
        store.property_writes += 1;
        Ok(())
    }

    async fn notify_user(&self, notice: &Notice) -> Result<(), HostError> {
        self.store.write().notices.push(notice.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn contents(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|b| b.content.as_str()).collect()
    }

    fn sample() -> (InMemoryHost, PageRef, Vec<BlockId>) {
        let host = InMemoryHost::new();
        let page = PageRef::new("notes");
        let blocks = vec![
            Block::new("first").with_child(Block::new("first.1")),
            Block::new("second"),
        ];
        let ids = vec![blocks[0].id, blocks[0].children[0].id, blocks[1].id];
        host.add_page(page.clone(), blocks);
        (host, page, ids)
    }

    #[tokio::test]
    async fn test_get_block_tree() {
        let (host, _, ids) = sample();

        let full = host.get_block_tree(ids[0], true).await.unwrap();
        assert_eq!(contents(&full.children), vec!["first.1"]);

        let shallow = host.get_block_tree(ids[0], false).await.unwrap();
        assert!(shallow.children.is_empty());

        let missing = BlockId::new();
        assert_eq!(
            host.get_block_tree(missing, true).await.unwrap_err(),
            HostError::BlockNotFound(missing)
        );
    }

    #[tokio::test]
    async fn test_page_blocks() {
        let (host, page, _) = sample();

        let blocks = host.get_page_top_level_blocks(&page).await.unwrap();
        assert_eq!(contents(&blocks), vec!["first", "second"]);
        assert_eq!(blocks[0].children.len(), 1);

        let err = host
            .get_page_top_level_blocks(&PageRef::new("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "page_not_found");
    }

    #[tokio::test]
    async fn test_sibling_insertions() {
        let (host, page, ids) = sample();

        host.insert_block(ids[0], "before first", Placement::Before).await.unwrap();
        host.insert_block(ids[2], "after second", Placement::After).await.unwrap();
        host.insert_block(ids[1], "after nested", Placement::After).await.unwrap();

        let blocks = host.page_blocks(&page).unwrap();
        assert_eq!(
            contents(&blocks),
            vec!["before first", "first", "second", "after second"]
        );
        assert_eq!(contents(&blocks[1].children), vec!["first.1", "after nested"]);
        assert_eq!(host.inserted().len(), 3);
    }

    #[tokio::test]
    async fn test_child_insertions_append() {
        let (host, _, ids) = sample();

        let a = host.insert_block(ids[2], "a", Placement::AsChild).await.unwrap();
        host.insert_block(ids[2], "b", Placement::AsChild).await.unwrap();

        let parent = host.block(ids[2]).unwrap();
        assert_eq!(contents(&parent.children), vec!["a", "b"]);
        assert_eq!(parent.children[0].id, a.id);
    }

    #[tokio::test]
    async fn test_insert_budget() {
        let (host, _, ids) = sample();
        host.fail_inserts_after(1);

        assert!(host.insert_block(ids[0], "ok", Placement::AsChild).await.is_ok());
        let err = host
            .insert_block(ids[0], "fails", Placement::AsChild)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "storage");
        assert_eq!(host.inserted().len(), 1);
    }

    #[tokio::test]
    async fn test_properties_and_notices() {
        let (host, _, ids) = sample();

        host.set_block_property(ids[1], "id", json!(ids[1].to_string()))
            .await
            .unwrap();
        host.notify_user(&Notice::success("done")).await.unwrap();

        assert_eq!(
            host.block(ids[1]).unwrap().property("id"),
            Some(&json!(ids[1].to_string()))
        );
        assert_eq!(host.property_writes(), 1);
        assert_eq!(host.notices(), vec![Notice::success("done")]);
    }
}
