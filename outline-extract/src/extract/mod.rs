//! Extraction of matched fragments from a block forest.
//!
//! [`extract`] walks the forest depth-first in pre-order and yields every
//! non-overlapping match of the pattern in each block's own content, left to
//! right, before descending into that block's children. The pattern is applied
//! to one block at a time, so matches never span blocks.

mod normalizer;

pub use normalizer::{format_reference, normalize, strip_delimiters, DELIMITER_WIDTH};

use crate::core::{Block, Extract};
use regex::{Matches, Regex};
use std::iter::FusedIterator;
use std::slice;

/// Lazy pre-order sequence of extracts over a block forest.
///
/// The iterator holds an explicit stack of sibling cursors instead of
/// recursing, so deep outlines cannot overflow the call stack. It is finite
/// and not restartable; call [`extract`] again for a fresh pass.
#[derive(Debug)]
pub struct Extracts<'a> {
    pattern: &'a Regex,
    stack: Vec<slice::Iter<'a, Block>>,
    current: Option<(&'a Block, Matches<'a, 'a>)>,
}

/// Starts an extraction pass over `roots`.
#[must_use]
pub fn extract<'a>(roots: &'a [Block], pattern: &'a Regex) -> Extracts<'a> {
    Extracts {
        pattern,
        stack: vec![roots.iter()],
        current: None,
    }
}

impl<'a> Iterator for Extracts<'a> {
    type Item = Extract<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((source, matches)) = self.current.as_mut() {
                let source: &'a Block = *source;
                if let Some(found) = matches.next() {
                    return Some(Extract::new(found.as_str(), source));
                }
                // Own content exhausted: children come next.
                self.current = None;
                if !source.is_leaf() {
                    self.stack.push(source.children.iter());
                }
            }

            let siblings = self.stack.last_mut()?;
            match siblings.next() {
                Some(block) => {
                    self.current = Some((block, self.pattern.find_iter(&block.content)));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl FusedIterator for Extracts<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXPR;
    use pretty_assertions::assert_eq;

    fn default_pattern() -> Regex {
        Regex::new(DEFAULT_EXPR).unwrap()
    }

    fn texts<'a>(extracts: impl Iterator<Item = Extract<'a>>) -> Vec<&'a str> {
        extracts.map(|e| e.text).collect()
    }

    #[test]
    fn test_empty_roots() {
        let pattern = default_pattern();
        assert_eq!(extract(&[], &pattern).count(), 0);
    }

    #[test]
    fn test_matches_within_block_are_left_to_right() {
        let pattern = default_pattern();
        let roots = vec![Block::new("Keep ==this== and **that** and ==more==")];

        let found: Vec<Extract<'_>> = extract(&roots, &pattern).collect();

        assert_eq!(
            found.iter().map(|e| e.text).collect::<Vec<_>>(),
            vec!["==this==", "**that**", "==more=="]
        );
        assert!(found.iter().all(|e| e.source_id() == roots[0].id));
    }

    #[test]
    fn test_preorder_across_tree() {
        let pattern = default_pattern();
        let roots = vec![
            Block::new("==a==")
                .with_child(
                    Block::new("==a1== **a1b**").with_child(Block::new("==a1x==")),
                )
                .with_child(Block::new("no marks here"))
                .with_child(Block::new("**a3**")),
            Block::new("==b==").with_child(Block::new("==b1==")),
        ];

        assert_eq!(
            texts(extract(&roots, &pattern)),
            vec!["==a==", "==a1==", "**a1b**", "==a1x==", "**a3**", "==b==", "==b1=="]
        );
    }

    #[test]
    fn test_children_follow_parent_even_without_parent_matches() {
        let pattern = default_pattern();
        let roots = vec![
            Block::new("plain").with_child(Block::new("==child==")),
            Block::new("==sibling=="),
        ];

        let found: Vec<Extract<'_>> = extract(&roots, &pattern).collect();
        assert_eq!(texts(found.iter().copied()), vec!["==child==", "==sibling=="]);
        assert_eq!(found[0].source_id(), roots[0].children[0].id);
        assert_eq!(found[1].source_id(), roots[1].id);
    }

    #[test]
    fn test_matches_do_not_span_blocks() {
        let pattern = default_pattern();
        let roots = vec![Block::new("==open"), Block::new("close==")];
        assert_eq!(extract(&roots, &pattern).count(), 0);
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = Regex::new(r"#\w+").unwrap();
        let roots = vec![Block::new("#one #two").with_child(Block::new("#three"))];
        assert_eq!(texts(extract(&roots, &pattern)), vec!["#one", "#two", "#three"]);
    }

    #[test]
    fn test_deep_outline_does_not_recurse() {
        let pattern = default_pattern();
        let mut block = Block::new("==leaf==");
        for depth in 0..2_000 {
            block = Block::new(format!("level {depth}")).with_child(block);
        }
        let roots = vec![block];

        let found: Vec<&str> = texts(extract(&roots, &pattern));
        assert_eq!(found, vec!["==leaf=="]);
    }

    #[test]
    fn test_fresh_pass_restarts() {
        let pattern = default_pattern();
        let roots = vec![Block::new("==x==")];

        let mut first = extract(&roots, &pattern);
        assert!(first.next().is_some());
        assert!(first.next().is_none());
        assert!(first.next().is_none());

        assert_eq!(extract(&roots, &pattern).count(), 1);
    }
}
