//! Discussion tree building
//!
//! The API returns a post's discussion either as a flat list or with
//! children already nested. Locally the tree is an arena of comment
//! records plus an index from parent id to child ids; nested views are
//! materialized by traversal. The whole structure is rebuilt from
//! scratch on every fetch, never patched in place.

use std::collections::{HashMap, HashSet};

use banter_client::CommentNode;

/// One comment in a discussion, without ownership of its replies
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub id: u64,
    pub author: String,
    pub content: String,
    pub parent_id: Option<u64>,
}

/// A post's discussion tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentThread {
    records: HashMap<u64, CommentRecord>,
    /// Top-level comment ids, in input order
    roots: Vec<u64>,
    /// Child ids per parent, in input order
    children: HashMap<u64, Vec<u64>>,
}

impl CommentThread {
    /// Build the tree from an API response.
    ///
    /// Nested input is flattened first so grouping always works from one
    /// flat list; this makes flat and server-nested responses come out
    /// identical. A comment whose parent is not in the batch is kept as
    /// a root instead of being dropped.
    pub fn build(nodes: Vec<CommentNode>) -> Self {
        let flat = flatten(nodes);
        let known: HashSet<u64> = flat.iter().map(|node| node.id).collect();

        let mut thread = Self::default();
        for node in flat {
            let record = CommentRecord {
                id: node.id,
                author: node.author,
                content: node.content,
                parent_id: node.parent_id,
            };
            match record.parent_id.filter(|parent| known.contains(parent)) {
                Some(parent) => thread.children.entry(parent).or_default().push(record.id),
                None => thread.roots.push(record.id),
            }
            thread.records.insert(record.id, record);
        }
        thread
    }

    /// Depth-first walk yielding each reachable comment with its depth,
    /// roots at depth 0, siblings in input order.
    ///
    /// Visited ids are tracked so a malformed parent chain can never
    /// loop the walk; records on such a chain are unreachable and simply
    /// do not appear.
    pub fn walk(&self) -> Vec<(&CommentRecord, usize)> {
        let mut out = Vec::with_capacity(self.records.len());
        let mut visited = HashSet::new();
        let mut stack: Vec<(u64, usize)> =
            self.roots.iter().rev().map(|&id| (id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            if !visited.insert(id) {
                log::warn!("Comment {} appears twice in the thread, skipping repeat", id);
                continue;
            }
            let Some(record) = self.records.get(&id) else {
                continue;
            };
            out.push((record, depth));
            if let Some(children) = self.children.get(&id) {
                stack.extend(children.iter().rev().map(|&child| (child, depth + 1)));
            }
        }
        out
    }

    /// Total records held, reachable or not
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Depth-first flatten of a possibly nested response, parents before
/// their children, sibling order preserved.
fn flatten(nodes: Vec<CommentNode>) -> Vec<CommentNode> {
    let mut flat = Vec::new();
    let mut stack: Vec<CommentNode> = nodes.into_iter().rev().collect();
    while let Some(mut node) = stack.pop() {
        let children = std::mem::take(&mut node.children);
        stack.extend(children.into_iter().rev());
        flat.push(node);
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64, parent_id: Option<u64>) -> CommentNode {
        CommentNode {
            id,
            author: format!("user{}", id),
            content: format!("comment {}", id),
            created_at: String::new(),
            parent_id,
            children: Vec::new(),
        }
    }

    fn shape(thread: &CommentThread) -> Vec<(u64, usize)> {
        thread
            .walk()
            .into_iter()
            .map(|(record, depth)| (record.id, depth))
            .collect()
    }

    #[test]
    fn test_empty_input_builds_empty_thread() {
        let thread = CommentThread::build(vec![]);
        assert!(thread.is_empty());
        assert!(thread.walk().is_empty());
    }

    #[test]
    fn test_flat_roots_keep_input_order() {
        let thread = CommentThread::build(vec![node(3, None), node(1, None), node(2, None)]);
        assert_eq!(shape(&thread), vec![(3, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_three_level_chain() {
        let thread =
            CommentThread::build(vec![node(1, None), node(2, Some(1)), node(3, Some(2))]);
        assert_eq!(shape(&thread), vec![(1, 0), (2, 1), (3, 2)]);
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        let thread = CommentThread::build(vec![node(1, None), node(2, Some(99))]);
        assert_eq!(shape(&thread), vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn test_sibling_order_is_stable_under_parents() {
        let thread = CommentThread::build(vec![
            node(1, None),
            node(2, None),
            node(10, Some(1)),
            node(11, Some(1)),
            node(20, Some(2)),
        ]);
        assert_eq!(
            shape(&thread),
            vec![(1, 0), (10, 1), (11, 1), (2, 0), (20, 1)]
        );
    }

    #[test]
    fn test_nested_input_matches_flat_input() {
        let mut root = node(1, None);
        root.children = vec![node(2, Some(1)), node(3, Some(1))];
        let nested = CommentThread::build(vec![root, node(4, None)]);

        let flat = CommentThread::build(vec![
            node(1, None),
            node(2, Some(1)),
            node(3, Some(1)),
            node(4, None),
        ]);

        assert_eq!(shape(&nested), shape(&flat));
        assert_eq!(shape(&nested), vec![(1, 0), (2, 1), (3, 1), (4, 0)]);
    }

    #[test]
    fn test_parent_cycle_cannot_loop_the_walk() {
        // 1 and 2 claim each other as parents; neither is a root, so
        // neither is reachable, and the walk terminates.
        let thread = CommentThread::build(vec![node(1, Some(2)), node(2, Some(1)), node(3, None)]);
        assert_eq!(shape(&thread), vec![(3, 0)]);
        assert_eq!(thread.len(), 3);
    }

    #[test]
    fn test_self_parent_is_dropped_from_the_walk() {
        let thread = CommentThread::build(vec![node(1, Some(1)), node(2, None)]);
        assert_eq!(shape(&thread), vec![(2, 0)]);
    }

    #[test]
    fn test_rebuild_replaces_previous_shape() {
        let first = CommentThread::build(vec![node(1, None), node(2, Some(1))]);
        assert_eq!(shape(&first), vec![(1, 0), (2, 1)]);

        // A fresh fetch where comment 2 was deleted
        let second = CommentThread::build(vec![node(1, None)]);
        assert_eq!(shape(&second), vec![(1, 0)]);
        assert_eq!(second.len(), 1);
    }
}
