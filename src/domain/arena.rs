//! Arena-backed outline tree.
//!
//! Nodes live in a generational arena and refer to each other by [`Index`].
//! The arena owns every node; `parent` is a plain index used for lookups
//! while attaching, so there is no ownership cycle.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::line::LineRecord;

/// Level of the synthetic root, shallower than any input line.
pub const ROOT_LEVEL: isize = -1;

/// Data payload for nodes created from input lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// 1-based position of the line in the input
    pub line_no: usize,
    /// Parsed line
    pub record: LineRecord,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.record.body.as_deref().unwrap_or("");
        match &self.record.symbol {
            Some(symbol) => write!(f, "[{}] {}", symbol, body),
            None => write!(f, "{}", body),
        }
    }
}

/// Tree node in the arena.
#[derive(Debug)]
pub struct TreeNode {
    /// Nesting level; `ROOT_LEVEL` for the root
    pub level: isize,
    /// Line payload, `None` for the root
    pub data: Option<NodeData>,
    /// Index of parent node, `None` for the root and for orphans
    pub parent: Option<Index>,
    /// Child indices in insertion order
    pub children: Vec<Index>,
}

impl TreeNode {
    pub fn is_root(&self) -> bool {
        self.data.is_none()
    }
}

/// Outline tree with exactly one synthetic root.
#[derive(Debug)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    root: Index,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            level: ROOT_LEVEL,
            data: None,
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    /// Insert a line node. With `parent == None` the node is stored as an orphan.
    #[instrument(level = "trace", skip(self, data), fields(line_no = data.line_no))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node = TreeNode {
            level: data.record.level as isize,
            data: Some(data),
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    /// Number of nodes including the root and orphans.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() <= 1
    }

    /// Pre-order traversal starting at the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Nodes that are not the root and were never attached.
    pub fn orphans(&self) -> Vec<Index> {
        let mut orphans: Vec<(usize, Index)> = self
            .arena
            .iter()
            .filter_map(|(idx, node)| match (&node.data, node.parent) {
                (Some(data), None) => Some((data.line_no, idx)),
                _ => None,
            })
            .collect();
        orphans.sort_by_key(|(line_no, _)| *line_no);
        orphans.into_iter().map(|(_, idx)| idx).collect()
    }

    /// Longest chain of line nodes below the root; 0 for an empty outline.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        match self.get_node(node_idx) {
            Some(node) => {
                let below = node
                    .children
                    .iter()
                    .map(|&child| self.calculate_depth(child))
                    .max()
                    .unwrap_or(0);
                if node.is_root() {
                    below
                } else {
                    1 + below
                }
            }
            None => 0,
        }
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena, start: Index) -> Self {
        Self {
            arena,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
