//! Outline tree builder.
//!
//! Attaches each parsed line to the tree in a single forward pass, comparing
//! it only with the previously added node and, on dedent, with the history of
//! all nodes added so far. Nodes are never revisited or re-parented.

use std::cmp::Ordering;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::diagnostic::Diagnostic;
use crate::domain::line::{LineParser, LineRecord};

/// A finished outline: the tree plus the build history and diagnostics.
#[derive(Debug)]
pub struct Outline {
    tree: TreeArena,
    history: Vec<Index>,
    diagnostics: Vec<Diagnostic>,
}

impl Outline {
    pub fn tree(&self) -> &TreeArena {
        &self.tree
    }

    pub fn root(&self) -> Index {
        self.tree.root()
    }

    /// Every node in insertion order, root first. Position equals line number.
    pub fn history(&self) -> &[Index] {
        &self.history
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of input lines that ended up in the tree.
    pub fn line_count(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// Line nodes reachable from the root.
    pub fn attached_count(&self) -> usize {
        self.tree.iter().filter(|(_, node)| !node.is_root()).count()
    }

    pub fn orphans(&self) -> Vec<Index> {
        self.tree.orphans()
    }

    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// Node created for the 1-based `line_no`.
    pub fn node_for_line(&self, line_no: usize) -> Option<Index> {
        if line_no == 0 {
            return None;
        }
        self.history.get(line_no).copied()
    }

    /// Line number of the parent of `line_no`: `Some(0)` for the root,
    /// `None` for orphans and unknown lines.
    pub fn parent_line(&self, line_no: usize) -> Option<usize> {
        let idx = self.node_for_line(line_no)?;
        let parent_idx = self.tree.get_node(idx)?.parent?;
        let parent = self.tree.get_node(parent_idx)?;
        Some(parent.data.as_ref().map_or(0, |d| d.line_no))
    }
}

/// Builds an [`Outline`] from lines, one at a time.
#[derive(Debug)]
pub struct OutlineBuilder {
    parser: LineParser,
    tree: TreeArena,
    history: Vec<Index>,
    diagnostics: Vec<Diagnostic>,
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new(LineParser::default())
    }
}

impl OutlineBuilder {
    pub fn new(parser: LineParser) -> Self {
        let tree = TreeArena::new();
        let history = vec![tree.root()];
        Self {
            parser,
            tree,
            history,
            diagnostics: Vec::new(),
        }
    }

    /// Split `text` on `\n` (trailing empty lines included) and build the outline.
    #[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
    pub fn build(mut self, text: &str) -> Outline {
        for line in text.split('\n') {
            self.add_line(line);
        }
        self.finish()
    }

    /// Parse and attach one line. A trailing `\r` is dropped first.
    pub fn add_line(&mut self, line: &str) -> Index {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let record = self.parser.parse(line);
        self.add_record(record)
    }

    /// Attach an already parsed line.
    pub fn add_record(&mut self, record: LineRecord) -> Index {
        let line_no = self.history.len();
        let level = record.level as isize;
        let parent = self.find_parent(level);

        self.collect_diagnostics(line_no, &record, parent);

        let idx = self.tree.insert_node(NodeData { line_no, record }, parent);
        self.history.push(idx);
        trace!(line_no, level, ?parent, "attached");
        idx
    }

    pub fn finish(self) -> Outline {
        debug!(
            lines = self.history.len() - 1,
            diagnostics = self.diagnostics.len(),
            "outline built"
        );
        Outline {
            tree: self.tree,
            history: self.history,
            diagnostics: self.diagnostics,
        }
    }

    fn level_of(&self, idx: Index) -> Option<isize> {
        self.tree.get_node(idx).map(|node| node.level)
    }

    fn find_parent(&self, level: isize) -> Option<Index> {
        let last_idx = *self.history.last()?;
        let last = self.tree.get_node(last_idx)?;

        match last.level.cmp(&level) {
            // deeper than the previous line: child of it
            Ordering::Less => Some(last_idx),
            // same level: sibling, shares the previous line's parent
            Ordering::Equal => last.parent,
            // dedent: most recent node that is shallower
            Ordering::Greater => self
                .history
                .iter()
                .rev()
                .copied()
                .find(|&idx| self.level_of(idx).is_some_and(|l| l < level)),
        }
    }

    fn collect_diagnostics(&mut self, line_no: usize, record: &LineRecord, parent: Option<Index>) {
        let Some(parent_idx) = parent else {
            self.diagnostics.push(Diagnostic::Orphaned {
                line_no,
                text: record.raw.clone(),
            });
            return;
        };
        if record.is_blank() {
            return;
        }

        let unit = self.parser.indent_unit();
        if record.indent_width % unit != 0 {
            self.diagnostics.push(Diagnostic::MisalignedIndent {
                line_no,
                width: record.indent_width,
                unit,
            });
        }

        let level = record.level as isize;
        if let Some(parent_level) = self.level_of(parent_idx) {
            if level - parent_level > 1 {
                self.diagnostics.push(Diagnostic::LevelJump {
                    line_no,
                    from: parent_level,
                    to: level,
                });
            }
        }
    }
}
