//! Renders an outline tree into target-framework source text.
//!
//! Pre-order walk from the root's children. Each node emits an opening line,
//! then its children, then a closing line unless it rendered as a comment.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TreeNode;
use crate::domain::builder::Outline;
use crate::domain::target::RenderTarget;

/// Spaces per level in the rendered output.
pub const DEFAULT_RENDER_INDENT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Opening line from a recognized symbol
    Opening,
    /// Comment line, or an empty line for an empty input line; never closed
    Comment,
    /// Terminal token closing an opening line
    Closing,
}

/// One emitted output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub kind: LineKind,
    /// 1-based input line that produced this output line
    pub line_no: usize,
    pub text: String,
}

pub struct Renderer<'a> {
    target: &'a RenderTarget,
    indent_width: usize,
}

impl<'a> Renderer<'a> {
    pub fn new(target: &'a RenderTarget) -> Self {
        Self {
            target,
            indent_width: DEFAULT_RENDER_INDENT,
        }
    }

    pub fn with_indent(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Render the outline, lines joined with `\n`.
    #[instrument(level = "debug", skip_all, fields(render_target = %self.target.name))]
    pub fn render(&self, outline: &Outline) -> String {
        let lines = self.render_lines(outline);
        debug!(lines = lines.len(), "rendered");
        lines
            .into_iter()
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the outline as tagged lines.
    pub fn render_lines(&self, outline: &Outline) -> Vec<RenderedLine> {
        let mut lines = Vec::new();
        if let Some(root) = outline.tree().get_node(outline.root()) {
            for &child in &root.children {
                self.render_node(outline, child, &mut lines);
            }
        }
        lines
    }

    fn render_node(&self, outline: &Outline, idx: Index, out: &mut Vec<RenderedLine>) {
        let Some(node) = outline.tree().get_node(idx) else {
            return;
        };
        let Some(data) = &node.data else {
            return;
        };
        let indent = self.indent(node);
        let line_no = data.line_no;
        let record = &data.record;

        let opening = match (&record.body, record.symbol.as_deref()) {
            (None, _) => (LineKind::Comment, indent.clone()),
            (Some(body), Some(tag)) => match self.target.symbol(tag) {
                Some(template) => (LineKind::Opening, format!("{}{}", indent, template.apply(body))),
                None => (
                    LineKind::Comment,
                    format!("{}{}", indent, self.target.comment.apply(body)),
                ),
            },
            (Some(body), None) => (
                LineKind::Comment,
                format!("{}{}", indent, self.target.comment.apply(body)),
            ),
        };
        let (kind, text) = opening;
        out.push(RenderedLine {
            kind,
            line_no,
            text,
        });

        for &child in &node.children {
            self.render_node(outline, child, out);
        }

        if kind == LineKind::Opening {
            out.push(RenderedLine {
                kind: LineKind::Closing,
                line_no,
                text: format!("{}{}", indent, self.target.terminal),
            });
        }
    }

    fn indent(&self, node: &TreeNode) -> String {
        let level = node.level.max(0) as usize;
        " ".repeat(self.indent_width * level)
    }
}
