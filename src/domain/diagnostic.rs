//! Non-fatal notes collected while building an outline.

use std::fmt;

/// Indentation problem found during tree building. Never changes the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No eligible parent existed; the line is dropped from the output
    Orphaned { line_no: usize, text: String },
    /// Leading spaces are not a multiple of the indent unit; level was truncated
    MisalignedIndent {
        line_no: usize,
        width: usize,
        unit: usize,
    },
    /// Line nests more than one level below its parent
    LevelJump { line_no: usize, from: isize, to: isize },
}

impl Diagnostic {
    pub fn line_no(&self) -> usize {
        match self {
            Diagnostic::Orphaned { line_no, .. }
            | Diagnostic::MisalignedIndent { line_no, .. }
            | Diagnostic::LevelJump { line_no, .. } => *line_no,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Orphaned { line_no, text } => {
                write!(f, "line {}: no parent found, dropped: {:?}", line_no, text)
            }
            Diagnostic::MisalignedIndent {
                line_no,
                width,
                unit,
            } => write!(
                f,
                "line {}: indentation of {} spaces is not a multiple of {}",
                line_no, width, unit
            ),
            Diagnostic::LevelJump { line_no, from, to } => write!(
                f,
                "line {}: jumps from level {} to level {}",
                line_no, from, to
            ),
        }
    }
}
