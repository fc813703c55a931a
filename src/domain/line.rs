//! Line classification: one raw outline line into a [`LineRecord`].
//!
//! Two shapes are recognized, tried in order:
//! - decorated: `<spaces>- [tag:] body`
//! - plain: `<spaces>body`
//!
//! Anything else (only the empty line) yields a record with defaults.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::domain::error::{DomainError, DomainResult};

/// Spaces per nesting level in the input outline.
pub const DEFAULT_INDENT_UNIT: usize = 4;

static DECORATED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^( *)-[ ]*(?:([^:]+):)?[ ]*(.+)$").expect("decorated line pattern")
});

static PLAIN_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( *)(.+)$").expect("plain line pattern"));

/// Semantic view of one input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineRecord {
    /// Line content as handed to the parser
    pub raw: String,
    /// Number of leading spaces
    pub indent_width: usize,
    /// `indent_width / indent_unit`, truncated
    pub level: usize,
    /// Tag from `- tag: body`, if present
    pub symbol: Option<String>,
    /// Text after the decoration; `None` only for the empty line
    pub body: Option<String>,
}

impl LineRecord {
    /// True for the empty line and for lines holding only spaces.
    pub fn is_blank(&self) -> bool {
        self.body.as_deref().map_or(true, |b| b.trim().is_empty())
    }
}

/// Classifies raw lines using a fixed indentation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParser {
    indent_unit: usize,
}

impl Default for LineParser {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT_UNIT,
        }
    }
}

impl LineParser {
    pub fn new(indent_unit: usize) -> DomainResult<Self> {
        if indent_unit == 0 {
            return Err(DomainError::InvalidIndentUnit(indent_unit));
        }
        Ok(Self { indent_unit })
    }

    pub fn indent_unit(&self) -> usize {
        self.indent_unit
    }

    /// Parse one line. Never fails; unmatched lines keep default fields.
    pub fn parse(&self, line: &str) -> LineRecord {
        if let Some(caps) = DECORATED_LINE.captures(line) {
            let indent_width = caps.get(1).map_or(0, |m| m.as_str().len());
            let record = LineRecord {
                raw: line.to_string(),
                indent_width,
                level: indent_width / self.indent_unit,
                symbol: caps.get(2).map(|m| m.as_str().to_string()),
                body: caps.get(3).map(|m| m.as_str().to_string()),
            };
            trace!(?record, "decorated line");
            return record;
        }

        if let Some(caps) = PLAIN_LINE.captures(line) {
            let indent_width = caps.get(1).map_or(0, |m| m.as_str().len());
            let record = LineRecord {
                raw: line.to_string(),
                indent_width,
                level: indent_width / self.indent_unit,
                symbol: None,
                body: caps.get(2).map(|m| m.as_str().to_string()),
            };
            trace!(?record, "plain line");
            return record;
        }

        trace!(line, "unmatched line");
        LineRecord {
            raw: line.to_string(),
            ..LineRecord::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- d: outer", 0, Some("d"), Some("outer"))]
    #[case("    - c: inner", 1, Some("c"), Some("inner"))]
    #[case("        - i: leaf", 2, Some("i"), Some("leaf"))]
    #[case("-i:tight", 0, Some("i"), Some("tight"))]
    #[case("- d: key: value", 0, Some("d"), Some("key: value"))]
    #[case("- no tag here", 0, None, Some("no tag here"))]
    #[case("- trailing:", 0, None, Some("trailing:"))]
    #[case("just text", 0, None, Some("just text"))]
    #[case("      six spaces", 1, None, Some("six spaces"))]
    fn test_parse_line(
        #[case] line: &str,
        #[case] level: usize,
        #[case] symbol: Option<&str>,
        #[case] body: Option<&str>,
    ) {
        let record = LineParser::default().parse(line);
        assert_eq!(record.level, level);
        assert_eq!(record.symbol.as_deref(), symbol);
        assert_eq!(record.body.as_deref(), body);
        assert_eq!(record.raw, line);
    }

    #[test]
    fn test_parse_empty_line_keeps_defaults() {
        let record = LineParser::default().parse("");
        assert_eq!(record.indent_width, 0);
        assert_eq!(record.level, 0);
        assert!(record.symbol.is_none());
        assert!(record.body.is_none());
        assert!(record.is_blank());
    }

    #[test]
    fn test_parse_space_only_line_falls_back_to_single_space_body() {
        let record = LineParser::default().parse("     ");
        assert_eq!(record.indent_width, 4);
        assert_eq!(record.level, 1);
        assert_eq!(record.body.as_deref(), Some(" "));
        assert!(record.is_blank());
    }

    #[test]
    fn test_custom_indent_unit() {
        let parser = LineParser::new(2).unwrap();
        let record = parser.parse("    - i: deep");
        assert_eq!(record.level, 2);
    }

    #[test]
    fn test_zero_indent_unit_is_rejected() {
        assert!(matches!(
            LineParser::new(0),
            Err(DomainError::InvalidIndentUnit(0))
        ));
    }
}
