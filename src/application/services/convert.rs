//! Outline conversion service
//!
//! Reads an outline, builds the tree, and renders it with the selected target.

use std::path::Path;
use std::sync::Arc;

use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    Diagnostic, DomainError, LineKind, LineParser, Outline, OutlineBuilder, Renderer,
    TargetCatalog, TreeView,
};
use crate::infrastructure::traits::{FileSystem, InputStream};

/// Per-call options; unset fields fall back to settings.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Render target name (default: `settings.default_target`)
    pub target: Option<String>,
    /// Fail on diagnostics (`settings.strict` also enables this)
    pub strict: bool,
}

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct ConvertOutput {
    /// Rendered code, lines joined with `\n`, no trailing newline
    pub text: String,
    /// Target actually used
    pub target: String,
    /// Indentation notes; never affect `text`
    pub diagnostics: Vec<Diagnostic>,
    /// Lines that made it into the output tree
    pub attached: usize,
    /// Opening lines emitted for recognized symbols
    pub blocks: usize,
}

/// Service for converting outlines to test skeletons.
pub struct ConvertService {
    settings: Arc<Settings>,
    fs: Arc<dyn FileSystem>,
    stdin: Arc<dyn InputStream>,
    catalog: TargetCatalog,
}

impl ConvertService {
    pub fn new(
        settings: Arc<Settings>,
        fs: Arc<dyn FileSystem>,
        stdin: Arc<dyn InputStream>,
    ) -> Self {
        let catalog = TargetCatalog::builtin().with_targets(&settings.targets);
        Self {
            settings,
            fs,
            stdin,
            catalog,
        }
    }

    pub fn catalog(&self) -> &TargetCatalog {
        &self.catalog
    }

    /// Read outline text from a file, or from stdin for `None` / `-`.
    pub fn read_input(&self, input: Option<&Path>) -> ApplicationResult<String> {
        match input {
            Some(path) if path != Path::new("-") => {
                debug!("read_input: {}", path.display());
                self.fs
                    .read_to_string(path)
                    .with_path_context("read outline", path)
            }
            _ => {
                debug!("read_input: stdin");
                self.stdin
                    .read_all()
                    .with_path_context("read outline", Path::new("<stdin>"))
            }
        }
    }

    /// Write rendered output, terminated by a newline.
    pub fn write_output(&self, path: &Path, text: &str) -> ApplicationResult<()> {
        let write_failed = |source| ApplicationError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };
        self.fs.ensure_parent(path).map_err(write_failed)?;
        let mut content = text.to_string();
        content.push('\n');
        self.fs.write(path, &content).map_err(write_failed)
    }

    /// Parse and build the outline tree.
    pub fn parse(&self, text: &str) -> ApplicationResult<Outline> {
        let parser = LineParser::new(self.settings.indent_unit)?;
        Ok(OutlineBuilder::new(parser).build(text))
    }

    /// Convert outline text with the given options.
    #[instrument(level = "debug", skip(self, text), fields(bytes = text.len()))]
    pub fn convert(&self, text: &str, options: &ConvertOptions) -> ApplicationResult<ConvertOutput> {
        let target_name = options
            .target
            .as_deref()
            .unwrap_or(self.settings.default_target.as_str());
        let target = self.catalog.get(target_name)?;
        let outline = self.parse(text)?;

        let diagnostics = outline.diagnostics().to_vec();
        for diagnostic in &diagnostics {
            debug!("diagnostic: {}", diagnostic);
        }
        if (options.strict || self.settings.strict) && !diagnostics.is_empty() {
            return Err(DomainError::StrictViolation {
                count: diagnostics.len(),
                first: diagnostics[0].to_string(),
            }
            .into());
        }

        let lines = Renderer::new(target)
            .with_indent(self.settings.render_indent)
            .render_lines(&outline);
        let blocks = lines.iter().filter(|l| l.kind == LineKind::Opening).count();
        let text = lines
            .into_iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n");

        debug!(render_target = %target.name, blocks, "converted");
        Ok(ConvertOutput {
            text,
            target: target.name.clone(),
            diagnostics,
            attached: outline.attached_count(),
            blocks,
        })
    }

    /// Read, convert, and return the result.
    pub fn convert_input(
        &self,
        input: Option<&Path>,
        options: &ConvertOptions,
    ) -> ApplicationResult<ConvertOutput> {
        let text = self.read_input(input)?;
        self.convert(&text, options)
    }

    /// Parsed outline as a printable tree.
    pub fn tree(&self, text: &str) -> ApplicationResult<Tree<String>> {
        Ok(self.parse(text)?.to_tree_string())
    }
}
