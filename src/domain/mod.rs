//! Domain layer: outline parsing, tree building, and rendering
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod diagnostic;
pub mod error;
pub mod line;
pub mod render;
pub mod target;
pub mod tree_view;

pub use arena::{NodeData, TreeArena, TreeNode, ROOT_LEVEL};
pub use builder::{Outline, OutlineBuilder};
pub use diagnostic::Diagnostic;
pub use error::{DomainError, DomainResult};
pub use line::{LineParser, LineRecord, DEFAULT_INDENT_UNIT};
pub use render::{LineKind, RenderedLine, Renderer, DEFAULT_RENDER_INDENT};
pub use target::{RenderTarget, TargetCatalog, Template};
pub use tree_view::TreeView;
