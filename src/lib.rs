//! outline2spec: indented outlines to behavior-driven test skeletons.
//!
//! ```text
//! - d: Stack                    describe 'Stack' do
//!     - c: when empty      →      context 'when empty' do
//!         - i: pops nil             xit 'pops nil' do
//!                                   end
//!                                 end
//!                               end
//! ```
//!
//! The pipeline is [`domain::LineParser`] → [`domain::OutlineBuilder`] →
//! [`domain::Renderer`], driven by [`application::services::ConvertService`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

use domain::{DomainResult, OutlineBuilder, Renderer, TargetCatalog};

/// Convert `text` with a built-in target (`rspec` or `jest`) and default indentation.
pub fn convert(text: &str, target: &str) -> DomainResult<String> {
    let catalog = TargetCatalog::builtin();
    let target = catalog.get(target)?;
    let outline = OutlineBuilder::default().build(text);
    Ok(Renderer::new(target).render(&outline))
}
