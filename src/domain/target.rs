//! Render targets: per-framework templates for opening, comment, and closing lines.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Placeholder replaced by the node body.
pub const BODY_PLACEHOLDER: &str = "{body}";

/// Single-argument line template, e.g. `describe '{body}' do`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(String);

impl Template {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn apply(&self, body: &str) -> String {
        self.0.replace(BODY_PLACEHOLDER, body)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Templates for one test framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderTarget {
    /// Catalog key; taken from the table name when loaded from config
    #[serde(default, skip_serializing)]
    pub name: String,
    /// Template for untagged lines and unknown tags
    pub comment: Template,
    /// Closing token shared by all non-comment nodes
    pub terminal: String,
    /// Symbol tag to opening-line template
    #[serde(default)]
    pub symbols: BTreeMap<String, Template>,
}

impl RenderTarget {
    pub fn new(name: impl Into<String>, comment: Template, terminal: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment,
            terminal: terminal.into(),
            symbols: BTreeMap::new(),
        }
    }

    pub fn with_symbol(mut self, tag: impl Into<String>, template: Template) -> Self {
        self.symbols.insert(tag.into(), template);
        self
    }

    /// Opening template for `tag`, if the target knows it.
    pub fn symbol(&self, tag: &str) -> Option<&Template> {
        self.symbols.get(tag)
    }

    /// RSpec: `describe`/`context`/pending `xit` blocks closed by `end`.
    pub fn rspec() -> Self {
        Self::new("rspec", Template::new("# {body}"), "end")
            .with_symbol("d", Template::new("describe '{body}' do"))
            .with_symbol("c", Template::new("context '{body}' do"))
            .with_symbol("i", Template::new("xit '{body}' do"))
    }

    /// Jest: nested `describe` callbacks with `it` leaves closed by `}`.
    pub fn jest() -> Self {
        Self::new("jest", Template::new("// {body}"), "}")
            .with_symbol("d", Template::new("describe('{body}', () => {"))
            .with_symbol("c", Template::new("describe('{body}', () => {"))
            .with_symbol("i", Template::new("it('{body}', () => {"))
    }
}

/// Named collection of render targets.
#[derive(Debug, Clone, Default)]
pub struct TargetCatalog {
    targets: BTreeMap<String, RenderTarget>,
}

impl TargetCatalog {
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        catalog.insert(RenderTarget::rspec());
        catalog.insert(RenderTarget::jest());
        catalog
    }

    /// Add configured targets; a configured name replaces the built-in one.
    pub fn with_targets(mut self, targets: &BTreeMap<String, RenderTarget>) -> Self {
        for (name, target) in targets {
            let mut target = target.clone();
            target.name = name.clone();
            self.insert(target);
        }
        self
    }

    pub fn insert(&mut self, target: RenderTarget) {
        self.targets.insert(target.name.clone(), target);
    }

    pub fn get(&self, name: &str) -> DomainResult<&RenderTarget> {
        self.targets
            .get(name)
            .ok_or_else(|| DomainError::UnknownTarget {
                name: name.to_string(),
                available: self.names(),
            })
    }

    pub fn names(&self) -> Vec<String> {
        self.targets.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderTarget> {
        self.targets.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_replaces_every_placeholder() {
        let t = Template::new("{body} / {body}");
        assert_eq!(t.apply("x"), "x / x");
    }

    #[test]
    fn test_template_without_placeholder_is_constant() {
        assert_eq!(Template::new("---").apply("ignored"), "---");
    }

    #[test]
    fn test_builtin_catalog_names() {
        assert_eq!(TargetCatalog::builtin().names(), vec!["jest", "rspec"]);
    }

    #[test]
    fn test_unknown_target_lists_available() {
        let catalog = TargetCatalog::builtin();
        let err = catalog.get("mocha").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown render target: mocha (available: jest, rspec)"
        );
    }

    #[test]
    fn test_configured_target_overrides_builtin() {
        let mut targets = BTreeMap::new();
        targets.insert(
            "rspec".to_string(),
            RenderTarget::new("", Template::new("## {body}"), "end")
                .with_symbol("i", Template::new("it '{body}' do")),
        );
        let catalog = TargetCatalog::builtin().with_targets(&targets);
        let rspec = catalog.get("rspec").unwrap();
        assert_eq!(rspec.name, "rspec");
        assert!(rspec.symbol("d").is_none());
        assert_eq!(rspec.symbol("i").unwrap().apply("x"), "it 'x' do");
    }
}
