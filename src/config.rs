//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/outline2spec/outline2spec.toml`
//! 3. Local config: `./.outline2spec.toml`, or the file passed with `--config`
//! 4. Environment variables: `OUTLINE2SPEC_*` prefix

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{RenderTarget, DEFAULT_INDENT_UNIT, DEFAULT_RENDER_INDENT};

/// File name of the local config file.
pub const LOCAL_CONFIG_FILE: &str = ".outline2spec.toml";

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_target: Option<String>,
    pub indent_unit: Option<usize>,
    pub render_indent: Option<usize>,
    pub strict: Option<bool>,
    pub targets: BTreeMap<String, RenderTarget>,
}

/// Unified configuration for outline2spec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Target used when none is given on the command line (default: rspec)
    pub default_target: String,
    /// Input spaces per nesting level (default: 4)
    pub indent_unit: usize,
    /// Output spaces per nesting level (default: 2)
    pub render_indent: usize,
    /// Fail on indentation diagnostics instead of only reporting them
    pub strict: bool,
    /// Additional render targets, keyed by name; replace built-ins of the same name
    pub targets: BTreeMap<String, RenderTarget>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_target: "rspec".into(),
            indent_unit: DEFAULT_INDENT_UNIT,
            render_indent: DEFAULT_RENDER_INDENT,
            strict: false,
            targets: BTreeMap::new(),
        }
    }
}

/// Get the XDG config directory for outline2spec.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "outline2spec").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("outline2spec.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - Targets: merged by name, an overlay target replaces the whole definition
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut targets = self.targets.clone();
        for (name, target) in &overlay.targets {
            targets.insert(name.clone(), target.clone());
        }

        Self {
            default_target: overlay
                .default_target
                .clone()
                .unwrap_or_else(|| self.default_target.clone()),
            indent_unit: overlay.indent_unit.unwrap_or(self.indent_unit),
            render_indent: overlay.render_indent.unwrap_or(self.render_indent),
            strict: overlay.strict.unwrap_or(self.strict),
            targets,
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory searched for `.outline2spec.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/outline2spec/outline2spec.toml`
    /// 3. Local config: `<local_dir>/.outline2spec.toml`
    /// 4. Environment variables: `OUTLINE2SPEC_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let local = local_dir
            .map(local_config_path)
            .filter(|path| path.exists());
        Self::load_layers(local.as_deref())
    }

    /// Like [`Settings::load`], but the local layer is an explicit file that must exist.
    pub fn load_with_file(config_file: &Path) -> Result<Self, ApplicationError> {
        if !config_file.is_file() {
            return Err(ApplicationError::Config {
                message: format!("config file not found: {}", config_file.display()),
            });
        }
        Self::load_layers(Some(config_file))
    }

    fn load_layers(local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(local_path) = local {
            debug!("local config: {}", local_path.display());
            let raw = load_raw_settings(local_path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply OUTLINE2SPEC_* environment variables as explicit overrides.
    ///
    /// Only scalar settings can be overridden; targets come from files.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("OUTLINE2SPEC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("default_target") {
            settings.default_target = val;
        }
        if let Ok(val) = config.get_int("indent_unit") {
            settings.indent_unit = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("indent_unit must not be negative: {val}"),
            })?;
        }
        if let Ok(val) = config.get_int("render_indent") {
            settings.render_indent = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("render_indent must not be negative: {val}"),
            })?;
        }
        if let Ok(val) = config.get_bool("strict") {
            settings.strict = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.indent_unit == 0 {
            return Err(ApplicationError::Config {
                message: "indent_unit must be at least 1".into(),
            });
        }
        if self.default_target.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "default_target must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# outline2spec configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/outline2spec/outline2spec.toml
#   Local:  ./.outline2spec.toml (or --config <file>)
#   Env:    OUTLINE2SPEC_* environment variables (scalars only)

# Target used when --target is not given
# default_target = "rspec"

# Spaces per nesting level in the input outline
# indent_unit = 4

# Spaces per nesting level in the generated code
# render_indent = 2

# Treat indentation diagnostics as errors
# strict = false

# Custom targets. A target named like a built-in (rspec, jest) replaces it.
# "{body}" is replaced by the line text.
#
# [targets.mocha]
# comment = "// {body}"
# terminal = "});"
#
# [targets.mocha.symbols]
# d = "describe('{body}', function () {"
# c = "context('{body}', function () {"
# i = "it('{body}');"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
