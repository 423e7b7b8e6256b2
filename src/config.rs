//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/gencoll/gencoll.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `GENCOLL_*` prefix, `__` between section and key
//!    (e.g. `GENCOLL_ARRAY__INITIAL_CAPACITY=4`)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::domain::DEFAULT_CAPACITY;

/// How the CLI renders an ordered tree.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TreeStyle {
    /// Sideways, right subtree on top (`-> value` lines)
    #[default]
    Indent,
    /// Box-drawing tree, root on top
    Box,
}

/// Widest `tree.indent` accepted from configuration.
pub const MAX_INDENT: usize = 64;

/// Dynamic array settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ArraySettings {
    /// Capacity before the first growth
    pub initial_capacity: usize,
}

impl Default for ArraySettings {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Ordered tree rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeSettings {
    /// Spaces per level for the indented rendering, at most [`MAX_INDENT`]
    pub indent: usize,
    pub style: TreeStyle,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            indent: 4,
            style: TreeStyle::default(),
        }
    }
}

/// Unified configuration for gencoll.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub array: ArraySettings,
    pub tree: TreeSettings,
}

/// Get the XDG config directory for gencoll.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gencoll").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("gencoll.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied path.
pub fn expand_path(path: &Path) -> Result<PathBuf, ApplicationError> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw).map_err(|e| ApplicationError::Config {
        message: format!("expand {}: {}", raw, e),
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}

impl Settings {
    /// Load settings with layered precedence, reading the XDG global file and
    /// `GENCOLL_*` from the process environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with_env(global_config_path().as_deref(), config_file, None)
    }

    /// Load settings from an explicit global file location and environment
    /// map (`None` reads the process environment).
    #[instrument(level = "debug", skip(env))]
    pub fn load_with_env(
        global_file: Option<&Path>,
        config_file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Compiled defaults
        let mut builder =
            Config::builder().add_source(Config::try_from(&Settings::default()).map_err(config_err)?);

        // 2. Global config, optional
        if let Some(global_path) = global_file {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        // 3. Explicit config file, must exist
        if let Some(path) = config_file {
            let path = expand_path(path)?;
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("explicit config: {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        // 4. Environment variables
        builder = builder.add_source(
            Environment::with_prefix("GENCOLL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = builder.build().map_err(config_err)?;
        let settings: Settings = config.try_deserialize().map_err(config_err)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that deserialize but cannot be used.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.tree.indent > MAX_INDENT {
            return Err(ApplicationError::Config {
                message: format!(
                    "tree.indent must be at most {MAX_INDENT}, got {}",
                    self.tree.indent
                ),
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
        r#"# gencoll configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/gencoll/gencoll.toml
#   Explicit: gencoll --config <file>
#   Env:      GENCOLL_<SECTION>__<KEY>, e.g. GENCOLL_ARRAY__INITIAL_CAPACITY=4

[array]
# Capacity of a new dynamic array; doubles whenever it is full
# initial_capacity = 10

[tree]
# Spaces per level in the indented rendering
# indent = 4

# Rendering used by `gencoll tree`: "indent" or "box"
# style = "indent"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
