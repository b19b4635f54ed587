//! Layered configuration loading.
//!
//! The effective configuration is the bundled default with two optional
//! override files folded on top of it:
//!
//! 1. `~/.lint-along.yml` (per user)
//! 2. `.lint-along.yml` in the current working directory (per project)
//!
//! Later files replace whole top-level keys from earlier ones.

pub mod layers;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::ConfigError;

pub use layers::merge_layers;

/// Default configuration shipped with the binary.
pub const DEFAULT_CONFIG: &str = include_str!("../../assets/config.yml");

/// File name searched for in the home directory and the working directory.
pub const CONFIG_FILE_NAME: &str = ".lint-along.yml";

/// Effective configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Linter program followed by its arguments.
    pub linter: Vec<String>,

    /// Exit status the linter uses to report that it does not exist.
    #[serde(default = "default_not_found_exit_code")]
    pub not_found_exit_code: Option<i32>,
}

fn default_not_found_exit_code() -> Option<i32> {
    Some(2)
}

impl Config {
    /// Load the configuration for a run started in `cwd`.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let mut paths = Vec::new();
        if let Some(user) = user_config_path() {
            paths.push(user);
        }
        paths.push(project_config_path(cwd));

        Self::load_layers(&paths)
    }

    /// Load the bundled default and fold every existing file in `paths` on top.
    ///
    /// Paths that do not exist are skipped; the order of `paths` is the
    /// precedence order (last wins).
    pub fn load_layers(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut layers = vec![default_layer()?];

        for path in paths {
            if !path.is_file() {
                continue;
            }
            debug!("Applying config layer {}", path.display());
            layers.push(read_layer(path)?);
        }

        Self::from_mapping(merge_layers(layers))
    }

    /// Build a config from an already merged mapping.
    pub fn from_mapping(mapping: Mapping) -> Result<Self, ConfigError> {
        let config: Config =
            serde_yaml::from_value(Value::Mapping(mapping)).map_err(ConfigError::Invalid)?;

        if config.linter.is_empty() {
            return Err(ConfigError::EmptyLinterCommand);
        }

        Ok(config)
    }

    /// The bundled default configuration with no overrides applied.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_mapping(default_layer()?)
    }
}

/// Path of the per-user override file, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Path of the per-project override file for `cwd`.
pub fn project_config_path(cwd: &Path) -> PathBuf {
    cwd.join(CONFIG_FILE_NAME)
}

/// Parse the bundled default into a layer.
fn default_layer() -> Result<Mapping, ConfigError> {
    let document: Value =
        serde_yaml::from_str(DEFAULT_CONFIG).map_err(ConfigError::InvalidDefault)?;

    match document {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(ConfigError::NotAMapping {
            path: PathBuf::from("assets/config.yml"),
        }),
    }
}

/// Read and parse one override file.
fn read_layer(path: &Path) -> Result<Mapping, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let document: Value =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    layers::as_layer(document).ok_or_else(|| ConfigError::NotAMapping {
        path: path.to_path_buf(),
    })
}
