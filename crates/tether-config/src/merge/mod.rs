//! Configuration layering, defaults and environment overrides
//!
//! Layers from lowest to highest priority: built-in defaults, the global
//! config file, `TETHER_*` environment variables, command-line flags.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use tether_core::error::TetherError;

use crate::toml::{load_from_file, ColorMode, TetherToml};
use crate::ConfigResult;

pub const DEFAULT_INSTALLED_FILE: &str = "installed_plugins.json";
pub const DEFAULT_ORIGINS_FILE: &str = "known_marketplaces.json";
pub const DEFAULT_MANIFEST_PATH: &str = ".claude-plugin/plugin.json";

const ENV_PLUGINS_DIR: &str = "TETHER_PLUGINS_DIR";
const ENV_MANIFEST_PATH: &str = "TETHER_MANIFEST_PATH";
const ENV_COLOR: &str = "TETHER_COLOR";
const ENV_NO_COLOR: &str = "NO_COLOR";

/// Fully layered configuration with absolute file locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub plugins_dir: Utf8PathBuf,
    pub installed_file: Utf8PathBuf,
    pub origins_file: Utf8PathBuf,
    /// Relative to each package's install directory
    pub manifest_path: Utf8PathBuf,
    pub color: ColorMode,
    /// Layers that contributed at least one value, lowest priority first
    pub sources: Vec<ConfigSource>,
}

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in defaults
    Defaults,
    /// Global config file
    Global(Utf8PathBuf),
    /// Environment variable
    Environment(String),
    /// CLI flag
    CommandLine,
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub plugins_dir: Option<Utf8PathBuf>,
    pub color: Option<ColorMode>,
}

/// Main configuration loading interface
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    home: Option<Utf8PathBuf>,
    config_file: Option<Utf8PathBuf>,
    env: HashMap<String, String>,
}

impl ConfigLoader {
    /// Loader reading the real home directory and process environment
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir().and_then(|home| Utf8PathBuf::try_from(home).ok()),
            config_file: None,
            env: collect_env_overrides(),
        }
    }

    /// Override the home directory
    pub fn with_home(mut self, home: impl Into<Utf8PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Use an explicit config file instead of `~/.tether/config.toml`
    pub fn with_config_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Replace the captured environment
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Location of the global config file, if one can be determined
    pub fn global_config_path(&self) -> Option<Utf8PathBuf> {
        self.config_file
            .clone()
            .or_else(|| self.home.as_ref().map(|home| home.join(".tether").join("config.toml")))
    }

    /// Load the global config file.
    ///
    /// A missing default file is not an error; a missing explicit one is.
    pub fn load_global_config(&self) -> ConfigResult<Option<(TetherToml, Utf8PathBuf)>> {
        let Some(path) = self.global_config_path() else {
            return Ok(None);
        };

        if self.config_file.is_none() && !path.exists() {
            debug!("No global config at {}", path);
            return Ok(None);
        }

        let config = load_from_file(&path)?;
        Ok(Some((config, path)))
    }

    /// Layer defaults, global file, environment and `cli` into one config
    pub fn load(&self, cli: &CliOverrides) -> ConfigResult<ResolvedConfig> {
        let mut merged = TetherToml::default();
        let mut sources = vec![ConfigSource::Defaults];

        if let Some((global, path)) = self.load_global_config()? {
            debug!("Loaded global config from {}", path);
            merged.overlay(global);
            sources.push(ConfigSource::Global(path));
        }

        let (env_layer, env_keys) = self.env_layer()?;
        merged.overlay(env_layer);
        sources.extend(env_keys.into_iter().map(ConfigSource::Environment));

        let cli_layer = cli_layer(cli);
        if !cli_layer.is_empty() {
            merged.overlay(cli_layer);
            sources.push(ConfigSource::CommandLine);
        }

        self.finish(merged, sources)
    }

    fn env_layer(&self) -> ConfigResult<(TetherToml, Vec<String>)> {
        let mut layer = TetherToml::default();
        let mut keys = Vec::new();

        if let Some(dir) = self.env_value(ENV_PLUGINS_DIR) {
            layer.paths.plugins_dir = Some(self.expand_home(dir));
            keys.push(ENV_PLUGINS_DIR.to_string());
        }
        if let Some(path) = self.env_value(ENV_MANIFEST_PATH) {
            layer.paths.manifest_path = Some(Utf8PathBuf::from(path));
            keys.push(ENV_MANIFEST_PATH.to_string());
        }

        if let Some(color) = self.env_value(ENV_COLOR) {
            let mode = color.parse::<ColorMode>().map_err(|_| TetherError::ConfigValidation {
                field: ENV_COLOR.to_string(),
                reason: format!("expected auto, always or never, got '{}'", color),
            })?;
            layer.output.color = Some(mode);
            keys.push(ENV_COLOR.to_string());
        } else if self.env_value(ENV_NO_COLOR).is_some() {
            layer.output.color = Some(ColorMode::Never);
            keys.push(ENV_NO_COLOR.to_string());
        }

        crate::toml::validate_config(&layer)?;
        Ok((layer, keys))
    }

    fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    fn expand_home(&self, path: &str) -> Utf8PathBuf {
        match (path.strip_prefix("~/"), &self.home) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => Utf8PathBuf::from(path),
        }
    }

    fn finish(&self, merged: TetherToml, sources: Vec<ConfigSource>) -> ConfigResult<ResolvedConfig> {
        let TetherToml { paths, output } = merged;

        let plugins_dir = match paths.plugins_dir {
            Some(dir) => dir,
            None => self.default_plugins_dir()?,
        };
        let installed_file = plugins_dir.join(
            paths
                .installed_file
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_INSTALLED_FILE)),
        );
        let origins_file = plugins_dir.join(
            paths
                .origins_file
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_ORIGINS_FILE)),
        );

        Ok(ResolvedConfig {
            installed_file,
            origins_file,
            manifest_path: paths
                .manifest_path
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_MANIFEST_PATH)),
            color: output.color.unwrap_or_default(),
            plugins_dir,
            sources,
        })
    }

    fn default_plugins_dir(&self) -> ConfigResult<Utf8PathBuf> {
        let home = self.home.as_deref().ok_or_else(|| TetherError::ConfigValidation {
            field: "home_dir".to_string(),
            reason: format!(
                "Could not determine home directory; set {} or pass --plugins-dir",
                ENV_PLUGINS_DIR
            ),
        })?;
        Ok(default_plugins_dir_in(home))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// `~/.claude/plugins` under `home`
pub fn default_plugins_dir_in(home: &Utf8Path) -> Utf8PathBuf {
    home.join(".claude").join("plugins")
}

fn cli_layer(cli: &CliOverrides) -> TetherToml {
    let mut layer = TetherToml::default();
    layer.paths.plugins_dir = cli.plugins_dir.clone();
    layer.output.color = cli.color;
    layer
}

/// Collect the environment variables the loader understands
pub fn collect_env_overrides() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with("TETHER_") || key == ENV_NO_COLOR)
        .collect()
}
