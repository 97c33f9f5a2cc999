//! tether.toml parsing and validation

use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use tether_core::error::TetherError;

use crate::ConfigResult;

/// Complete tether.toml configuration; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TetherToml {
    #[serde(default)]
    pub paths: PathsSection,

    #[serde(default)]
    pub output: OutputSection,
}

/// Where the registries and manifests live
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    /// Root directory of installed plugins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins_dir: Option<Utf8PathBuf>,

    /// Installed registry file, relative to `plugins_dir` unless absolute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_file: Option<Utf8PathBuf>,

    /// Known origins file, relative to `plugins_dir` unless absolute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origins_file: Option<Utf8PathBuf>,

    /// Manifest location inside each install directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_path: Option<Utf8PathBuf>,
}

/// Human output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorMode>,
}

/// When to color human output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = TetherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(TetherError::ConfigValidation {
                field: "color".to_string(),
                reason: format!("expected auto, always or never, got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        })
    }
}

impl TetherToml {
    /// Overlay `top` onto `self`; fields set in `top` win
    pub fn overlay(&mut self, top: TetherToml) {
        let TetherToml { paths, output } = top;
        if paths.plugins_dir.is_some() {
            self.paths.plugins_dir = paths.plugins_dir;
        }
        if paths.installed_file.is_some() {
            self.paths.installed_file = paths.installed_file;
        }
        if paths.origins_file.is_some() {
            self.paths.origins_file = paths.origins_file;
        }
        if paths.manifest_path.is_some() {
            self.paths.manifest_path = paths.manifest_path;
        }
        if output.color.is_some() {
            self.output.color = output.color;
        }
    }

    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        *self == TetherToml::default()
    }
}

/// Parse tether.toml content
pub fn parse_tether_toml(content: &str) -> ConfigResult<TetherToml> {
    let config: TetherToml = toml::from_str(content).map_err(|e| TetherError::TomlParse {
        message: e.to_string(),
    })?;

    validate_config(&config)?;
    Ok(config)
}

/// Serialize a configuration back to TOML
pub fn serialize_tether_toml(config: &TetherToml) -> ConfigResult<String> {
    toml::to_string_pretty(config).map_err(|e| TetherError::TomlParse {
        message: format!("serialization failed: {}", e),
    })
}

/// Check paths for values that cannot work at resolution time
pub fn validate_config(config: &TetherToml) -> ConfigResult<()> {
    let paths = &config.paths;

    if let Some(manifest_path) = &paths.manifest_path {
        validate_non_empty("paths.manifest_path", manifest_path)?;
        if manifest_path.is_absolute() {
            return Err(TetherError::ConfigValidation {
                field: "paths.manifest_path".to_string(),
                reason: format!(
                    "'{}' must be relative to each plugin's install directory",
                    manifest_path
                ),
            });
        }
    }
    if let Some(dir) = &paths.plugins_dir {
        validate_non_empty("paths.plugins_dir", dir)?;
    }
    if let Some(file) = &paths.installed_file {
        validate_non_empty("paths.installed_file", file)?;
    }
    if let Some(file) = &paths.origins_file {
        validate_non_empty("paths.origins_file", file)?;
    }

    Ok(())
}

fn validate_non_empty(field: &str, path: &Utf8Path) -> ConfigResult<()> {
    if path.as_str().trim().is_empty() {
        return Err(TetherError::ConfigValidation {
            field: field.to_string(),
            reason: "path must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Load and validate a tether.toml file
pub fn load_from_file(path: &Utf8Path) -> ConfigResult<TetherToml> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TetherError::io(format!("Failed to read {}", path), e))?;

    parse_tether_toml(&content).map_err(|e| match e {
        TetherError::TomlParse { message } => TetherError::TomlParse {
            message: format!("in file {}: {}", path, message),
        },
        other => other,
    })
}
