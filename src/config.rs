// ============================================================================
// config.rs — Tool configuration (assetsmith.toml)
// ============================================================================
//
// Every value has a built-in default matching the project layout the tools
// were written for, so running without a config file works out of the box.
// A config file only needs the keys it wants to override.
// ============================================================================

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::colors::DEFAULT_COLOR_MAPPING;
use crate::error::ConfigError;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "assetsmith.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub icons: IconConfig,
    pub colors: ColorConfig,
    pub promo: PromoConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconConfig {
    /// Directory the catalog output paths are relative to
    pub project_root: PathBuf,
    /// Source image, relative to `project_root`
    pub source: PathBuf,
    /// Asset manifest, relative to `project_root`
    pub manifest: PathBuf,
    /// Optional "#RRGGBB" fill under the web maskable icons
    pub maskable_background: Option<String>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            source: PathBuf::from("assets/images/icone1.jpg"),
            manifest: PathBuf::from("pubspec.yaml"),
            maskable_background: None,
        }
    }
}

impl IconConfig {
    pub fn source_path(&self) -> PathBuf {
        self.project_root.join(&self.source)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(&self.manifest)
    }

    /// The source relative to `project_root`, or `None` when it lies outside.
    pub fn relative_source(&self) -> Option<PathBuf> {
        let relative = if self.source.is_absolute() {
            self.source.strip_prefix(&self.project_root).ok()?.to_path_buf()
        } else {
            self.source.clone()
        };
        if relative.components().any(|c| matches!(c, Component::ParentDir)) {
            return None;
        }
        Some(relative)
    }

    /// The source path as it appears in the manifest's asset list.
    pub fn asset_entry(&self) -> String {
        self.relative_source()
            .unwrap_or_else(|| self.source.clone())
            .to_string_lossy()
            .replace('\\', "/")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub root: PathBuf,
    /// File extension (without dot) of eligible files
    pub extension: String,
    /// Files whose name starts with this are never rewritten
    pub excluded_prefix: String,
    /// Imports are only added when the lowercased file lacks this marker
    pub theme_marker: String,
    pub imports: Vec<String>,
    /// Literal (e.g. "0xFF4A90E2") to constant name
    pub mapping: BTreeMap<String, String>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("lib"),
            extension: "dart".to_string(),
            excluded_prefix: "app_theme".to_string(),
            theme_marker: "app_theme".to_string(),
            imports: vec![
                "import 'package:flutter/material.dart';".to_string(),
                "import '../utils/app_theme.dart';".to_string(),
            ],
            mapping: DEFAULT_COLOR_MAPPING
                .iter()
                .map(|(literal, constant)| (literal.to_string(), constant.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromoConfig {
    pub prefix: String,
    pub count: usize,
    pub description: String,
    pub discount_percent: u8,
    pub max_uses: u32,
    pub table: String,
}

impl Default for PromoConfig {
    fn default() -> Self {
        Self {
            prefix: "SMOOTH".to_string(),
            count: 100,
            description: "Réduction 10%".to_string(),
            discount_percent: 10,
            max_uses: 1,
            table: "promo_codes".to_string(),
        }
    }
}

impl ToolConfig {
    /// Loads `path` if given (it must exist), else `assetsmith.toml` from the
    /// working directory if present, else the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                Self::from_file(p)?
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    log::debug!("no {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.icons.relative_source().is_none() {
            return Err(ConfigError::Invalid {
                key: "icons.source",
                reason: format!(
                    "'{}' is outside the project root '{}'",
                    self.icons.source.display(),
                    self.icons.project_root.display()
                ),
            });
        }
        if let Some(bg) = &self.icons.maskable_background {
            if parse_hex_color(bg).is_none() {
                return Err(ConfigError::Invalid {
                    key: "icons.maskable_background",
                    reason: format!("'{}' is not a #RRGGBB color", bg),
                });
            }
        }
        if self.colors.extension.is_empty() {
            return Err(ConfigError::Invalid {
                key: "colors.extension",
                reason: "must not be empty".to_string(),
            });
        }
        for literal in self.colors.mapping.keys() {
            if !is_argb_literal(literal) {
                return Err(ConfigError::Invalid {
                    key: "colors.mapping",
                    reason: format!("'{}' is not a 0xAARRGGBB literal", literal),
                });
            }
        }
        if self.promo.prefix.is_empty() {
            return Err(ConfigError::Invalid {
                key: "promo.prefix",
                reason: "must not be empty".to_string(),
            });
        }
        if self.promo.discount_percent > 100 {
            return Err(ConfigError::Invalid {
                key: "promo.discount_percent",
                reason: format!("{} is above 100", self.promo.discount_percent),
            });
        }
        Ok(())
    }
}

/// Parses "#RRGGBB" (leading '#' optional).
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

fn is_argb_literal(literal: &str) -> bool {
    match literal.strip_prefix("0x") {
        Some(digits) => digits.len() == 8 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_project_layout() {
        let config = ToolConfig::default();
        assert_eq!(config.icons.source_path(), Path::new("./assets/images/icone1.jpg"));
        assert_eq!(config.icons.asset_entry(), "assets/images/icone1.jpg");
        assert_eq!(config.colors.mapping.len(), 18);
        assert_eq!(config.colors.mapping["0xFF4A90E2"], "AppTheme.primaryBlue");
        assert_eq!(config.promo.prefix, "SMOOTH");
        assert_eq!(config.promo.count, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: ToolConfig = toml::from_str(
            r##"
[promo]
prefix = "SPRING"
count = 5

[icons]
maskable_background = "#112233"
"##,
        )
        .unwrap();
        assert_eq!(config.promo.prefix, "SPRING");
        assert_eq!(config.promo.count, 5);
        assert_eq!(config.promo.discount_percent, 10);
        assert_eq!(config.colors.extension, "dart");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_source_outside_project_root_rejected() {
        let mut config = ToolConfig::default();
        config.icons.source = PathBuf::from("../shared/logo.png");
        assert!(config.icons.relative_source().is_none());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "icons.source", .. })
        ));

        let mut config = ToolConfig::default();
        config.icons.project_root = PathBuf::from("/work/app");
        config.icons.source = PathBuf::from("/elsewhere/logo.png");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_absolute_source_inside_root_is_made_relative() {
        let mut config = ToolConfig::default();
        config.icons.project_root = PathBuf::from("/work/app");
        config.icons.source = PathBuf::from("/work/app/assets/images/logo.png");
        assert!(config.validate().is_ok());
        assert_eq!(config.icons.asset_entry(), "assets/images/logo.png");
        assert_eq!(config.icons.source_path(), Path::new("/work/app/assets/images/logo.png"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<ToolConfig, _> = toml::from_str("[promo]\nprefx = \"X\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ToolConfig::default();
        config.icons.maskable_background = Some("blue".to_string());
        assert!(config.validate().is_err());

        let mut config = ToolConfig::default();
        config.colors.mapping.insert("red".to_string(), "AppTheme.red".to_string());
        assert!(config.validate().is_err());

        let mut config = ToolConfig::default();
        config.promo.discount_percent = 120;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ToolConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.toml");
        fs::write(&path, "[colors]\nroot = \"app/lib\"\n").unwrap();
        let config = ToolConfig::load(Some(&path)).unwrap();
        assert_eq!(config.colors.root, PathBuf::from("app/lib"));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFFFFF"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("4a90e2"), Some([0x4a, 0x90, 0xe2]));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }
}
