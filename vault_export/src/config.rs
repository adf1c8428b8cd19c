//! Export configuration.
//!
//! Settings come from an optional TOML file, then command-line flags
//! override individual values. Matcher settings are validated once, up
//! front, into a [`MatchConfig`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::bundles::{BundleMap, MatchConfig, MatchMode, PatternTemplate};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Output vault directory
    #[serde(default = "default_vault_root")]
    pub vault_root: PathBuf,

    /// Fetch remote emblem URLs
    #[serde(default)]
    pub download_emblems: bool,

    /// Add generated lore to settlement notes
    #[serde(default)]
    pub with_lore: bool,

    #[serde(default)]
    pub bundles: BundleSettings,
}

/// Raw matcher settings, as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleSettings {
    /// Directory holding externally generated settlement bundles
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub mode: ModeName,

    /// Pattern for `regex` mode; may use `{id}` and `{name}`
    #[serde(default)]
    pub pattern: Option<String>,

    /// JSON mapping file for `map` mode
    #[serde(default)]
    pub map_file: Option<PathBuf>,

    #[serde(default)]
    pub dedup: bool,

    #[serde(default)]
    pub archive: bool,
}

/// Match strategy names accepted in config files and on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    #[default]
    Substring,
    Exact,
    Regex,
    Map,
}

/// Values given on the command line. `None` and `false` leave the file
/// value untouched.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub vault_root: Option<PathBuf>,
    pub download_emblems: bool,
    pub with_lore: bool,
    pub bundle_root: Option<PathBuf>,
    pub mode: Option<ModeName>,
    pub pattern: Option<String>,
    pub map_file: Option<PathBuf>,
    pub dedup: bool,
    pub archive: bool,
}

fn default_vault_root() -> PathBuf {
    PathBuf::from("World")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            vault_root: default_vault_root(),
            download_emblems: false,
            with_lore: false,
            bundles: BundleSettings::default(),
        }
    }
}

impl ExportConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` when given, otherwise start from defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(vault_root) = overrides.vault_root {
            self.vault_root = vault_root;
        }
        self.download_emblems |= overrides.download_emblems;
        self.with_lore |= overrides.with_lore;

        let bundles = &mut self.bundles;
        if overrides.bundle_root.is_some() {
            bundles.root = overrides.bundle_root;
        }
        if let Some(mode) = overrides.mode {
            bundles.mode = mode;
        }
        if overrides.pattern.is_some() {
            bundles.pattern = overrides.pattern;
        }
        if overrides.map_file.is_some() {
            bundles.map_file = overrides.map_file;
        }
        bundles.dedup |= overrides.dedup;
        bundles.archive |= overrides.archive;
    }
}

impl MatchConfig {
    /// Validate raw settings. Regex mode needs a compilable pattern and map
    /// mode a readable mapping file.
    pub fn from_settings(settings: &BundleSettings) -> Result<Self, ConfigError> {
        let mode = match settings.mode {
            ModeName::Substring => MatchMode::Substring,
            ModeName::Exact => MatchMode::Exact,
            ModeName::Regex => {
                let pattern = settings.pattern.as_deref().ok_or(ConfigError::MissingPattern)?;
                MatchMode::Regex(PatternTemplate::new(pattern)?)
            }
            ModeName::Map => {
                let path = settings.map_file.as_deref().ok_or(ConfigError::MissingMapFile)?;
                MatchMode::Map(BundleMap::from_path(path)?)
            }
        };

        Ok(MatchConfig::new(mode)
            .with_dedup(settings.dedup)
            .with_archive(settings.archive))
    }
}
