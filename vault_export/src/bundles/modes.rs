//! Match configuration for external asset bundles.

use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use fmg_model::EntityId;

use crate::error::ConfigError;

/// How bundle entries are selected for an entity.
#[derive(Debug, Clone, Default)]
pub enum MatchMode {
    /// Entry name equals or contains one of the entity's tokens.
    #[default]
    Substring,
    /// Entry name equals one of the entity's tokens. A file also matches
    /// when its name without extension does, so `burg-8.png` is picked for
    /// burg 8; directories never match by stem.
    Exact,
    /// Entry name matches a pattern.
    Regex(PatternTemplate),
    /// Entries listed explicitly per entity id.
    Map(BundleMap),
}

impl MatchMode {
    pub fn name(&self) -> &'static str {
        match self {
            MatchMode::Substring => "substring",
            MatchMode::Exact => "exact",
            MatchMode::Regex(_) => "regex",
            MatchMode::Map(_) => "map",
        }
    }
}

/// Process-wide matcher settings, fixed before the export starts.
#[derive(Debug, Clone, Default)]
pub struct MatchConfig {
    pub mode: MatchMode,
    /// Report an identical existing vault file instead of copying.
    pub dedup: bool,
    /// Bundle all matched entries into one zip per entity.
    pub archive: bool,
}

impl MatchConfig {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_archive(mut self, archive: bool) -> Self {
        self.archive = archive;
        self
    }
}

/// A regular expression applied to lowercase entry names.
///
/// `{id}` and `{name}` are replaced by the entity id and its lowercase safe
/// name (both regex-escaped) before matching.
#[derive(Debug, Clone)]
pub struct PatternTemplate {
    template: String,
    /// Set when the template has no placeholders.
    fixed: Option<Regex>,
}

impl PatternTemplate {
    /// Validate and store a pattern.
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();
        if template.contains("{id}") || template.contains("{name}") {
            Regex::new(&expand(&template, "0", "name"))?;
            Ok(Self {
                template,
                fixed: None,
            })
        } else {
            let fixed = Regex::new(&template)?;
            Ok(Self {
                template,
                fixed: Some(fixed),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// The regex for one entity.
    pub fn regex_for(&self, id: EntityId, safe_name: &str) -> Result<Regex, regex::Error> {
        match &self.fixed {
            Some(regex) => Ok(regex.clone()),
            None => Regex::new(&expand(
                &self.template,
                &regex::escape(&id.to_string()),
                &regex::escape(safe_name),
            )),
        }
    }
}

fn expand(template: &str, id: &str, name: &str) -> String {
    template.replace("{id}", id).replace("{name}", name)
}

/// Explicit entity id -> entry list mapping, loaded from JSON.
///
/// Keys are always text; lookups render the id as text first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct BundleMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl BundleMap {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::MapRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::MapParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Entry names for an entity, relative to the bundle root.
    pub fn entries_for(&self, id: EntityId) -> &[String] {
        self.entries
            .get(&id.as_key())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
