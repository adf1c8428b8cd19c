//! Entity definitions for the exported world.

mod cells;
mod records;

pub use cells::*;
pub use records::*;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Numeric identifier of an entity within its kind (`i` in FMG terms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl EntityId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The id as text, the form used for mapping-file keys.
    pub fn as_key(&self) -> String {
        self.0.to_string()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinds of entities in a world document, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Cell,
    Burg,
    State,
    Province,
    Culture,
    Religion,
    Feature,
    River,
}

impl EntityKind {
    /// All kinds in the fixed processing order.
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Cell,
        EntityKind::Burg,
        EntityKind::State,
        EntityKind::Province,
        EntityKind::Culture,
        EntityKind::Religion,
        EntityKind::Feature,
        EntityKind::River,
    ];

    /// Capitalized prefix used in note filenames (`Burg-2-...`).
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Cell => "Cell",
            EntityKind::Burg => "Burg",
            EntityKind::State => "State",
            EntityKind::Province => "Province",
            EntityKind::Culture => "Culture",
            EntityKind::Religion => "Religion",
            EntityKind::Feature => "Feature",
            EntityKind::River => "River",
        }
    }

    /// Vault folder holding the notes of this kind.
    pub fn folder(&self) -> &'static str {
        match self {
            EntityKind::Cell => "Cells",
            EntityKind::Burg => "Burgs",
            EntityKind::State => "States",
            EntityKind::Province => "Provinces",
            EntityKind::Culture => "Cultures",
            EntityKind::Religion => "Religions",
            EntityKind::Feature => "Features",
            EntityKind::River => "Rivers",
        }
    }

    /// Lowercase slug used for emblem filenames (`burg-2.svg`).
    pub fn slug(&self) -> &'static str {
        match self {
            EntityKind::Cell => "cell",
            EntityKind::Burg => "burg",
            EntityKind::State => "state",
            EntityKind::Province => "province",
            EntityKind::Culture => "culture",
            EntityKind::Religion => "religion",
            EntityKind::Feature => "feature",
            EntityKind::River => "river",
        }
    }

    /// Key of this kind's container inside `pack`.
    pub fn pack_key(&self) -> &'static str {
        match self {
            EntityKind::Cell => "cells",
            EntityKind::Burg => "burgs",
            EntityKind::State => "states",
            EntityKind::Province => "provinces",
            EntityKind::Culture => "cultures",
            EntityKind::Religion => "religions",
            EntityKind::Feature => "features",
            EntityKind::River => "rivers",
        }
    }

    /// Whether index 0 of the container is a placeholder.
    pub fn has_sentinel(&self) -> bool {
        !matches!(self, EntityKind::Cell | EntityKind::River)
    }

    /// Whether entities of this kind can carry a crest.
    pub fn has_emblem(&self) -> bool {
        !matches!(self, EntityKind::Cell | EntityKind::River)
    }

    /// Whether the note filename carries a name suffix.
    pub fn is_named(&self) -> bool {
        !matches!(self, EntityKind::Cell | EntityKind::River)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// A cross-reference to another entity. The target may not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: EntityId,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self {
            kind,
            id: EntityId(id),
        }
    }
}

/// Where an entity's crest comes from, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmblemSource {
    /// Vector graphic embedded in the record (`coa.svg`).
    EmbeddedSvg(String),
    /// Local path or HTTP(S) URL (`emblem_url`).
    Reference(String),
    #[default]
    None,
}

impl EmblemSource {
    /// Embedded SVG takes precedence over an external reference.
    pub fn from_record(record: &Map<String, Value>) -> Self {
        if let Some(svg) = record
            .get("coa")
            .and_then(Value::as_object)
            .and_then(|coa| coa.get("svg"))
            .and_then(Value::as_str)
        {
            return EmblemSource::EmbeddedSvg(svg.to_string());
        }

        match record.get("emblem_url") {
            Some(Value::String(reference)) if !reference.is_empty() => {
                EmblemSource::Reference(reference.clone())
            }
            _ => EmblemSource::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, EmblemSource::None)
    }
}
