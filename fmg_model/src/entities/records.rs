//! Strict record types for the named entity kinds.
//!
//! Each record is decoded from one untyped JSON object with an explicit
//! default per field. Serialized field names are the note metadata keys.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{EmblemSource, EntityId, EntityKind};
use crate::fields::field;

/// A record type that can be decoded from one element of a `pack` sequence.
pub trait WorldRecord: Serialize + Sized {
    const KIND: EntityKind;

    /// Decode a record, defaulting every missing or malformed field.
    fn decode(record: &Map<String, Value>) -> Self;

    fn id(&self) -> EntityId;

    /// Text used for the note filename suffix and heading.
    fn display_name(&self) -> &str;

    fn emblem(&self) -> &EmblemSource {
        static NO_EMBLEM: EmblemSource = EmblemSource::None;
        &NO_EMBLEM
    }
}

fn id_field(record: &Map<String, Value>) -> EntityId {
    EntityId(field(record, "i", 0))
}

/// A settlement.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BurgRecord {
    #[serde(rename = "burg_id")]
    pub id: EntityId,
    pub name: String,
    pub cell: i64,
    pub culture: i64,
    pub state: i64,
    pub feature: i64,
    pub population: f64,
    #[serde(rename = "type")]
    pub burg_type: String,
    pub capital: bool,
    pub port: bool,
    pub citadel: bool,
    pub plaza: bool,
    pub temple: bool,
    pub walls: bool,
    #[serde(skip)]
    pub emblem: EmblemSource,
}

impl WorldRecord for BurgRecord {
    const KIND: EntityKind = EntityKind::Burg;

    fn decode(record: &Map<String, Value>) -> Self {
        Self {
            id: id_field(record),
            name: field(record, "name", String::new()),
            cell: field(record, "cell", 0),
            culture: field(record, "culture", 0),
            state: field(record, "state", 0),
            feature: field(record, "feature", 0),
            population: field(record, "population", 0.0),
            burg_type: field(record, "type", String::new()),
            capital: field(record, "capital", false),
            port: field(record, "port", false),
            citadel: field(record, "citadel", false),
            plaza: field(record, "plaza", false),
            temple: field(record, "temple", false),
            walls: field(record, "walls", false),
            emblem: EmblemSource::from_record(record),
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn emblem(&self) -> &EmblemSource {
        &self.emblem
    }
}

/// A political region.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StateRecord {
    #[serde(rename = "state_id")]
    pub id: EntityId,
    pub name: String,
    pub form: String,
    pub culture: i64,
    pub capital_burg: i64,
    pub provinces: Vec<i64>,
    pub neighbors: Vec<i64>,
    pub burgs: Vec<i64>,
    #[serde(skip)]
    pub emblem: EmblemSource,
}

impl WorldRecord for StateRecord {
    const KIND: EntityKind = EntityKind::State;

    fn decode(record: &Map<String, Value>) -> Self {
        Self {
            id: id_field(record),
            name: field(record, "name", String::new()),
            form: field(record, "form", String::new()),
            culture: field(record, "culture", 0),
            capital_burg: field(record, "capital", 0),
            provinces: field(record, "provinces", Vec::new()),
            neighbors: field(record, "neighbors", Vec::new()),
            burgs: field(record, "burgs", Vec::new()),
            emblem: EmblemSource::from_record(record),
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn emblem(&self) -> &EmblemSource {
        &self.emblem
    }
}

/// A sub-region of a state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProvinceRecord {
    #[serde(rename = "province_id")]
    pub id: EntityId,
    pub name: String,
    pub state: i64,
    pub capital_burg: i64,
    pub burgs: Vec<i64>,
    pub cells: Vec<i64>,
    #[serde(skip)]
    pub emblem: EmblemSource,
}

impl WorldRecord for ProvinceRecord {
    const KIND: EntityKind = EntityKind::Province;

    fn decode(record: &Map<String, Value>) -> Self {
        Self {
            id: id_field(record),
            name: field(record, "name", String::new()),
            state: field(record, "state", 0),
            capital_burg: field(record, "burg", 0),
            burgs: field(record, "burgs", Vec::new()),
            cells: field(record, "cells", Vec::new()),
            emblem: EmblemSource::from_record(record),
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn emblem(&self) -> &EmblemSource {
        &self.emblem
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CultureRecord {
    #[serde(rename = "culture_id")]
    pub id: EntityId,
    pub name: String,
    pub origins: Vec<i64>,
    pub color: String,
    /// Defaults to 1.0, the neutral expansion rate.
    pub expansionism: f64,
    #[serde(skip)]
    pub emblem: EmblemSource,
}

impl WorldRecord for CultureRecord {
    const KIND: EntityKind = EntityKind::Culture;

    fn decode(record: &Map<String, Value>) -> Self {
        Self {
            id: id_field(record),
            name: field(record, "name", String::new()),
            origins: field(record, "origins", Vec::new()),
            color: field(record, "color", String::new()),
            expansionism: field(record, "expansionism", 1.0),
            emblem: EmblemSource::from_record(record),
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn emblem(&self) -> &EmblemSource {
        &self.emblem
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReligionRecord {
    #[serde(rename = "religion_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub religion_type: String,
    pub deity: String,
    pub culture: i64,
    #[serde(skip)]
    pub emblem: EmblemSource,
}

impl WorldRecord for ReligionRecord {
    const KIND: EntityKind = EntityKind::Religion;

    fn decode(record: &Map<String, Value>) -> Self {
        Self {
            id: id_field(record),
            name: field(record, "name", String::new()),
            religion_type: field(record, "type", String::new()),
            deity: field(record, "deity", String::new()),
            culture: field(record, "culture", 0),
            emblem: EmblemSource::from_record(record),
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn emblem(&self) -> &EmblemSource {
        &self.emblem
    }
}

/// A geographic feature (ocean, lake, island). Named by its type.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeatureRecord {
    #[serde(rename = "feature_id")]
    pub id: EntityId,
    #[serde(rename = "type")]
    pub feature_type: String,
    pub group: String,
    pub cells: Vec<i64>,
    #[serde(skip)]
    pub emblem: EmblemSource,
}

impl WorldRecord for FeatureRecord {
    const KIND: EntityKind = EntityKind::Feature;

    fn decode(record: &Map<String, Value>) -> Self {
        Self {
            id: id_field(record),
            feature_type: field(record, "type", String::new()),
            group: field(record, "group", String::new()),
            cells: field(record, "cells", Vec::new()),
            emblem: EmblemSource::from_record(record),
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.feature_type
    }

    fn emblem(&self) -> &EmblemSource {
        &self.emblem
    }
}

/// A river. Rivers have no sentinel element and no crest.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiverRecord {
    #[serde(rename = "river_id")]
    pub id: EntityId,
    pub name: String,
    pub source_cell: i64,
    pub mouth_cell: i64,
    pub basin: i64,
    pub cells: Vec<i64>,
    pub length_km: f64,
    pub flux: f64,
}

impl WorldRecord for RiverRecord {
    const KIND: EntityKind = EntityKind::River;

    fn decode(record: &Map<String, Value>) -> Self {
        Self {
            id: id_field(record),
            name: field(record, "name", String::new()),
            source_cell: field(record, "source", 0),
            mouth_cell: field(record, "mouth", 0),
            basin: field(record, "basin", 0),
            cells: field(record, "cells", Vec::new()),
            length_km: field(record, "length", 0.0),
            flux: field(record, "discharge", 0.0),
        }
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
