//! The cell table.

use serde::Serialize;
use serde_json::{Map, Value};

use super::EntityId;
use crate::fields::{cast, column, lookup_indexed};

/// Shape of `pack.cells` as found in the document.
#[derive(Debug, Clone, Copy)]
pub enum CellTable<'a> {
    /// Mapping from field abbreviation to a per-cell sequence.
    Columns(&'a Map<String, Value>),
    /// Degenerate export: a bare sequence of elevations.
    Heights(&'a [Value]),
}

impl<'a> CellTable<'a> {
    /// `None` when the container is neither a mapping nor a sequence.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(columns) => Some(CellTable::Columns(columns)),
            Value::Array(heights) => Some(CellTable::Heights(heights)),
            _ => None,
        }
    }

    /// Number of cells, taken from the elevation column.
    pub fn len(&self) -> usize {
        match self {
            CellTable::Columns(columns) => columns
                .get("h")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            CellTable::Heights(heights) => heights.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode the cell at `index`. Every column is optional.
    pub fn cell(&self, index: usize) -> CellRecord {
        let id = i64::try_from(index).unwrap_or(i64::MAX);
        match self {
            CellTable::Heights(heights) => CellRecord {
                elevation: cast(heights.get(index), 0),
                ..CellRecord::empty(id)
            },
            CellTable::Columns(columns) => {
                let routes = lookup_indexed(columns.get("routes"), id)
                    .filter(|routes| routes.is_object() || routes.is_array())
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Map::new()));

                CellRecord {
                    id: EntityId(id),
                    x: column(columns, "x", id, 0.0),
                    y: column(columns, "y", id, 0.0),
                    elevation: column(columns, "h", id, 0),
                    feature: column(columns, "f", id, 0),
                    biome: column(columns, "biome", id, 0),
                    burg: column(columns, "burg", id, 0),
                    culture: column(columns, "culture", id, 0),
                    state: column(columns, "state", id, 0),
                    province: column(columns, "province", id, 0),
                    religion: column(columns, "religion", id, 0),
                    population: column(columns, "pop", id, 0.0),
                    river: column(columns, "r", id, 0),
                    flux: column(columns, "fl", id, 0),
                    harbor_score: column(columns, "harbor", id, 0),
                    routes,
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = CellRecord> + '_ {
        (0..self.len()).map(move |index| self.cell(index))
    }
}

/// One map cell.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CellRecord {
    #[serde(rename = "cell_id")]
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub elevation: i64,
    pub feature: i64,
    pub biome: i64,
    pub burg: i64,
    pub culture: i64,
    pub state: i64,
    pub province: i64,
    pub religion: i64,
    pub population: f64,
    pub river: i64,
    pub flux: i64,
    pub harbor_score: i64,
    /// Neighbor cell -> route id, either keyed or positional.
    pub routes: Value,
}

impl CellRecord {
    fn empty(id: i64) -> Self {
        Self {
            id: EntityId(id),
            x: 0.0,
            y: 0.0,
            elevation: 0,
            feature: 0,
            biome: 0,
            burg: 0,
            culture: 0,
            state: 0,
            province: 0,
            religion: 0,
            population: 0.0,
            river: 0,
            flux: 0,
            harbor_score: 0,
            routes: Value::Object(Map::new()),
        }
    }
}
