//! The world document - the parsed FMG export and its `pack` root.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::entities::{CellTable, EntityKind};

/// Failures that make a document unusable as a whole.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read map file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("map file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("input JSON does not contain a top-level 'pack' object")]
    MissingPack,
}

/// A loaded export whose `pack` root is known to exist.
#[derive(Debug, Clone)]
pub struct WorldDocument {
    pack: Map<String, Value>,
}

impl WorldDocument {
    /// Parse a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        let root: Value = serde_json::from_str(text)?;
        Self::from_value(root)
    }

    /// Read and parse a document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Wrap an already parsed tree. An empty or non-object `pack` counts as missing.
    pub fn from_value(root: Value) -> Result<Self, DocumentError> {
        match root {
            Value::Object(mut root) => match root.remove("pack") {
                Some(Value::Object(pack)) if !pack.is_empty() => Ok(Self { pack }),
                _ => Err(DocumentError::MissingPack),
            },
            _ => Err(DocumentError::MissingPack),
        }
    }

    /// The raw container for a kind, if present.
    pub fn container(&self, kind: EntityKind) -> Option<&Value> {
        self.pack.get(kind.pack_key())
    }

    /// The cell table, if `pack.cells` has a usable shape.
    pub fn cells(&self) -> Option<CellTable<'_>> {
        self.container(EntityKind::Cell).and_then(CellTable::from_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_document() {
        let doc = WorldDocument::from_json_str(r#"{"pack": {"burgs": [0, {"i": 1}]}}"#).unwrap();
        assert!(doc.container(EntityKind::Burg).is_some());
        assert!(doc.container(EntityKind::River).is_none());
        assert!(doc.cells().is_none());
    }

    #[test]
    fn test_missing_pack_is_fatal() {
        for root in [json!({}), json!({"pack": {}}), json!({"pack": []}), json!([1, 2])] {
            assert!(matches!(
                WorldDocument::from_value(root),
                Err(DocumentError::MissingPack)
            ));
        }
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            WorldDocument::from_json_str("{not json"),
            Err(DocumentError::Parse(_))
        ));
    }

    #[test]
    fn test_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        std::fs::write(&path, r#"{"pack": {"cells": {"h": [1, 2, 3]}}}"#).unwrap();

        let doc = WorldDocument::from_path(&path).unwrap();
        assert_eq!(doc.cells().map(|cells| cells.len()), Some(3));

        let missing = WorldDocument::from_path(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(DocumentError::Read { .. })));
    }
}
