//! The export driver: validate settings, load the document, prepare the
//! vault and run every transformer in order.

use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use fmg_model::{EntityKind, WorldDocument};

use crate::bundles::{BundleMatcher, MatchConfig};
use crate::config::ExportConfig;
use crate::emblems::{EmblemResolver, EMBLEM_DIR};
use crate::error::ExportError;
use crate::transform::{Exporter, KindReport};

/// Per-kind counts for a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub reports: Vec<KindReport>,
}

impl ExportSummary {
    pub fn written(&self) -> usize {
        self.reports.iter().map(|r| r.written).sum()
    }

    pub fn skipped(&self) -> usize {
        self.reports.iter().map(|r| r.skipped).sum()
    }

    pub fn report(&self, kind: EntityKind) -> Option<&KindReport> {
        self.reports.iter().find(|r| r.kind == kind)
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} notes written, {} skipped", self.written(), self.skipped())
    }
}

/// Create the kind folders and the emblem folder.
pub fn prepare_vault(vault_root: &Path) -> Result<(), ExportError> {
    let folders = EntityKind::ALL.iter().map(|kind| kind.folder()).chain([EMBLEM_DIR]);
    for folder in folders {
        let path = vault_root.join(folder);
        fs::create_dir_all(&path).map_err(|source| ExportError::Vault { path, source })?;
    }
    debug!(vault = %vault_root.display(), "Vault folders ready");
    Ok(())
}

/// Export `map_file` into the vault described by `config`.
///
/// Only configuration and document errors are fatal. Everything past that
/// point degrades to warnings.
pub fn run(map_file: &Path, config: &ExportConfig) -> Result<ExportSummary, ExportError> {
    let match_config = MatchConfig::from_settings(&config.bundles)?;
    let document = WorldDocument::from_path(map_file)?;
    info!(map = %map_file.display(), "Loaded world document");

    let vault_root = config.vault_root.as_path();
    prepare_vault(vault_root)?;

    let mut exporter = Exporter::new(
        vault_root,
        EmblemResolver::new(vault_root, config.download_emblems),
        BundleMatcher::new(match_config),
    )
    .with_bundle_root(config.bundles.root.clone())
    .with_lore(config.with_lore);

    let summary = ExportSummary {
        reports: exporter.export_all(&document),
    };
    info!(vault = %vault_root.display(), %summary, "Export finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModeName;
    use fmg_model::DocumentError;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use walkdir::WalkDir;

    fn world() -> serde_json::Value {
        json!({
            "info": {"mapName": "Testland"},
            "pack": {
                "cells": {"h": [20, 40, 60], "f": [1, 1, 2], "burg": [0, 2, 0]},
                "burgs": [{}, {"i": 2, "name": "Testburg", "cell": 1, "culture": 1, "state": 1,
                               "coa": {"svg": "<svg>burg</svg>"}}],
                "states": [{"name": "Neutrals"}, {"i": 1, "name": "Realm", "capital": 2}],
                "provinces": [0, {"i": 1, "name": "March", "state": 1, "burg": 2}],
                "cultures": [{}, {"i": 1, "name": "Eldar", "origins": [0]}],
                "religions": [{}, {"i": 1, "name": "Old Faith", "culture": 1}],
                "features": [0, {"i": 1, "type": "island", "cells": [0, 1]}, {"i": 2, "type": "ocean"}],
                "rivers": [{"i": 1, "name": "Swift", "mouth": 2, "cells": [1, 2]}]
            }
        })
    }

    fn write_world(dir: &Path, value: &serde_json::Value) -> PathBuf {
        let path = dir.join("map.json");
        fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        WalkDir::new(root)
            .into_iter()
            .map(Result::unwrap)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let relative = e.path().strip_prefix(root).unwrap().to_path_buf();
                (relative, fs::read(e.path()).unwrap())
            })
            .collect()
    }

    fn config(vault: &Path) -> ExportConfig {
        ExportConfig {
            vault_root: vault.to_path_buf(),
            ..ExportConfig::default()
        }
    }

    #[test]
    fn test_full_export() {
        let input = tempfile::tempdir().unwrap();
        let vault = tempfile::tempdir().unwrap();
        let map = write_world(input.path(), &world());

        let summary = run(&map, &config(vault.path())).unwrap();

        assert_eq!(summary.report(EntityKind::Cell).unwrap().written, 3);
        assert_eq!(summary.report(EntityKind::Burg).unwrap().written, 1);
        assert_eq!(summary.report(EntityKind::Province).unwrap().written, 1);
        assert_eq!(summary.report(EntityKind::Feature).unwrap().written, 2);
        assert_eq!(summary.report(EntityKind::River).unwrap().written, 1);
        assert_eq!(summary.skipped(), 0);

        for path in [
            "Cells/Cell-1.md",
            "Burgs/Burg-2-Testburg.md",
            "States/State-1-Realm.md",
            "Provinces/Province-1-March.md",
            "Cultures/Culture-1-Eldar.md",
            "Religions/Religion-1-Old_Faith.md",
            "Features/Feature-1-island.md",
            "Rivers/River-1.md",
            "emblems/burg-2.svg",
        ] {
            assert!(vault.path().join(path).is_file(), "missing {path}");
        }

        let burg = fs::read_to_string(vault.path().join("Burgs/Burg-2-Testburg.md")).unwrap();
        assert!(burg.contains("burg_id: 2\n"));
        assert!(burg.contains("Located in [[Cells/Cell-1]]"));
        assert!(burg.contains("![Emblem](emblems/burg-2.svg)"));
    }

    #[test]
    fn test_empty_kinds_still_get_folders() {
        let input = tempfile::tempdir().unwrap();
        let vault = tempfile::tempdir().unwrap();
        let map = write_world(input.path(), &json!({"pack": {"burgs": "oops"}}));

        let summary = run(&map, &config(vault.path())).unwrap();
        assert_eq!(summary.written(), 0);
        for kind in EntityKind::ALL {
            assert!(vault.path().join(kind.folder()).is_dir());
        }
        assert!(vault.path().join(EMBLEM_DIR).is_dir());
    }

    #[test]
    fn test_missing_pack_is_fatal() {
        let input = tempfile::tempdir().unwrap();
        let vault = tempfile::tempdir().unwrap();
        let map = write_world(input.path(), &json!({"info": {}}));

        let result = run(&map, &config(vault.path()));
        assert!(matches!(result, Err(ExportError::Document(DocumentError::MissingPack))));
        assert!(!vault.path().join("Burgs").exists());
    }

    #[test]
    fn test_invalid_match_settings_are_fatal() {
        let input = tempfile::tempdir().unwrap();
        let vault = tempfile::tempdir().unwrap();
        let map = write_world(input.path(), &world());

        let mut config = config(vault.path());
        config.bundles.mode = ModeName::Regex;
        assert!(matches!(run(&map, &config), Err(ExportError::Config(_))));
    }

    #[test]
    fn test_dedup_sees_emblems_written_during_the_run() {
        let input = tempfile::tempdir().unwrap();
        let bundles = tempfile::tempdir().unwrap();
        let vault = tempfile::tempdir().unwrap();

        let crest = input.path().join("crest.png");
        fs::write(&crest, "CRESTBYTES").unwrap();
        fs::write(bundles.path().join("burg-1-notes.txt"), "first").unwrap();
        fs::write(bundles.path().join("burg-2-crest.png"), "CRESTBYTES").unwrap();

        let map = write_world(
            input.path(),
            &json!({"pack": {"burgs": [
                {},
                {"i": 1, "name": "One"},
                {"i": 2, "name": "Two", "emblem_url": crest.display().to_string()}
            ]}}),
        );

        let mut config = config(vault.path());
        config.bundles.root = Some(bundles.path().to_path_buf());
        config.bundles.dedup = true;
        run(&map, &config).unwrap();

        assert!(vault.path().join("emblems/burg-2.png").is_file());
        assert!(vault.path().join("Burgs/Burg-1-One/mfcg/burg-1-notes.txt").is_file());
        assert!(!vault.path().join("Burgs/Burg-2-Two/mfcg/burg-2-crest.png").exists());

        let note = fs::read_to_string(vault.path().join("Burgs/Burg-2-Two.md")).unwrap();
        assert!(note.contains("mfcg_assets:\n- emblems/burg-2.png\n"));
    }

    #[test]
    fn test_rerun_produces_identical_tree() {
        for dedup in [false, true] {
            let input = tempfile::tempdir().unwrap();
            let bundles = tempfile::tempdir().unwrap();
            let vault = tempfile::tempdir().unwrap();
            let map = write_world(input.path(), &world());

            fs::create_dir_all(bundles.path().join("Burg-2-Testburg/assets")).unwrap();
            fs::write(bundles.path().join("Burg-2-Testburg/index.html"), "<html/>").unwrap();
            fs::write(bundles.path().join("Burg-2-Testburg/assets/style.css"), "body{}").unwrap();
            fs::write(bundles.path().join("burg-2.json"), "{}").unwrap();

            let mut config = config(vault.path());
            config.with_lore = true;
            config.bundles.root = Some(bundles.path().to_path_buf());
            config.bundles.dedup = dedup;

            run(&map, &config).unwrap();
            let first = snapshot(vault.path());
            run(&map, &config).unwrap();
            let second = snapshot(vault.path());

            assert_eq!(first, second, "dedup = {dedup}");
            assert!(first.contains_key(Path::new(
                "Burgs/Burg-2-Testburg/mfcg/Burg-2-Testburg/index.html"
            )));
            assert!(first.contains_key(Path::new("Burgs/Burg-2-Testburg/mfcg/burg-2.json")));
        }
    }
}
