//! External asset bundles - per-settlement files generated outside FMG
//! (city maps and their asset folders) that get pulled into the vault.
//!
//! The matcher works in three steps:
//! 1. **Discovery**: pick entries under the bundle root (by name or by mapping file)
//! 2. **Placement**: copy them under `Burgs/<burg-folder>/mfcg/`, or zip them
//! 3. **Reporting**: return vault-relative paths in processing order
//!
//! Discovery is sorted by entry name, so repeated runs see the same order.

mod archive;
mod index;
mod modes;

pub use archive::*;
pub use index::*;
pub use modes::*;

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use fmg_model::{EntityId, EntityKind};

use crate::error::BundleError;
use crate::naming::{entity_folder, safe_name};

/// Folder under each burg's asset folder that receives bundles.
pub const BUNDLE_DIR: &str = "mfcg";

/// A matched entry: where it is, and where it goes relative to the bundle folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub source: PathBuf,
    pub relative: PathBuf,
}

impl BundleEntry {
    pub fn new(source: PathBuf, relative: PathBuf) -> Self {
        Self { source, relative }
    }
}

/// Name tokens an entry may be matched against, all lowercase.
#[derive(Debug, Clone)]
struct NameTokens {
    tokens: Vec<String>,
    safe_name: String,
}

impl NameTokens {
    fn new(id: EntityId, name: &str) -> Self {
        let safe = safe_name(name, "").to_lowercase();
        let candidates = [
            format!("{}-{}", EntityKind::Burg.slug(), id),
            id.to_string(),
            safe.clone(),
            entity_folder(EntityKind::Burg, id, name).to_lowercase(),
        ];

        let mut tokens: Vec<String> = Vec::with_capacity(candidates.len());
        for token in candidates {
            if !token.is_empty() && !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        Self {
            tokens,
            safe_name: safe,
        }
    }

    fn contained_in(&self, entry: &str) -> bool {
        self.tokens.iter().any(|t| entry == t || entry.contains(t.as_str()))
    }

    /// Files may also match by their name without extension.
    fn equals(&self, entry: &str, is_file: bool) -> bool {
        let stem = is_file
            .then(|| Path::new(entry).file_stem())
            .flatten()
            .map(|s| s.to_string_lossy().into_owned());
        self.tokens
            .iter()
            .any(|t| entry == t || stem.as_deref() == Some(t.as_str()))
    }
}

/// Finds and integrates the bundles belonging to a settlement.
#[derive(Debug)]
pub struct BundleMatcher {
    config: MatchConfig,
    /// Built on first de-duplication lookup.
    index: Option<ContentIndex>,
}

impl BundleMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            index: None,
        }
    }

    /// Make a file written into the vault by someone else visible to
    /// de-duplication. Files written before the first lookup are found by
    /// the initial scan.
    pub fn track(&mut self, path: &Path) {
        if let Some(index) = self.index.as_mut() {
            index.track(path);
        }
    }

    /// Integrate every bundle entry matching the settlement into the vault.
    ///
    /// Returns vault-relative paths of the files copied, reused or created.
    /// A missing `source_root` yields an empty list. Individual failures are
    /// logged and skipped.
    pub fn integrate(
        &mut self,
        entity_id: EntityId,
        entity_name: &str,
        source_root: Option<&Path>,
        vault_root: &Path,
    ) -> Vec<String> {
        let Some(root) = source_root.filter(|root| root.is_dir()) else {
            return Vec::new();
        };

        let entries = match self.discover(entity_id, entity_name, root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(burg = %entity_id, root = %root.display(), error = %e, "Failed to list bundle root");
                return Vec::new();
            }
        };
        if entries.is_empty() {
            debug!(burg = %entity_id, mode = self.config.mode.name(), "No bundle entries matched");
            return Vec::new();
        }

        let folder = entity_folder(EntityKind::Burg, entity_id, entity_name);
        let bundle_dir = vault_root
            .join(EntityKind::Burg.folder())
            .join(&folder)
            .join(BUNDLE_DIR);

        if self.config.archive {
            let dest = bundle_dir.join(format!("{folder}.zip"));
            return match write_archive(&entries, &dest) {
                Ok(()) => {
                    info!(burg = %entity_id, entries = entries.len(), "Archived bundle entries");
                    vec![vault_relative(vault_root, &dest)]
                }
                Err(e) => {
                    warn!(burg = %entity_id, path = %dest.display(), error = %e, "Failed to archive bundle");
                    Vec::new()
                }
            };
        }

        let mut placed = Vec::new();
        for entry in &entries {
            let target = bundle_dir.join(&entry.relative);
            let result = if entry.source.is_dir() {
                self.place_tree(&entry.source, &target, vault_root)
            } else {
                self.place_file(&entry.source, &target, vault_root, true)
                    .map(|path| path.into_iter().collect())
            };

            match result {
                Ok(paths) => placed.extend(paths),
                Err(e) => warn!(
                    burg = %entity_id,
                    entry = %entry.source.display(),
                    error = %e,
                    "Failed to copy bundle entry"
                ),
            }
        }

        debug!(burg = %entity_id, files = placed.len(), "Integrated bundle entries");
        placed
    }

    fn discover(&self, id: EntityId, name: &str, root: &Path) -> Result<Vec<BundleEntry>, BundleError> {
        if let MatchMode::Map(map) = &self.config.mode {
            return Ok(mapped_entries(map, id, root));
        }

        let tokens = NameTokens::new(id, name);
        let regex = match &self.config.mode {
            MatchMode::Regex(pattern) => match pattern.regex_for(id, &tokens.safe_name) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    warn!(burg = %id, pattern = pattern.as_str(), error = %e, "Unusable match pattern");
                    return Ok(Vec::new());
                }
            },
            _ => None,
        };

        let mut names: Vec<String> = fs::read_dir(root)
            .map_err(|e| BundleError::io(root, e))?
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.file_name().to_string_lossy().into_owned()),
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "Skipping unreadable bundle entry");
                    None
                }
            })
            .collect();
        names.sort();

        let entries = names
            .into_iter()
            .filter(|entry_name| {
                let lower = entry_name.to_lowercase();
                match (&self.config.mode, &regex) {
                    (_, Some(regex)) => regex.is_match(&lower),
                    (MatchMode::Exact, _) => tokens.equals(&lower, root.join(entry_name).is_file()),
                    _ => tokens.contained_in(&lower),
                }
            })
            .map(|entry_name| BundleEntry::new(root.join(&entry_name), PathBuf::from(entry_name)))
            .collect();
        Ok(entries)
    }

    /// Copy a directory entry. An existing destination tree is not copied
    /// over; its files are reported as they are.
    fn place_tree(&mut self, source: &Path, target: &Path, vault_root: &Path) -> Result<Vec<String>, BundleError> {
        let existed = target.is_dir();
        let mut placed = Vec::new();
        let mut seen = HashSet::new();

        for item in WalkDir::new(source).min_depth(1).sort_by_file_name() {
            let item = item?;
            if !item.path().is_file() {
                continue;
            }
            let Ok(inner) = item.path().strip_prefix(source) else {
                continue;
            };
            seen.insert(inner.to_path_buf());
            if let Some(path) = self.place_file(item.path(), &target.join(inner), vault_root, !existed)? {
                placed.push(path);
            }
        }

        if existed {
            for item in WalkDir::new(target).min_depth(1).sort_by_file_name() {
                let item = item?;
                if !item.file_type().is_file() {
                    continue;
                }
                let unseen = item
                    .path()
                    .strip_prefix(target)
                    .is_ok_and(|inner| !seen.contains(inner));
                if unseen {
                    placed.push(vault_relative(vault_root, item.path()));
                }
            }
        }

        Ok(placed)
    }

    /// Place one file and report where its content lives in the vault.
    ///
    /// With `may_copy` unset the destination belongs to a bundle that was
    /// integrated before: only existing or de-duplicated files are reported.
    fn place_file(
        &mut self,
        source: &Path,
        target: &Path,
        vault_root: &Path,
        may_copy: bool,
    ) -> Result<Option<String>, BundleError> {
        if !may_copy && target.is_file() {
            return Ok(Some(vault_relative(vault_root, target)));
        }

        if self.config.dedup {
            let digest = ContentDigest::of_file(source).map_err(|e| BundleError::io(source, e))?;

            if target.is_file() {
                let existing = ContentDigest::of_file(target).map_err(|e| BundleError::io(target, e))?;
                if existing == digest {
                    return Ok(Some(vault_relative(vault_root, target)));
                }
            }

            let index = self
                .index
                .get_or_insert_with(|| ContentIndex::scan(vault_root));
            if let Some(existing) = index.find(&digest) {
                if existing != target {
                    debug!(source = %source.display(), existing = %existing.display(), "Reusing identical vault file");
                    return Ok(Some(vault_relative(vault_root, &existing)));
                }
            }

            if !may_copy {
                return Ok(None);
            }
            copy_file(source, target)?;
            index.insert(target.to_path_buf(), digest);
            return Ok(Some(vault_relative(vault_root, target)));
        }

        if !may_copy {
            debug!(path = %target.display(), "Not adding files to an existing bundle");
            return Ok(None);
        }
        copy_file(source, target)?;
        Ok(Some(vault_relative(vault_root, target)))
    }
}

fn copy_file(source: &Path, target: &Path) -> Result<(), BundleError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| BundleError::io(parent, e))?;
    }
    fs::copy(source, target).map_err(|e| BundleError::io(source, e))?;
    Ok(())
}

/// Entries named by the mapping file. Names may not leave the bundle root.
fn mapped_entries(map: &BundleMap, id: EntityId, root: &Path) -> Vec<BundleEntry> {
    map.entries_for(id)
        .iter()
        .filter_map(|name| {
            let relative = PathBuf::from(name);
            let contained = relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
            if !contained || name.is_empty() {
                warn!(burg = %id, entry = %name, "Ignoring mapped entry outside the bundle root");
                return None;
            }

            let source = root.join(&relative);
            if !source.exists() {
                warn!(burg = %id, entry = %name, "Mapped bundle entry does not exist");
                return None;
            }
            Some(BundleEntry::new(source, relative))
        })
        .collect()
}

/// Vault-relative path with `/` separators.
pub fn vault_relative(vault_root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(vault_root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_file(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn matcher(mode: MatchMode) -> BundleMatcher {
        BundleMatcher::new(MatchConfig::new(mode))
    }

    #[test]
    fn test_copies_matching_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("Burg-2-Testburg/index.html"), "<html>test</html>");
        let vault = tmp.path().join("vault");

        let copied = matcher(MatchMode::Substring).integrate(EntityId(2), "Testburg", Some(&root), &vault);

        assert_eq!(copied, ["Burgs/Burg-2-Testburg/mfcg/Burg-2-Testburg/index.html"]);
        let dest = vault.join("Burgs/Burg-2-Testburg/mfcg/Burg-2-Testburg/index.html");
        assert_eq!(fs::read_to_string(dest).unwrap(), "<html>test</html>");
    }

    #[test]
    fn test_copies_root_file_by_id_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("burg-3-scene.png"), "PNG");
        let vault = tmp.path().join("vault");

        let copied = matcher(MatchMode::Substring).integrate(EntityId(3), "Scenetown", Some(&root), &vault);

        assert_eq!(copied, ["Burgs/Burg-3-Scenetown/mfcg/burg-3-scene.png"]);
        assert!(vault.join("Burgs/Burg-3-Scenetown/mfcg/burg-3-scene.png").exists());
    }

    #[test]
    fn test_copies_nested_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("Burg-4-NestedTown/assets/css/style.css"), "body{}");
        make_file(&root.join("Burg-4-NestedTown/assets/img/map.png"), "PNG");
        let vault = tmp.path().join("vault");

        let copied = matcher(MatchMode::Substring).integrate(EntityId(4), "Nested Town", Some(&root), &vault);

        let base = vault.join("Burgs/Burg-4-Nested_Town/mfcg/Burg-4-NestedTown/assets");
        assert!(base.join("css/style.css").exists());
        assert!(base.join("img/map.png").exists());
        assert_eq!(copied.len(), 2);
    }

    #[test]
    fn test_includes_directory_and_root_file_matches() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("Stonehaven_files/a.txt"), "a");
        make_file(&root.join("Burg-5-extra.txt"), "b");
        let vault = tmp.path().join("vault");

        let copied = matcher(MatchMode::Substring).integrate(EntityId(5), "Stonehaven", Some(&root), &vault);

        let base = vault.join("Burgs/Burg-5-Stonehaven/mfcg");
        assert!(base.join("Stonehaven_files/a.txt").exists());
        assert!(base.join("Burg-5-extra.txt").exists());
        // Sorted discovery: uppercase "Burg-5-extra.txt" before "Stonehaven_files".
        assert_eq!(
            copied,
            [
                "Burgs/Burg-5-Stonehaven/mfcg/Burg-5-extra.txt",
                "Burgs/Burg-5-Stonehaven/mfcg/Stonehaven_files/a.txt"
            ]
        );
    }

    #[test]
    fn test_special_character_names() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("Burg-6-Köln@Town/index.html"), "x");
        let vault = tmp.path().join("vault");

        matcher(MatchMode::Substring).integrate(EntityId(6), "Köln@Town", Some(&root), &vault);

        let dest = vault.join("Burgs/Burg-6-K_ln_Town/mfcg/Burg-6-Köln@Town/index.html");
        assert!(dest.exists());
    }

    #[test]
    fn test_missing_root_returns_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let vault = tmp.path().join("vault");
        let mut matcher = matcher(MatchMode::Substring);

        assert!(matcher
            .integrate(EntityId(99), "Nope", Some(&tmp.path().join("no_exist_root")), &vault)
            .is_empty());
        assert!(matcher.integrate(EntityId(99), "Nope", None, &vault).is_empty());
        assert!(!vault.exists());
    }

    #[test]
    fn test_exact_mode_rejects_longer_names() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("Burg-8-Exact/index.html"), "right");
        make_file(&root.join("Burg-8-ExactOther/index.html"), "wrong");
        let vault = tmp.path().join("vault");

        let copied = matcher(MatchMode::Exact).integrate(EntityId(8), "Exact", Some(&root), &vault);

        assert_eq!(copied, ["Burgs/Burg-8-Exact/mfcg/Burg-8-Exact/index.html"]);
        assert!(!vault.join("Burgs/Burg-8-Exact/mfcg/Burg-8-ExactOther").exists());
    }

    #[test]
    fn test_substring_mode_accepts_longer_names() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("Burg-8-Exact/index.html"), "right");
        make_file(&root.join("Burg-8-ExactOther/index.html"), "other");
        let vault = tmp.path().join("vault");

        let copied = matcher(MatchMode::Substring).integrate(EntityId(8), "Exact", Some(&root), &vault);
        assert_eq!(copied.len(), 2);
    }

    #[test]
    fn test_exact_mode_matches_file_stem() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("burg-8.png"), "PNG");
        make_file(&root.join("burg-8-old.png"), "PNG");
        let vault = tmp.path().join("vault");

        let copied = matcher(MatchMode::Exact).integrate(EntityId(8), "Exact", Some(&root), &vault);
        assert_eq!(copied, ["Burgs/Burg-8-Exact/mfcg/burg-8.png"]);
    }

    #[test]
    fn test_exact_mode_stem_only_for_files() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("burg-8.v2/index.html"), "dir");
        make_file(&root.join("burg-8.json"), "{}");
        let vault = tmp.path().join("vault");

        let copied = matcher(MatchMode::Exact).integrate(EntityId(8), "Exact", Some(&root), &vault);
        assert_eq!(copied, ["Burgs/Burg-8-Exact/mfcg/burg-8.json"]);
        assert!(!vault.join("Burgs/Burg-8-Exact/mfcg/burg-8.v2").exists());
    }

    #[test]
    fn test_tracked_file_is_reused() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("burg-1-a.txt"), "first");
        make_file(&root.join("burg-2-crest.png"), "CRESTBYTES");
        let vault = tmp.path().join("vault");

        let mut matcher = BundleMatcher::new(MatchConfig::default().with_dedup(true));
        matcher.integrate(EntityId(1), "One", Some(&root), &vault);

        // Written after the vault was indexed.
        let emblem = vault.join("emblems/burg-2.png");
        make_file(&emblem, "CRESTBYTES");
        matcher.track(&emblem);

        let copied = matcher.integrate(EntityId(2), "Two", Some(&root), &vault);
        assert_eq!(copied, ["emblems/burg-2.png"]);
        assert!(!vault.join("Burgs/Burg-2-Two/mfcg/burg-2-crest.png").exists());
    }

    #[test]
    fn test_regex_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("city_12.svg"), "svg");
        make_file(&root.join("city_120.svg"), "svg");
        make_file(&root.join("Burg-12-Elm/index.html"), "x");
        let vault = tmp.path().join("vault");

        let pattern = PatternTemplate::new(r"^city_{id}\.svg$").unwrap();
        let copied = matcher(MatchMode::Regex(pattern)).integrate(EntityId(12), "Elm", Some(&root), &vault);

        assert_eq!(copied, ["Burgs/Burg-12-Elm/mfcg/city_12.svg"]);
    }

    #[test]
    fn test_map_mode_bypasses_names() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("unrelated/index.html"), "x");
        make_file(&root.join("maps/overview.png"), "PNG");
        make_file(&root.join("Burg-2-Testburg/index.html"), "ignored");
        let vault = tmp.path().join("vault");

        let map = BundleMap::from_json_str(
            r#"{"2": ["unrelated", "maps/overview.png", "missing.png", "../escape.png"]}"#,
        )
        .unwrap();
        let copied = matcher(MatchMode::Map(map)).integrate(EntityId(2), "Testburg", Some(&root), &vault);

        assert_eq!(
            copied,
            [
                "Burgs/Burg-2-Testburg/mfcg/unrelated/index.html",
                "Burgs/Burg-2-Testburg/mfcg/maps/overview.png"
            ]
        );
        assert!(!vault.join("Burgs/Burg-2-Testburg/mfcg/Burg-2-Testburg").exists());
    }

    #[test]
    fn test_dedup_reports_existing_vault_file() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("burg-7-crest.png"), "IDENTICAL");
        let vault = tmp.path().join("vault");
        make_file(&vault.join("emblems/burg-7.png"), "IDENTICAL");

        let mut matcher = BundleMatcher::new(MatchConfig::default().with_dedup(true));
        let copied = matcher.integrate(EntityId(7), "Crestford", Some(&root), &vault);

        assert_eq!(copied, ["emblems/burg-7.png"]);
        assert!(!vault.join("Burgs/Burg-7-Crestford/mfcg/burg-7-crest.png").exists());
    }

    #[test]
    fn test_without_dedup_duplicates_are_copied() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("burg-7-crest.png"), "IDENTICAL");
        let vault = tmp.path().join("vault");
        make_file(&vault.join("emblems/burg-7.png"), "IDENTICAL");

        let copied = matcher(MatchMode::Substring).integrate(EntityId(7), "Crestford", Some(&root), &vault);

        assert_eq!(copied, ["Burgs/Burg-7-Crestford/mfcg/burg-7-crest.png"]);
    }

    #[test]
    fn test_dedup_across_settlements() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("burg-1-style.css"), "shared");
        make_file(&root.join("burg-2-style.css"), "shared");
        let vault = tmp.path().join("vault");

        let pattern = PatternTemplate::new(r"^burg-{id}-").unwrap();
        let mut matcher = BundleMatcher::new(MatchConfig::new(MatchMode::Regex(pattern)).with_dedup(true));
        let first = matcher.integrate(EntityId(1), "One", Some(&root), &vault);
        let second = matcher.integrate(EntityId(2), "Two", Some(&root), &vault);

        assert_eq!(first, ["Burgs/Burg-1-One/mfcg/burg-1-style.css"]);
        assert_eq!(second, first);
        assert!(!vault.join("Burgs/Burg-2-Two").exists());
    }

    #[test]
    fn test_archive_mode_returns_single_zip() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("Burg-2-Testburg/index.html"), "x");
        make_file(&root.join("burg-2.json"), "{}");
        let vault = tmp.path().join("vault");

        let mut matcher = BundleMatcher::new(MatchConfig::default().with_archive(true));
        let copied = matcher.integrate(EntityId(2), "Testburg", Some(&root), &vault);

        assert_eq!(copied, ["Burgs/Burg-2-Testburg/mfcg/Burg-2-Testburg.zip"]);
        assert!(vault.join(&copied[0]).is_file());
        assert!(!vault.join("Burgs/Burg-2-Testburg/mfcg/Burg-2-Testburg").exists());
    }

    #[test]
    fn test_rerun_is_stable() {
        for dedup in [false, true] {
            let tmp = tempfile::tempdir().unwrap();
            let root = tmp.path().join("mfcg_root");
            make_file(&root.join("Burg-2-Testburg/index.html"), "x");
            make_file(&root.join("Burg-2-Testburg/assets/a.css"), "a");
            make_file(&root.join("burg-2-map.png"), "PNG");
            let vault = tmp.path().join("vault");

            let config = MatchConfig::default().with_dedup(dedup);
            let first = BundleMatcher::new(config.clone()).integrate(EntityId(2), "Testburg", Some(&root), &vault);
            let second = BundleMatcher::new(config).integrate(EntityId(2), "Testburg", Some(&root), &vault);

            assert_eq!(first, second, "dedup = {dedup}");
            assert_eq!(first.len(), 3);
        }
    }

    #[test]
    fn test_existing_tree_is_enumerated_not_copied() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("mfcg_root");
        make_file(&root.join("Burg-2-Testburg/index.html"), "new");
        make_file(&root.join("Burg-2-Testburg/extra.css"), "new");
        let vault = tmp.path().join("vault");
        let existing = vault.join("Burgs/Burg-2-Testburg/mfcg/Burg-2-Testburg");
        make_file(&existing.join("index.html"), "old");
        make_file(&existing.join("notes.txt"), "user");

        let copied = matcher(MatchMode::Substring).integrate(EntityId(2), "Testburg", Some(&root), &vault);

        assert_eq!(
            copied,
            [
                "Burgs/Burg-2-Testburg/mfcg/Burg-2-Testburg/index.html",
                "Burgs/Burg-2-Testburg/mfcg/Burg-2-Testburg/notes.txt"
            ]
        );
        assert_eq!(fs::read_to_string(existing.join("index.html")).unwrap(), "old");
        assert!(!existing.join("extra.css").exists());
    }

    #[test]
    fn test_vault_relative() {
        let root = Path::new("/v");
        assert_eq!(vault_relative(root, Path::new("/v/Burgs/a/b.txt")), "Burgs/a/b.txt");
    }
}
