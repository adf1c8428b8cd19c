//! Content index over the vault, used for de-duplication.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Identity of a file's content: size plus SHA-256.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    pub len: u64,
    pub sha256: String,
}

impl ContentDigest {
    pub fn of_file(path: &Path) -> io::Result<Self> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        let len = io::copy(&mut file, &mut hasher)?;
        Ok(Self {
            len,
            sha256: hex::encode(hasher.finalize()),
        })
    }
}

#[derive(Debug)]
struct IndexedFile {
    path: PathBuf,
    /// Computed on first comparison.
    sha256: Option<String>,
}

/// Known vault files grouped by size. Hashes are computed lazily, only for
/// files whose size collides with a candidate.
#[derive(Debug, Default)]
pub struct ContentIndex {
    by_len: HashMap<u64, Vec<IndexedFile>>,
}

impl ContentIndex {
    /// Index every file under `root`, in sorted walk order.
    pub fn scan(root: &Path) -> Self {
        let mut index = Self::default();
        if !root.is_dir() {
            return index;
        }

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable vault entry while indexing");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.metadata() {
                Ok(meta) => index.push(entry.path().to_path_buf(), meta.len(), None),
                Err(e) => warn!(path = %entry.path().display(), error = %e, "Cannot stat vault file"),
            }
        }

        debug!(root = %root.display(), files = index.len(), "Indexed vault content");
        index
    }

    /// First known path with identical content.
    pub fn find(&mut self, digest: &ContentDigest) -> Option<PathBuf> {
        let candidates = self.by_len.get_mut(&digest.len)?;
        for candidate in candidates.iter_mut() {
            if candidate.sha256.is_none() {
                match ContentDigest::of_file(&candidate.path) {
                    Ok(found) => candidate.sha256 = Some(found.sha256),
                    Err(e) => {
                        debug!(path = %candidate.path.display(), error = %e, "Cannot hash indexed file");
                        continue;
                    }
                }
            }
            if candidate.sha256.as_deref() == Some(digest.sha256.as_str()) && candidate.path.is_file() {
                return Some(candidate.path.clone());
            }
        }
        None
    }

    /// Record a file that now exists in the vault.
    pub fn insert(&mut self, path: PathBuf, digest: ContentDigest) {
        let known = self
            .by_len
            .get(&digest.len)
            .is_some_and(|files| files.iter().any(|f| f.path == path));
        if !known {
            self.push(path, digest.len, Some(digest.sha256));
        }
    }

    /// Record a file written into the vault after the scan. It is hashed
    /// only if a candidate of the same size shows up. A re-written path
    /// replaces its earlier entry.
    pub fn track(&mut self, path: &Path) {
        let len = match fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(_) => return,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Cannot stat tracked file");
                return;
            }
        };
        for files in self.by_len.values_mut() {
            files.retain(|f| f.path != path);
        }
        self.push(path.to_path_buf(), len, None);
    }

    pub fn len(&self) -> usize {
        self.by_len.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, path: PathBuf, len: u64, sha256: Option<String>) {
        self.by_len
            .entry(len)
            .or_default()
            .push(IndexedFile { path, sha256 });
    }
}
