//! Emblem resolution - turns an entity's crest into a file inside the vault.
//!
//! Resolution order:
//! 1. **Embedded SVG**: written verbatim as `emblems/<kind>-<id>.svg`
//! 2. **Reference**: downloaded (HTTP/S, only when enabled) or copied (local path)
//! 3. **Nothing**: the entity has no emblem
//!
//! Every failure is soft. The caller gets `None` and the note is still written.
//! Downloads never clobber an existing emblem unless they complete.

mod fetch;

pub use fetch::*;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fmg_model::{EmblemSource, EntityId, EntityKind};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::EmblemError;
use crate::naming::safe_name;

/// Emblem folder name, relative to the vault root.
pub const EMBLEM_DIR: &str = "emblems";

/// Persists emblems into `<vault>/emblems`.
pub struct EmblemResolver {
    emblem_dir: PathBuf,
    download: bool,
    fetcher: Option<Box<dyn EmblemFetcher>>,
}

impl EmblemResolver {
    /// Create a resolver. The HTTP client is only built when downloads are enabled.
    pub fn new(vault_root: &Path, download: bool) -> Self {
        let fetcher: Option<Box<dyn EmblemFetcher>> = if download {
            match HttpFetcher::new() {
                Ok(fetcher) => Some(Box::new(fetcher)),
                Err(e) => {
                    warn!(error = %e, "Failed to build HTTP client; emblem downloads will be skipped");
                    None
                }
            }
        } else {
            None
        };

        Self {
            emblem_dir: vault_root.join(EMBLEM_DIR),
            download,
            fetcher,
        }
    }

    /// Create a resolver with downloads enabled through a custom fetcher.
    pub fn with_fetcher(vault_root: &Path, fetcher: Box<dyn EmblemFetcher>) -> Self {
        Self {
            emblem_dir: vault_root.join(EMBLEM_DIR),
            download: true,
            fetcher: Some(fetcher),
        }
    }

    /// Resolve an emblem, returning its vault-relative path.
    pub fn resolve(&self, kind: EntityKind, id: EntityId, source: &EmblemSource) -> Option<String> {
        let result = match source {
            EmblemSource::EmbeddedSvg(svg) => self.save_svg(kind, id, svg),
            EmblemSource::Reference(reference) => {
                let filename = format!("{}-{}.{}", kind.slug(), id, extension_of(reference));
                if is_remote(reference) {
                    self.download(reference, &filename)
                } else {
                    self.copy_local(Path::new(reference), &filename)
                }
            }
            EmblemSource::None => return None,
        };

        match result {
            Ok(Some(filename)) => Some(format!("{EMBLEM_DIR}/{filename}")),
            Ok(None) => None,
            Err(e) => {
                warn!(kind = %kind, id = %id, error = %e, "Failed to resolve emblem");
                None
            }
        }
    }

    fn save_svg(&self, kind: EntityKind, id: EntityId, svg: &str) -> Result<Option<String>, EmblemError> {
        let filename = format!("{}-{}.svg", kind.slug(), id);
        let path = self.emblem_dir.join(&filename);
        fs::create_dir_all(&self.emblem_dir).map_err(|e| EmblemError::io(&self.emblem_dir, e))?;
        fs::write(&path, svg).map_err(|e| EmblemError::io(&path, e))?;
        Ok(Some(filename))
    }

    fn download(&self, url: &str, filename: &str) -> Result<Option<String>, EmblemError> {
        if !self.download {
            warn!(url, "Emblem URL provided but emblem downloads are disabled");
            return Ok(None);
        }
        let Some(fetcher) = self.fetcher.as_ref() else {
            warn!(url, "No HTTP client available; skipping emblem download");
            return Ok(None);
        };

        fs::create_dir_all(&self.emblem_dir).map_err(|e| EmblemError::io(&self.emblem_dir, e))?;
        let path = self.emblem_dir.join(filename);

        // The body lands next to its destination and only replaces it once
        // complete. An emblem from an earlier run survives a failed fetch.
        let mut tmp = NamedTempFile::new_in(&self.emblem_dir).map_err(|e| EmblemError::io(&self.emblem_dir, e))?;
        let bytes = {
            let mut out = BufWriter::new(tmp.as_file_mut());
            let bytes = fetcher.fetch(url, &mut out)?;
            out.flush().map_err(|e| EmblemError::io(&path, e))?;
            bytes
        };
        tmp.persist(&path).map_err(|e| EmblemError::io(&path, e.error))?;

        debug!(url, bytes, path = %path.display(), "Downloaded emblem");
        Ok(Some(filename.to_string()))
    }

    fn copy_local(&self, src: &Path, filename: &str) -> Result<Option<String>, EmblemError> {
        let dst = self.emblem_dir.join(filename);

        if is_same_file(src, &dst) {
            debug!(path = %dst.display(), "Emblem already at destination");
            return Ok(Some(filename.to_string()));
        }
        if !src.is_file() {
            return Err(EmblemError::NotFound(src.to_path_buf()));
        }

        fs::create_dir_all(&self.emblem_dir).map_err(|e| EmblemError::io(&self.emblem_dir, e))?;
        fs::copy(src, &dst).map_err(|e| EmblemError::io(src, e))?;
        Ok(Some(filename.to_string()))
    }
}

/// Extension taken from the segment after the last `.` of a reference.
fn extension_of(reference: &str) -> String {
    let raw = reference.rsplit('.').next().unwrap_or_default();
    let raw = raw.split(['?', '#']).next().unwrap_or_default();
    safe_name(raw, "png")
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
