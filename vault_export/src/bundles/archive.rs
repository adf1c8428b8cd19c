//! Zip archiving of matched bundle entries.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Component, Path};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::BundleEntry;
use crate::error::BundleError;

/// Write every entry (directories recursively) into one archive at `dest`.
///
/// Timestamps are pinned so that identical inputs produce identical bytes.
/// A partially written archive is removed on failure.
pub fn write_archive(entries: &[BundleEntry], dest: &Path) -> Result<(), BundleError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| BundleError::io(parent, e))?;
    }

    let result = fill_archive(entries, dest);
    if result.is_err() {
        let _ = fs::remove_file(dest);
    }
    result
}

fn fill_archive(entries: &[BundleEntry], dest: &Path) -> Result<(), BundleError> {
    let file = File::create(dest).map_err(|e| BundleError::io(dest, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    for entry in entries {
        if entry.source.is_dir() {
            for item in WalkDir::new(&entry.source).min_depth(1).sort_by_file_name() {
                let item = item?;
                if !item.path().is_file() {
                    continue;
                }
                let Ok(inner) = item.path().strip_prefix(&entry.source) else {
                    continue;
                };
                let name = archive_name(&entry.relative.join(inner));
                add_file(&mut zip, item.path(), name, options)?;
            }
        } else {
            add_file(&mut zip, &entry.source, archive_name(&entry.relative), options)?;
        }
    }

    zip.finish()?;
    Ok(())
}

fn add_file(
    zip: &mut ZipWriter<BufWriter<File>>,
    source: &Path,
    name: String,
    options: SimpleFileOptions,
) -> Result<(), BundleError> {
    zip.start_file(name, options)?;
    let mut input = File::open(source).map_err(|e| BundleError::io(source, e))?;
    io::copy(&mut input, zip).map_err(|e| BundleError::io(source, e))?;
    Ok(())
}

/// Archive member names always use `/`.
fn archive_name(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
