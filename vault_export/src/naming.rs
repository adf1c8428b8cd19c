//! Stable, filesystem-safe names for notes and asset folders.

use fmg_model::{EntityId, EntityKind};
use std::path::PathBuf;

/// Fallback used when a name sanitizes to nothing.
pub const UNNAMED: &str = "unnamed";

/// Convert arbitrary text into a filesystem-safe token.
///
/// Whitespace runs become a single `_`, anything outside ASCII alphanumerics
/// and `. - _` becomes `_`, and leading/trailing `_`/`-` are trimmed.
/// Returns `fallback` when nothing is left. Idempotent.
pub fn safe_name(raw: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_whitespace = false;

    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            out.push(ch);
        } else {
            out.push('_');
        }
    }

    let trimmed = out.trim_matches(|c| c == '_' || c == '-');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Filename stem for an entity's note, e.g. `Burg-2-Testburg`.
pub fn note_stem(kind: EntityKind, id: EntityId, name: &str) -> String {
    if kind.is_named() {
        format!("{}-{}-{}", kind.prefix(), id, safe_name(name, UNNAMED))
    } else {
        format!("{}-{}", kind.prefix(), id)
    }
}

/// Vault-relative note path, e.g. `Burgs/Burg-2-Testburg.md`.
pub fn entity_path(kind: EntityKind, id: EntityId, name: &str) -> PathBuf {
    PathBuf::from(kind.folder()).join(format!("{}.md", note_stem(kind, id, name)))
}

/// Per-entity asset folder name. Always carries the name suffix.
pub fn entity_folder(kind: EntityKind, id: EntityId, name: &str) -> String {
    format!("{}-{}-{}", kind.prefix(), id, safe_name(name, UNNAMED))
}
