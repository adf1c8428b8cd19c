//! Link rendering. Transformers only produce `(kind, id)` pairs; the syntax
//! that turns them into text lives here.

use fmg_model::EntityRef;

/// Renders references for a particular knowledge-base tool.
pub trait LinkSyntax {
    /// Link to another entity's note.
    fn entity_link(&self, target: EntityRef) -> String;

    /// Link to a file inside the vault.
    fn asset_link(&self, path: &str) -> String;

    /// Inline image.
    fn image(&self, alt: &str, path: &str) -> String {
        format!("![{alt}]({path})")
    }
}

/// Obsidian-style `[[Folder/Kind-id]]` links.
#[derive(Debug, Clone, Copy, Default)]
pub struct WikiLinks;

impl LinkSyntax for WikiLinks {
    fn entity_link(&self, target: EntityRef) -> String {
        format!(
            "[[{}/{}-{}]]",
            target.kind.folder(),
            target.kind.prefix(),
            target.id
        )
    }

    fn asset_link(&self, path: &str) -> String {
        format!("[[{path}]]")
    }
}
