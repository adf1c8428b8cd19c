use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{LinkSyntax, Note, WikiLinks};

/// Writes notes as Markdown files with a YAML front-matter block.
pub struct MarkdownWriter {
    vault_root: PathBuf,
    syntax: Box<dyn LinkSyntax>,
}

impl MarkdownWriter {
    pub fn new(vault_root: impl Into<PathBuf>) -> Self {
        Self::with_syntax(vault_root, Box::new(WikiLinks))
    }

    pub fn with_syntax(vault_root: impl Into<PathBuf>, syntax: Box<dyn LinkSyntax>) -> Self {
        Self {
            vault_root: vault_root.into(),
            syntax,
        }
    }

    pub fn vault_root(&self) -> &Path {
        &self.vault_root
    }

    /// `---\n<yaml>---\n\n<body>\n`
    pub fn render(&self, note: &Note) -> Result<String, serde_yaml::Error> {
        let yaml = serde_yaml::to_string(&note.metadata)?;
        Ok(format!("---\n{yaml}---\n\n{}\n", note.render_body(self.syntax.as_ref())))
    }

    /// Write a note, creating its folder. Failures are logged and reported as
    /// `false`; they never abort the export.
    pub fn write(&self, note: &Note) -> bool {
        let path = self.vault_root.join(&note.path);

        let content = match self.render(note) {
            Ok(content) => content,
            Err(e) => {
                warn!(note = %note.path.display(), error = %e, "Failed to serialize note metadata");
                return false;
            }
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(dir = %parent.display(), error = %e, "Failed to create note folder");
                return false;
            }
        }

        match fs::write(&path, content) {
            Ok(()) => {
                debug!(note = %note.path.display(), "Wrote note");
                true
            }
            Err(e) => {
                warn!(note = %path.display(), error = %e, "Failed to write note");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::BodyLine;
    use fmg_model::{EntityKind, EntityRef};

    fn sample() -> Note {
        Note::new(PathBuf::from("Burgs/Burg-2-Testburg.md"))
            .with_meta("burg_id", 2)
            .unwrap()
            .with_meta("name", "Testburg")
            .unwrap()
            .line(BodyLine::Heading("Burg Testburg".into()))
            .line(BodyLine::link("Culture", EntityRef::new(EntityKind::Culture, 1)))
    }

    #[test]
    fn test_render_frontmatter_layout() {
        let writer = MarkdownWriter::new("/vault");
        let text = writer.render(&sample()).unwrap();
        assert_eq!(
            text,
            "---\nburg_id: 2\nname: Testburg\n---\n\n# Burg Testburg\nCulture → [[Cultures/Culture-1]]\n"
        );
    }

    #[test]
    fn test_frontmatter_parses_back() {
        let writer = MarkdownWriter::new("/vault");
        let text = writer.render(&sample()).unwrap();
        let yaml = text
            .strip_prefix("---\n")
            .and_then(|rest| rest.split("---\n").next())
            .unwrap();
        let parsed: serde_yaml::Mapping = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, sample().metadata);
    }

    #[test]
    fn test_write_creates_folders() {
        let vault = tempfile::tempdir().unwrap();
        let writer = MarkdownWriter::new(vault.path());
        assert!(writer.write(&sample()));

        let written = fs::read_to_string(vault.path().join("Burgs/Burg-2-Testburg.md")).unwrap();
        assert!(written.starts_with("---\nburg_id: 2\n"));
        assert!(written.ends_with("[[Cultures/Culture-1]]\n"));
    }

    #[test]
    fn test_write_failure_is_reported_not_raised() {
        let vault = tempfile::tempdir().unwrap();
        // A file where the folder should be.
        fs::write(vault.path().join("Burgs"), "not a dir").unwrap();
        let writer = MarkdownWriter::new(vault.path());
        assert!(!writer.write(&sample()));
    }
}
