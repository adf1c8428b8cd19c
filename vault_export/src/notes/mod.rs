//! Note records - metadata plus a structured body, ready to be written.

mod links;
mod writer;

pub use links::*;
pub use writer::*;

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::PathBuf;

use fmg_model::EntityRef;

/// One line (or block) of a note body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyLine {
    /// `# text`
    Heading(String),
    /// Inline emblem image.
    Emblem(String),
    /// `Located in link`
    Located(EntityRef),
    /// `label → link`
    Link { label: String, target: EntityRef },
    /// `label → link, link, ...`
    Links { label: String, targets: Vec<EntityRef> },
    /// `label → [1, 2, 3]`, ids listed without linking.
    Listing { label: String, ids: Vec<i64> },
    /// A `## title` section with one bullet per item.
    Section { title: String, items: Vec<String> },
    /// A `## title` section linking vault files.
    Assets { title: String, paths: Vec<String> },
}

impl BodyLine {
    pub fn link(label: impl Into<String>, target: EntityRef) -> Self {
        BodyLine::Link {
            label: label.into(),
            target,
        }
    }

    pub fn listing(label: impl Into<String>, ids: &[i64]) -> Self {
        BodyLine::Listing {
            label: label.into(),
            ids: ids.to_vec(),
        }
    }

    /// Render with a link syntax.
    pub fn render(&self, syntax: &dyn LinkSyntax) -> String {
        match self {
            BodyLine::Heading(text) => format!("# {text}"),
            BodyLine::Emblem(path) => syntax.image("Emblem", path),
            BodyLine::Located(target) => format!("Located in {}", syntax.entity_link(*target)),
            BodyLine::Link { label, target } => {
                format!("{label} → {}", syntax.entity_link(*target))
            }
            BodyLine::Links { label, targets } => {
                let links: Vec<String> = targets.iter().map(|t| syntax.entity_link(*t)).collect();
                format!("{label} → {}", links.join(", "))
            }
            BodyLine::Listing { label, ids } => {
                let ids: Vec<String> = ids.iter().map(i64::to_string).collect();
                format!("{label} → [{}]", ids.join(", "))
            }
            BodyLine::Section { title, items } => {
                let mut out = format!("\n## {title}");
                for item in items {
                    out.push_str("\n- ");
                    out.push_str(item);
                }
                out
            }
            BodyLine::Assets { title, paths } => {
                let mut out = format!("\n## {title}");
                for path in paths {
                    out.push_str("\n- ");
                    out.push_str(&syntax.asset_link(path));
                }
                out
            }
        }
    }
}

/// A note about one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Relative to the vault root.
    pub path: PathBuf,
    pub metadata: Mapping,
    pub body: Vec<BodyLine>,
}

impl Note {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            metadata: Mapping::new(),
            body: Vec::new(),
        }
    }

    /// Merge a record's serialized fields into the metadata, in field order.
    pub fn with_record<T: Serialize>(mut self, record: &T) -> Result<Self, serde_yaml::Error> {
        if let Value::Mapping(fields) = serde_yaml::to_value(record)? {
            self.metadata.extend(fields);
        }
        Ok(self)
    }

    /// Set one metadata key.
    pub fn with_meta<T: Serialize>(mut self, key: &str, value: T) -> Result<Self, serde_yaml::Error> {
        self.metadata
            .insert(Value::String(key.to_string()), serde_yaml::to_value(value)?);
        Ok(self)
    }

    pub fn line(mut self, line: BodyLine) -> Self {
        self.body.push(line);
        self
    }

    /// Add a line only when present.
    pub fn line_opt(mut self, line: Option<BodyLine>) -> Self {
        self.body.extend(line);
        self
    }

    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    pub fn render_body(&self, syntax: &dyn LinkSyntax) -> String {
        self.body
            .iter()
            .map(|line| line.render(syntax))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
