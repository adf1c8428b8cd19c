//! Entity transformers.
//!
//! Each kind has a pure note builder. The [`Exporter`] walks the document,
//! resolves assets, and hands finished notes to the writer. Bad input is
//! skipped at the smallest possible scope: a whole kind when its container
//! is unusable, a single element otherwise.

mod burgs;
mod cells;
mod geography;
mod peoples;
mod regions;

pub use burgs::*;
pub use cells::*;

use fmg_model::{EntityKind, WorldDocument, WorldRecord};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::bundles::BundleMatcher;
use crate::emblems::EmblemResolver;
use crate::lore::BurgLore;
use crate::naming::entity_path;
use crate::notes::{BodyLine, MarkdownWriter, Note};

/// Per-kind note content beyond the shared metadata.
pub trait Transform: WorldRecord {
    fn heading(&self) -> String;

    /// Cross-reference lines, in body order.
    fn cross_refs(&self) -> Vec<BodyLine>;
}

/// Build the shared part of a note: path, record metadata, `emblem_url` for
/// kinds that carry crests, heading, emblem image and cross-references.
pub fn record_note<R: Transform>(record: &R, emblem: Option<&str>) -> Result<Note, serde_yaml::Error> {
    let mut note = Note::new(entity_path(R::KIND, record.id(), record.display_name())).with_record(record)?;
    if R::KIND.has_emblem() {
        note = note.with_meta("emblem_url", emblem.unwrap_or_default())?;
    }

    let mut note = note
        .line(BodyLine::Heading(record.heading()))
        .line_opt(emblem.map(|path| BodyLine::Emblem(path.to_string())));
    note.body.extend(record.cross_refs());
    Ok(note)
}

/// Outcome of exporting one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindReport {
    pub kind: EntityKind,
    pub written: usize,
    pub skipped: usize,
}

impl KindReport {
    fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            written: 0,
            skipped: 0,
        }
    }
}

impl fmt::Display for KindReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} written, {} skipped", self.kind.folder(), self.written, self.skipped)
    }
}

type Builder<R> = fn(&mut Exporter, &R) -> Result<Note, serde_yaml::Error>;

/// Drives the transformation of a document into notes.
pub struct Exporter {
    writer: MarkdownWriter,
    emblems: EmblemResolver,
    bundles: BundleMatcher,
    bundle_root: Option<PathBuf>,
    with_lore: bool,
}

impl Exporter {
    pub fn new(vault_root: &Path, emblems: EmblemResolver, bundles: BundleMatcher) -> Self {
        Self {
            writer: MarkdownWriter::new(vault_root),
            emblems,
            bundles,
            bundle_root: None,
            with_lore: false,
        }
    }

    /// Directory holding externally generated settlement bundles.
    pub fn with_bundle_root(mut self, root: Option<PathBuf>) -> Self {
        self.bundle_root = root;
        self
    }

    pub fn with_lore(mut self, with_lore: bool) -> Self {
        self.with_lore = with_lore;
        self
    }

    /// Export every kind in the fixed processing order.
    pub fn export_all(&mut self, document: &WorldDocument) -> Vec<KindReport> {
        EntityKind::ALL
            .into_iter()
            .map(|kind| {
                let report = self.export_kind(document, kind);
                info!(%report, "Exported kind");
                report
            })
            .collect()
    }

    pub fn export_kind(&mut self, document: &WorldDocument, kind: EntityKind) -> KindReport {
        match kind {
            EntityKind::Cell => self.export_cells(document),
            EntityKind::Burg => self.export_records(document, Self::burg),
            EntityKind::State => self.export_records(document, Self::plain::<fmg_model::StateRecord>),
            EntityKind::Province => self.export_records(document, Self::plain::<fmg_model::ProvinceRecord>),
            EntityKind::Culture => self.export_records(document, Self::plain::<fmg_model::CultureRecord>),
            EntityKind::Religion => self.export_records(document, Self::plain::<fmg_model::ReligionRecord>),
            EntityKind::Feature => self.export_records(document, Self::plain::<fmg_model::FeatureRecord>),
            EntityKind::River => self.export_records(document, Self::plain::<fmg_model::RiverRecord>),
        }
    }

    fn export_cells(&mut self, document: &WorldDocument) -> KindReport {
        let mut report = KindReport::new(EntityKind::Cell);
        let Some(table) = document.cells() else {
            warn!(kind = %EntityKind::Cell, "Cell table missing or malformed; skipping cells");
            return report;
        };
        if table.is_empty() {
            if let Some(Value::Object(columns)) = document.container(EntityKind::Cell) {
                if !columns.is_empty() && !columns.contains_key("h") {
                    warn!(kind = %EntityKind::Cell, "Cell table has no 'h' column; skipping cells");
                }
            }
            return report;
        }

        for cell in table.iter() {
            match cell_note(&cell) {
                Ok(note) => self.record(&mut report, &note),
                Err(e) => {
                    warn!(kind = %EntityKind::Cell, id = %cell.id, error = %e, "Skipping cell");
                    report.skipped += 1;
                }
            }
        }
        report
    }

    fn export_records<R: Transform>(&mut self, document: &WorldDocument, build: Builder<R>) -> KindReport {
        let kind = R::KIND;
        let mut report = KindReport::new(kind);

        let items = match document.container(kind) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                warn!(kind = %kind, "Container is not a list; skipping kind");
                return report;
            }
            None => {
                warn!(kind = %kind, "Container missing; skipping kind");
                return report;
            }
        };

        let first = usize::from(kind.has_sentinel());
        for (index, item) in items.iter().enumerate().skip(first) {
            let Value::Object(fields) = item else {
                warn!(kind = %kind, index, "Skipping non-record element");
                report.skipped += 1;
                continue;
            };

            let record = R::decode(fields);
            match build(self, &record) {
                Ok(note) => self.record(&mut report, &note),
                Err(e) => {
                    warn!(kind = %kind, index, error = %e, "Skipping element");
                    report.skipped += 1;
                }
            }
        }
        report
    }

    fn record(&mut self, report: &mut KindReport, note: &Note) {
        if self.writer.write(note) {
            self.bundles.track(&self.writer.vault_root().join(&note.path));
            report.written += 1;
        } else {
            report.skipped += 1;
        }
    }

    fn emblem_for<R: WorldRecord>(&self, record: &R) -> Option<String> {
        if !R::KIND.has_emblem() {
            return None;
        }
        self.emblems.resolve(R::KIND, record.id(), record.emblem())
    }

    fn plain<R: Transform>(&mut self, record: &R) -> Result<Note, serde_yaml::Error> {
        let emblem = self.emblem_for(record);
        record_note(record, emblem.as_deref())
    }

    fn burg(&mut self, record: &fmg_model::BurgRecord) -> Result<Note, serde_yaml::Error> {
        let emblem = self.emblem_for(record);
        if let Some(path) = &emblem {
            self.bundles.track(&self.writer.vault_root().join(path));
        }
        let assets = self.bundles.integrate(
            record.id,
            &record.name,
            self.bundle_root.as_deref(),
            self.writer.vault_root(),
        );
        if !assets.is_empty() {
            debug!(burg = %record.id, assets = assets.len(), "Linked settlement assets");
        }
        let lore = self.with_lore.then(|| BurgLore::generate(record.id, &record.name));
        burg_note(record, emblem.as_deref(), &assets, lore.as_ref())
    }
}
