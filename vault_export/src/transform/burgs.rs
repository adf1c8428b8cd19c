use fmg_model::{BurgRecord, EntityKind, EntityRef};

use super::{record_note, Transform};
use crate::lore::BurgLore;
use crate::notes::{BodyLine, Note};

impl Transform for BurgRecord {
    fn heading(&self) -> String {
        format!("Burg {}", self.name)
    }

    fn cross_refs(&self) -> Vec<BodyLine> {
        vec![
            BodyLine::Located(EntityRef::new(EntityKind::Cell, self.cell)),
            BodyLine::link("Culture", EntityRef::new(EntityKind::Culture, self.culture)),
            BodyLine::link("State", EntityRef::new(EntityKind::State, self.state)),
            BodyLine::link("Feature", EntityRef::new(EntityKind::Feature, self.feature)),
        ]
    }
}

/// Build a settlement note. `assets` are vault-relative bundle paths, kept
/// verbatim under `mfcg_assets` and linked from the body.
pub fn burg_note(
    burg: &BurgRecord,
    emblem: Option<&str>,
    assets: &[String],
    lore: Option<&BurgLore>,
) -> Result<Note, serde_yaml::Error> {
    let mut note = record_note(burg, emblem)?.with_meta("mfcg_assets", assets)?;

    if !assets.is_empty() {
        note = note.line(BodyLine::Assets {
            title: "Map assets".into(),
            paths: assets.to_vec(),
        });
    }

    if let Some(lore) = lore {
        note = note.with_meta("lore", lore)?.line(BodyLine::Section {
            title: "Lore".into(),
            items: lore.lines(),
        });
    }

    Ok(note)
}
