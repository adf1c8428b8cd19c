use fmg_model::{CellRecord, EntityKind, EntityRef};

use crate::naming::entity_path;
use crate::notes::{BodyLine, Note};

/// Build the note for one cell.
pub fn cell_note(cell: &CellRecord) -> Result<Note, serde_yaml::Error> {
    let targets = [
        (EntityKind::Feature, cell.feature),
        (EntityKind::Culture, cell.culture),
        (EntityKind::State, cell.state),
        (EntityKind::Province, cell.province),
        (EntityKind::Religion, cell.religion),
        (EntityKind::River, cell.river),
        (EntityKind::Burg, cell.burg),
    ]
    .into_iter()
    .map(|(kind, id)| EntityRef::new(kind, id))
    .collect();

    Ok(Note::new(entity_path(EntityKind::Cell, cell.id, ""))
        .with_record(cell)?
        .line(BodyLine::Heading(format!("Cell {}", cell.id)))
        .line(BodyLine::Links {
            label: "Links".into(),
            targets,
        }))
}
