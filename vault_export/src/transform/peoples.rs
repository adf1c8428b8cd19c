use fmg_model::{CultureRecord, EntityKind, EntityRef, ReligionRecord};

use super::Transform;
use crate::notes::BodyLine;

impl Transform for CultureRecord {
    fn heading(&self) -> String {
        format!("Culture {}", self.name)
    }

    fn cross_refs(&self) -> Vec<BodyLine> {
        vec![BodyLine::listing("Origins", &self.origins)]
    }
}

impl Transform for ReligionRecord {
    fn heading(&self) -> String {
        format!("Religion {}", self.name)
    }

    fn cross_refs(&self) -> Vec<BodyLine> {
        vec![BodyLine::link("Culture", EntityRef::new(EntityKind::Culture, self.culture))]
    }
}
