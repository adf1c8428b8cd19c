use fmg_model::{EntityKind, EntityRef, ProvinceRecord, StateRecord};

use super::Transform;
use crate::notes::BodyLine;

impl Transform for StateRecord {
    fn heading(&self) -> String {
        format!("State {}", self.name)
    }

    fn cross_refs(&self) -> Vec<BodyLine> {
        vec![
            BodyLine::link("Culture", EntityRef::new(EntityKind::Culture, self.culture)),
            BodyLine::link("Capital", EntityRef::new(EntityKind::Burg, self.capital_burg)),
        ]
    }
}

impl Transform for ProvinceRecord {
    fn heading(&self) -> String {
        format!("Province {}", self.name)
    }

    fn cross_refs(&self) -> Vec<BodyLine> {
        vec![
            BodyLine::link("State", EntityRef::new(EntityKind::State, self.state)),
            BodyLine::link("Capital", EntityRef::new(EntityKind::Burg, self.capital_burg)),
        ]
    }
}
