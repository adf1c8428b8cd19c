use fmg_model::{EntityKind, EntityRef, FeatureRecord, RiverRecord};

use super::Transform;
use crate::notes::BodyLine;

impl Transform for FeatureRecord {
    fn heading(&self) -> String {
        format!("Feature {} ({})", self.id, self.feature_type)
    }

    fn cross_refs(&self) -> Vec<BodyLine> {
        vec![BodyLine::listing("Cells", &self.cells)]
    }
}

impl Transform for RiverRecord {
    fn heading(&self) -> String {
        format!("River {}", self.name)
    }

    fn cross_refs(&self) -> Vec<BodyLine> {
        vec![
            BodyLine::listing("Flows through", &self.cells),
            BodyLine::link("Mouth", EntityRef::new(EntityKind::Cell, self.mouth_cell)),
        ]
    }
}
