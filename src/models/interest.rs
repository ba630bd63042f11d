use serde::Serialize;

use crate::entities::interest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interest {
    pub id: i32,
    pub value: String,
}

impl From<interest::Model> for Interest {
    fn from(model: interest::Model) -> Self {
        Self {
            id: model.id,
            value: model.value,
        }
    }
}
