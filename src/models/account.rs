use serde::Serialize;

use crate::domain::UserId;
use crate::entities::user_settings;

/// Account data returned from the store (without the password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: UserId,
    pub username: String,
}

impl From<user_settings::Model> for Account {
    fn from(model: user_settings::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            username: model.username,
        }
    }
}
