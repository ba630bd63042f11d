use sea_orm::entity::prelude::*;

/// Account-interest edge. No uniqueness on the pair: generated accounts may
/// carry the same interest more than once.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_has_interest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub interest_id: i32,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::interest::Entity",
        from = "Column::InterestId",
        to = "super::interest::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Interest,
    #[sea_orm(
        belongs_to = "super::user_settings::Entity",
        from = "Column::UserId",
        to = "super::user_settings::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    UserSettings,
}

impl Related<super::interest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Interest.def()
    }
}

impl Related<super::user_settings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSettings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
