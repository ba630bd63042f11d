use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_info")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,

    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub name: String,

    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub surname: String,

    pub age: i32,

    /// `male` or `female`
    #[sea_orm(column_type = "String(StringLen::N(10))")]
    pub gender: String,

    #[sea_orm(column_type = "String(StringLen::N(150))")]
    pub city: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_settings::Entity",
        from = "Column::UserId",
        to = "super::user_settings::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    UserSettings,
}

impl Related<super::user_settings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSettings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
