use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "interest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique, column_type = "String(StringLen::N(100))")]
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_has_interest::Entity")]
    UserHasInterest,
}

impl Related<super::user_has_interest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserHasInterest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
