//! Indexed copies of the base tables for search benchmarking.
//!
//! The copies are created empty; `socnet variants sync` fills them from the
//! base tables.

use sea_orm_migration::prelude::*;

use crate::db::variant::{BASE_TABLES, SchemaVariant};

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXED_VARIANTS: [SchemaVariant; 2] =
    [SchemaVariant::CompositeIndex, SchemaVariant::SeparateIndices];

fn fk(variant: SchemaVariant, table: &str, column: &str, parent: &str) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(format!("fk_{}_{}", variant.table(table), column))
        .from(Alias::new(variant.table(table)), Alias::new(column))
        .to(Alias::new(variant.table(parent)), Alias::new("id"))
        .on_delete(ForeignKeyAction::Cascade)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

fn id_column() -> ColumnDef {
    ColumnDef::new(Alias::new("id"))
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

async fn create_variant_tables(
    manager: &SchemaManager<'_>,
    variant: SchemaVariant,
) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Alias::new(variant.table("user_settings")))
                .if_not_exists()
                .col(&mut id_column())
                .col(
                    ColumnDef::new(Alias::new("username"))
                        .string_len(180)
                        .not_null()
                        .unique_key(),
                )
                .col(ColumnDef::new(Alias::new("password")).string_len(255).not_null())
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(Alias::new(variant.table("interest")))
                .if_not_exists()
                .col(&mut id_column())
                .col(
                    ColumnDef::new(Alias::new("value"))
                        .string_len(100)
                        .not_null()
                        .unique_key(),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(Alias::new(variant.table("user_info")))
                .if_not_exists()
                .col(
                    ColumnDef::new(Alias::new("user_id"))
                        .integer()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(Alias::new("name")).string_len(255).not_null())
                .col(ColumnDef::new(Alias::new("surname")).string_len(255).not_null())
                .col(ColumnDef::new(Alias::new("age")).integer().not_null())
                .col(ColumnDef::new(Alias::new("gender")).string_len(10).not_null())
                .col(ColumnDef::new(Alias::new("city")).string_len(150).not_null())
                .foreign_key(&mut fk(variant, "user_info", "user_id", "user_settings"))
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(Alias::new(variant.table("user_has_interest")))
                .if_not_exists()
                .col(&mut id_column())
                .col(ColumnDef::new(Alias::new("interest_id")).integer().not_null())
                .col(ColumnDef::new(Alias::new("user_id")).integer().not_null())
                .foreign_key(&mut fk(variant, "user_has_interest", "interest_id", "interest"))
                .foreign_key(&mut fk(variant, "user_has_interest", "user_id", "user_settings"))
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(Alias::new(variant.table("friends")))
                .if_not_exists()
                .col(&mut id_column())
                .col(ColumnDef::new(Alias::new("user_id")).integer().not_null())
                .col(ColumnDef::new(Alias::new("friend_user_id")).integer().not_null())
                .foreign_key(&mut fk(variant, "friends", "user_id", "user_settings"))
                .foreign_key(&mut fk(variant, "friends", "friend_user_id", "user_settings"))
                .to_owned(),
        )
        .await?;

    let info = variant.table("user_info");
    match variant {
        SchemaVariant::CompositeIndex => {
            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{info}_name_surname"))
                        .table(Alias::new(info.clone()))
                        .col(Alias::new("name"))
                        .col(Alias::new("surname"))
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }
        SchemaVariant::SeparateIndices => {
            for column in ["name", "surname"] {
                manager
                    .create_index(
                        Index::create()
                            .name(format!("idx_{info}_{column}"))
                            .table(Alias::new(info.clone()))
                            .col(Alias::new(column))
                            .if_not_exists()
                            .to_owned(),
                    )
                    .await?;
            }
        }
        SchemaVariant::Plain => {}
    }

    Ok(())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for variant in INDEXED_VARIANTS {
            create_variant_tables(manager, variant).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for variant in INDEXED_VARIANTS {
            for table in BASE_TABLES.iter().rev() {
                manager
                    .drop_table(
                        Table::drop()
                            .table(Alias::new(variant.table(table)))
                            .if_exists()
                            .to_owned(),
                    )
                    .await?;
            }
        }
        Ok(())
    }
}
