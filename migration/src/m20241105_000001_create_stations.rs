use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== ESTACION_INV ==========
        manager
            .create_table(
                Table::create()
                    .table(EstacionInv::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EstacionInv::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EstacionInv::Nombre).string_len(100).not_null())
                    .col(ColumnDef::new(EstacionInv::Idema).string_len(10).not_null())
                    .col(ColumnDef::new(EstacionInv::Provincia).string_len(50).not_null())
                    .col(ColumnDef::new(EstacionInv::Latitud).double().not_null())
                    .col(ColumnDef::new(EstacionInv::Longitud).double().not_null())
                    .col(ColumnDef::new(EstacionInv::Altitud).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_estacion_inv_idema")
                    .table(EstacionInv::Table)
                    .col(EstacionInv::Idema)
                    .to_owned(),
            )
            .await?;

        // ========== ESTACION_BD ==========
        // Shares its id with estacion_inv. No foreign key: either row may
        // outlive the other.
        manager
            .create_table(
                Table::create()
                    .table(EstacionBd::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EstacionBd::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EstacionBd::Estado).integer())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EstacionBd::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EstacionInv::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum EstacionInv {
    Table,
    Id,
    Nombre,
    Idema,
    Provincia,
    Latitud,
    Longitud,
    Altitud,
}

#[derive(DeriveIden)]
enum EstacionBd {
    Table,
    Id,
    Estado,
}
