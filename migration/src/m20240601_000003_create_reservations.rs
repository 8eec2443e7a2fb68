use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240601_000001_create_clients::Clients;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(pk_auto(Reservations::Id))
                    .col(integer(Reservations::ClientId))
                    .col(ColumnDef::new(Reservations::FromDate).date_time().not_null())
                    .col(ColumnDef::new(Reservations::ToDate).date_time().not_null())
                    .col(double(Reservations::Price))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_client_id")
                            .from(Reservations::Table, Reservations::ClientId)
                            .to(Clients::Table, Clients::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Search joins reservations to clients
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_client_id")
                    .table(Reservations::Table)
                    .col(Reservations::ClientId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reservations {
    Table,
    Id,
    ClientId,
    FromDate,
    ToDate,
    Price,
}
