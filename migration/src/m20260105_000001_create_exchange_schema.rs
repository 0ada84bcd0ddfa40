use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Industries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Industries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Industries::Name).text().not_null())
                    .col(
                        ColumnDef::new(Industries::IndustryCode)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Industries::Description).text())
                    .to_owned(),
            )
            .await?;

        // Children cascade at the schema level as well as in the services
        manager
            .create_table(
                Table::create()
                    .table(Wastes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wastes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Wastes::Name).text().not_null())
                    .col(ColumnDef::new(Wastes::WasteType).text().not_null())
                    .col(
                        ColumnDef::new(Wastes::Quantity)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Wastes::Unit).text().not_null())
                    .col(ColumnDef::new(Wastes::Notes).text())
                    .col(ColumnDef::new(Wastes::IndustryId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wastes_industry_id")
                            .from(Wastes::Table, Wastes::IndustryId)
                            .to(Industries::Table, Industries::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WasteRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WasteRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WasteRequests::QuantityRequested)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(WasteRequests::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(WasteRequests::Details)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(WasteRequests::IndustryId).integer().not_null())
                    .col(ColumnDef::new(WasteRequests::WasteId).integer().not_null())
                    .col(
                        ColumnDef::new(WasteRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(WasteRequests::Status).is_in(["pending", "approved", "rejected"]))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_waste_requests_industry_id")
                            .from(WasteRequests::Table, WasteRequests::IndustryId)
                            .to(Industries::Table, Industries::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_waste_requests_waste_id")
                            .from(WasteRequests::Table, WasteRequests::WasteId)
                            .to(Wastes::Table, Wastes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WasteRequests::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wastes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Industries::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Industries {
    Table,
    Id,
    Name,
    IndustryCode,
    Description,
}

#[derive(DeriveIden)]
enum Wastes {
    Table,
    Id,
    Name,
    WasteType,
    Quantity,
    Unit,
    Notes,
    IndustryId,
}

#[derive(DeriveIden)]
enum WasteRequests {
    Table,
    Id,
    QuantityRequested,
    Status,
    Details,
    IndustryId,
    WasteId,
    CreatedAt,
}
