use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Foreign key lookups used by the cascade deletes and nested projections
        manager
            .create_index(
                Index::create()
                    .name("idx_wastes_industry_id")
                    .table(Wastes::Table)
                    .col(Wastes::IndustryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_waste_requests_industry_id")
                    .table(WasteRequests::Table)
                    .col(WasteRequests::IndustryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_waste_requests_waste_id")
                    .table(WasteRequests::Table)
                    .col(WasteRequests::WasteId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Filter columns
        manager
            .create_index(
                Index::create()
                    .name("idx_wastes_waste_type")
                    .table(Wastes::Table)
                    .col(Wastes::WasteType)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_waste_requests_status")
                    .table(WasteRequests::Table)
                    .col(WasteRequests::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_waste_requests_status")
                    .table(WasteRequests::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_wastes_waste_type")
                    .table(Wastes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_waste_requests_waste_id")
                    .table(WasteRequests::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_waste_requests_industry_id")
                    .table(WasteRequests::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_wastes_industry_id")
                    .table(Wastes::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Wastes {
    Table,
    IndustryId,
    WasteType,
}

#[derive(DeriveIden)]
enum WasteRequests {
    Table,
    IndustryId,
    WasteId,
    Status,
}
