use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000001_create_users::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listing::Table)
                    .if_not_exists()
                    .col(uuid(Listing::Id).primary_key())
                    .col(uuid(Listing::HostId).not_null())
                    .col(string_len(Listing::Title, 255).not_null())
                    .col(text(Listing::Description).not_null())
                    .col(
                        decimal_len(Listing::PricePerNight, 10, 2)
                            .not_null()
                            .check(Expr::col(Listing::PricePerNight).gte(0.01)),
                    )
                    .col(boolean(Listing::IsPublished).not_null().default(false))
                    .col(string_len(Listing::Country, 100).not_null())
                    .col(string_len(Listing::City, 100).not_null())
                    .col(string_len(Listing::Address, 255).not_null())
                    .col(
                        timestamp_with_time_zone(Listing::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Listing::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listing_host")
                            .from(Listing::Table, Listing::HostId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listing::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Listing {
    Table,
    Id,
    HostId,
    Title,
    Description,
    PricePerNight,
    IsPublished,
    Country,
    City,
    Address,
    CreatedAt,
    UpdatedAt,
}
