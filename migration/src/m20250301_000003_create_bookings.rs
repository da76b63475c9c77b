use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000001_create_users::User;
use super::m20250301_000002_create_listings::Listing;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(uuid(Booking::Id).primary_key())
                    .col(uuid(Booking::ListingId).not_null())
                    .col(uuid(Booking::GuestId).not_null())
                    .col(date(Booking::StartDate).not_null())
                    .col(
                        // start must precede end, checked again at the storage layer
                        date(Booking::EndDate)
                            .not_null()
                            .check(Expr::col(Booking::StartDate).lt(Expr::col(Booking::EndDate))),
                    )
                    .col(decimal_len(Booking::TotalPrice, 10, 2).not_null())
                    .col(boolean(Booking::IsPaid).not_null().default(false))
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_listing")
                            .from(Booking::Table, Booking::ListingId)
                            .to(Listing::Table, Listing::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_guest")
                            .from(Booking::Table, Booking::GuestId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    ListingId,
    GuestId,
    StartDate,
    EndDate,
    TotalPrice,
    IsPaid,
    CreatedAt,
}
