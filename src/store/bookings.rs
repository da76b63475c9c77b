use rust_decimal::Decimal;
use sea_orm::entity::prelude::Date;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::entities::{booking, listing};
use crate::error::{AppError, AppResult};

pub struct NewBooking {
    pub listing_id: Uuid,
    pub guest_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub total_price: Decimal,
    pub is_paid: bool,
}

// Nothing prevents two bookings on the same listing from overlapping in
// time; the model only requires a well-ordered date range per booking.
pub async fn create(db: &DatabaseConnection, new: NewBooking) -> AppResult<booking::Model> {
    super::validate_date_order(new.start_date, new.end_date)?;

    listing::Entity::find_by_id(new.listing_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    let booking = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        listing_id: Set(new.listing_id),
        guest_id: Set(new.guest_id),
        start_date: Set(new.start_date),
        end_date: Set(new.end_date),
        total_price: Set(new.total_price),
        is_paid: Set(new.is_paid),
        ..Default::default()
    };

    Ok(booking.insert(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<u64> {
    let result = booking::Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}
