use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::entities::{listing, user};
use crate::error::{AppError, AppResult};

pub struct NewListing {
    pub host_id: Uuid,
    pub title: String,
    pub description: String,
    pub price_per_night: Decimal,
    pub is_published: bool,
    pub country: String,
    pub city: String,
    pub address: String,
}

#[derive(Default)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_per_night: Option<Decimal>,
    pub is_published: Option<bool>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}

pub async fn create(db: &DatabaseConnection, new: NewListing) -> AppResult<listing::Model> {
    super::validate_price(new.price_per_night)?;

    user::Entity::find_by_id(new.host_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Integrity("host does not exist".to_string()))?;

    let listing = listing::ActiveModel {
        id: Set(Uuid::new_v4()),
        host_id: Set(new.host_id),
        title: Set(new.title),
        description: Set(new.description),
        price_per_night: Set(new.price_per_night),
        is_published: Set(new.is_published),
        country: Set(new.country),
        city: Set(new.city),
        address: Set(new.address),
        ..Default::default()
    };

    Ok(listing.insert(db).await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    patch: ListingPatch,
) -> AppResult<listing::Model> {
    let listing = listing::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    let mut active: listing::ActiveModel = listing.into();

    if let Some(title) = patch.title {
        active.title = Set(title);
    }
    if let Some(description) = patch.description {
        active.description = Set(description);
    }
    if let Some(price) = patch.price_per_night {
        super::validate_price(price)?;
        active.price_per_night = Set(price);
    }
    if let Some(is_published) = patch.is_published {
        active.is_published = Set(is_published);
    }
    if let Some(country) = patch.country {
        active.country = Set(country);
    }
    if let Some(city) = patch.city {
        active.city = Set(city);
    }
    if let Some(address) = patch.address {
        active.address = Set(address);
    }

    active.updated_at = Set(Utc::now().into());

    Ok(active.update(db).await?)
}

/// Dependent bookings and reviews are removed by the cascading foreign keys.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<u64> {
    let result = listing::Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}
