use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::{listing, review};
use crate::error::{AppError, AppResult};

pub struct NewReview {
    pub listing_id: Uuid,
    pub reviewer_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

pub async fn create(db: &DatabaseConnection, new: NewReview) -> AppResult<review::Model> {
    super::validate_rating(new.rating)?;

    listing::Entity::find_by_id(new.listing_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    // one review per (listing, reviewer); the unique index backs this up
    let existing = review::Entity::find()
        .filter(review::Column::ListingId.eq(new.listing_id))
        .filter(review::Column::ReviewerId.eq(new.reviewer_id))
        .one(db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Integrity(
            "user has already reviewed this listing".to_string(),
        ));
    }

    let review = review::ActiveModel {
        id: Set(Uuid::new_v4()),
        listing_id: Set(new.listing_id),
        reviewer_id: Set(new.reviewer_id),
        rating: Set(new.rating),
        comment: Set(new.comment),
        ..Default::default()
    };

    Ok(review.insert(db).await?)
}
