use axum::{
    extract::{Path, State},
    Extension, Json,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{listing, review, user};
use crate::error::{AppError, AppResult};
use crate::middleware::identity::CurrentUser;
use crate::serializers::{review_response, CreateReviewRequest, ReviewResponse, UsernameLookup};
use crate::store;
use crate::AppState;

/// List reviews for a listing
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> AppResult<Json<Vec<ReviewResponse>>> {
    listing::Entity::find_by_id(listing_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    let reviews = review::Entity::find()
        .filter(review::Column::ListingId.eq(listing_id))
        .all(&state.db)
        .await?;
    let users = user::Entity::find().all(&state.db).await?;
    let usernames = UsernameLookup::from_users(&users);

    let responses: Vec<ReviewResponse> = reviews
        .iter()
        .map(|r| review_response(r, &usernames))
        .collect();

    Ok(Json(responses))
}

/// Review a listing as the acting user
pub async fn create_review(
    State(state): State<AppState>,
    Extension(actor): Extension<CurrentUser>,
    Path(listing_id): Path<Uuid>,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<Json<ReviewResponse>> {
    let review = store::reviews::create(
        &state.db,
        store::reviews::NewReview {
            listing_id,
            reviewer_id: actor.id,
            rating: payload.rating,
            comment: payload.comment,
        },
    )
    .await?;

    let usernames = UsernameLookup::from_pairs([(actor.id, actor.username)]);
    Ok(Json(review_response(&review, &usernames)))
}
