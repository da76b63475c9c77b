use axum::{
    extract::{Path, State},
    Extension, Json,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{listing, review, user};
use crate::error::{AppError, AppResult};
use crate::middleware::identity::CurrentUser;
use crate::serializers::{
    listing_response, CreateListingRequest, ListingResponse, UpdateListingRequest, UsernameLookup,
};
use crate::store;
use crate::AppState;

/// List all listings with nested reviews and average rating
pub async fn list_listings(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ListingResponse>>> {
    let listings = listing::Entity::find().all(&state.db).await?;
    let reviews = review::Entity::find().all(&state.db).await?;
    let users = user::Entity::find().all(&state.db).await?;
    let usernames = UsernameLookup::from_users(&users);

    let responses: Vec<ListingResponse> = listings
        .iter()
        .map(|l| {
            let listing_reviews: Vec<review::Model> = reviews
                .iter()
                .filter(|r| r.listing_id == l.id)
                .cloned()
                .collect();
            listing_response(l, &listing_reviews, &usernames)
        })
        .collect();

    Ok(Json(responses))
}

/// Get a single listing
pub async fn get_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> AppResult<Json<ListingResponse>> {
    let listing = listing::Entity::find_by_id(listing_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

    let reviews = review::Entity::find()
        .filter(review::Column::ListingId.eq(listing.id))
        .all(&state.db)
        .await?;
    let users = user::Entity::find().all(&state.db).await?;
    let usernames = UsernameLookup::from_users(&users);

    Ok(Json(listing_response(&listing, &reviews, &usernames)))
}

/// Create a listing hosted by the acting user
pub async fn create_listing(
    State(state): State<AppState>,
    Extension(actor): Extension<CurrentUser>,
    Json(payload): Json<CreateListingRequest>,
) -> AppResult<Json<ListingResponse>> {
    let listing = store::listings::create(
        &state.db,
        store::listings::NewListing {
            host_id: actor.id,
            title: payload.title,
            description: payload.description,
            price_per_night: payload.price_per_night,
            is_published: payload.is_published,
            country: payload.country,
            city: payload.city,
            address: payload.address,
        },
    )
    .await?;

    let usernames = UsernameLookup::from_pairs([(actor.id, actor.username)]);
    Ok(Json(listing_response(&listing, &[], &usernames)))
}

/// Update a listing
pub async fn update_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
    Json(payload): Json<UpdateListingRequest>,
) -> AppResult<Json<ListingResponse>> {
    let listing = store::listings::update(
        &state.db,
        listing_id,
        store::listings::ListingPatch {
            title: payload.title,
            description: payload.description,
            price_per_night: payload.price_per_night,
            is_published: payload.is_published,
            country: payload.country,
            city: payload.city,
            address: payload.address,
        },
    )
    .await?;

    let reviews = review::Entity::find()
        .filter(review::Column::ListingId.eq(listing.id))
        .all(&state.db)
        .await?;
    let users = user::Entity::find().all(&state.db).await?;
    let usernames = UsernameLookup::from_users(&users);

    Ok(Json(listing_response(&listing, &reviews, &usernames)))
}

/// Delete a listing along with its bookings and reviews
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let rows_affected = store::listings::delete(&state.db, listing_id).await?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Listing not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Listing deleted" })))
}
