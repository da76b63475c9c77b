use axum::{
    extract::{Path, State},
    Extension, Json,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::booking;
use crate::error::{AppError, AppResult};
use crate::middleware::identity::CurrentUser;
use crate::serializers::{booking_response, BookingResponse, CreateBookingRequest, UsernameLookup};
use crate::store;
use crate::AppState;

/// Create a booking for the acting user
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(actor): Extension<CurrentUser>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<Json<BookingResponse>> {
    let booking = store::bookings::create(
        &state.db,
        store::bookings::NewBooking {
            listing_id: payload.listing_id,
            guest_id: actor.id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            total_price: payload.total_price,
            is_paid: payload.is_paid,
        },
    )
    .await?;

    let usernames = UsernameLookup::from_pairs([(actor.id, actor.username)]);
    Ok(Json(booking_response(&booking, &usernames)))
}

/// List the acting user's bookings
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(actor): Extension<CurrentUser>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::GuestId.eq(actor.id))
        .all(&state.db)
        .await?;

    let usernames = UsernameLookup::from_pairs([(actor.id, actor.username)]);
    let responses: Vec<BookingResponse> = bookings
        .iter()
        .map(|b| booking_response(b, &usernames))
        .collect();

    Ok(Json(responses))
}

/// Remove a booking
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let rows_affected = store::bookings::delete(&state.db, booking_id).await?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Booking not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Booking deleted" })))
}
