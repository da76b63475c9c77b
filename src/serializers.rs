use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{booking, listing, review, user};

/// Explicit {id -> display name} lookup handed to the response builders, so
/// relationship traversal is an injected capability rather than an implicit
/// attribute chase.
pub struct UsernameLookup(HashMap<Uuid, String>);

impl UsernameLookup {
    pub fn from_users(users: &[user::Model]) -> Self {
        Self(users.iter().map(|u| (u.id, u.username.clone())).collect())
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Uuid, String)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    pub fn get(&self, id: Uuid) -> String {
        self.0.get(&id).cloned().unwrap_or_default()
    }
}

// ============ Responses ============

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub reviewer_username: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub guest_id: Uuid,
    pub guest_username: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price_per_night: Decimal,
    pub country: String,
    pub city: String,
    pub address: String,
    pub is_published: bool,
    pub host_id: Uuid,
    pub host_username: String,
    pub reviews: Vec<ReviewResponse>,
    pub average_rating: f64,
    pub created_at: DateTime<Utc>,
}

pub fn review_response(review: &review::Model, usernames: &UsernameLookup) -> ReviewResponse {
    ReviewResponse {
        id: review.id,
        reviewer_username: usernames.get(review.reviewer_id),
        rating: review.rating,
        comment: review.comment.clone(),
        created_at: review.created_at.with_timezone(&Utc),
    }
}

pub fn booking_response(booking: &booking::Model, usernames: &UsernameLookup) -> BookingResponse {
    BookingResponse {
        id: booking.id,
        listing_id: booking.listing_id,
        guest_id: booking.guest_id,
        guest_username: usernames.get(booking.guest_id),
        start_date: booking.start_date,
        end_date: booking.end_date,
        total_price: booking.total_price,
        is_paid: booking.is_paid,
        created_at: booking.created_at.with_timezone(&Utc),
    }
}

pub fn listing_response(
    listing: &listing::Model,
    reviews: &[review::Model],
    usernames: &UsernameLookup,
) -> ListingResponse {
    ListingResponse {
        id: listing.id,
        title: listing.title.clone(),
        description: listing.description.clone(),
        price_per_night: listing.price_per_night,
        country: listing.country.clone(),
        city: listing.city.clone(),
        address: listing.address.clone(),
        is_published: listing.is_published,
        host_id: listing.host_id,
        host_username: usernames.get(listing.host_id),
        reviews: reviews.iter().map(|r| review_response(r, usernames)).collect(),
        average_rating: average_rating(reviews),
        created_at: listing.created_at.with_timezone(&Utc),
    }
}

/// Arithmetic mean of ratings rounded to 2 decimal places, 0.0 when the
/// listing has no reviews. Recomputed on every serialization.
pub fn average_rating(reviews: &[review::Model]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: i32 = reviews.iter().map(|r| r.rating).sum();
    let mean = f64::from(total) / reviews.len() as f64;
    (mean * 100.0).round() / 100.0
}

// ============ Requests ============

// Write payloads carry only the client-settable fields. Ids, timestamps and
// the acting user (host, guest, reviewer) come from the request context;
// unknown JSON fields are dropped during deserialization.

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    pub description: String,
    pub price_per_night: Decimal,
    pub country: String,
    pub city: String,
    pub address: String,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_per_night: Option<Decimal>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub listing_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    #[serde(default)]
    pub is_paid: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_with_rating(rating: i32) -> review::Model {
        review::Model {
            id: Uuid::new_v4(),
            listing_id: Uuid::new_v4(),
            reviewer_id: Uuid::new_v4(),
            rating,
            comment: None,
            created_at: Utc::now().into(),
        }
    }

    fn sample_listing(host_id: Uuid) -> listing::Model {
        listing::Model {
            id: Uuid::new_v4(),
            host_id,
            title: "Cozy Downtown Loft".to_string(),
            description: "A beautiful place in New York, USA.".to_string(),
            price_per_night: Decimal::new(12000, 2),
            is_published: true,
            country: "USA".to_string(),
            city: "New York".to_string(),
            address: "123 Sample St.".to_string(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn average_rating_of_no_reviews_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn average_rating_rounds_to_two_decimals() {
        let reviews: Vec<_> = [4, 5, 3].into_iter().map(review_with_rating).collect();
        assert_eq!(average_rating(&reviews), 4.0);

        let reviews: Vec<_> = [5, 5, 4, 3].into_iter().map(review_with_rating).collect();
        assert_eq!(average_rating(&reviews), 4.25);

        let reviews: Vec<_> = [5, 4, 4].into_iter().map(review_with_rating).collect();
        assert_eq!(average_rating(&reviews), 4.33);
    }

    #[test]
    fn listing_response_nests_reviews_and_average() {
        let host = Uuid::new_v4();
        let listing = sample_listing(host);
        let mut review = review_with_rating(5);
        review.listing_id = listing.id;

        let usernames = UsernameLookup::from_pairs([
            (host, "seed_user_1".to_string()),
            (review.reviewer_id, "seed_user_2".to_string()),
        ]);

        let response = listing_response(&listing, std::slice::from_ref(&review), &usernames);
        assert_eq!(response.host_username, "seed_user_1");
        assert_eq!(response.average_rating, 5.0);
        assert_eq!(response.reviews.len(), 1);
        assert_eq!(response.reviews[0].reviewer_username, "seed_user_2");
    }

    #[test]
    fn unknown_user_resolves_to_empty_name() {
        let usernames = UsernameLookup::from_users(&[]);
        assert_eq!(usernames.get(Uuid::new_v4()), "");
    }

    #[test]
    fn client_supplied_host_is_ignored_on_write() {
        let payload = serde_json::json!({
            "title": "Sunny Beachfront Villa",
            "description": "Sea view.",
            "price_per_night": "250.00",
            "country": "Australia",
            "city": "Sydney",
            "address": "742 Sample St.",
            "is_published": true,
            "host": Uuid::new_v4(),
            "created_at": "2020-01-01T00:00:00Z"
        });

        // unknown fields (host, created_at) deserialize away silently
        let request: CreateListingRequest = serde_json::from_value(payload).unwrap();
        assert_eq!(request.title, "Sunny Beachfront Villa");
        assert_eq!(request.price_per_night, Decimal::new(25000, 2));
    }

    #[test]
    fn booking_response_resolves_guest_name() {
        let guest = Uuid::new_v4();
        let booking = booking::Model {
            id: Uuid::new_v4(),
            listing_id: Uuid::new_v4(),
            guest_id: guest,
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            total_price: Decimal::new(48000, 2),
            is_paid: false,
            created_at: Utc::now().into(),
        };

        let usernames = UsernameLookup::from_pairs([(guest, "seed_user_3".to_string())]);
        let response = booking_response(&booking, &usernames);
        assert_eq!(response.guest_username, "seed_user_3");
        assert_eq!(response.total_price, Decimal::new(48000, 2));
    }
}
