use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{bookings, listings, reviews};
use crate::middleware::identity::identity_middleware;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public read-only routes
    let public_routes = Router::new()
        .route("/listings", get(listings::list_listings))
        .route("/listings/{id}", get(listings::get_listing))
        .route("/listings/{id}/reviews", get(reviews::list_reviews));

    // Routes acting on behalf of a user (host, guest or reviewer); the
    // identity middleware resolves the X-User-Id header to a CurrentUser
    let actor_routes = Router::new()
        .route("/listings", post(listings::create_listing))
        .route("/listings/{id}", put(listings::update_listing))
        .route("/listings/{id}", delete(listings::delete_listing))
        .route("/listings/{id}/reviews", post(reviews::create_review))
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings", get(bookings::my_bookings))
        .route("/bookings/{id}", delete(bookings::delete_booking))
        .layer(middleware::from_fn_with_state(state.clone(), identity_middleware));

    Router::new()
        .nest("/api", public_routes.merge(actor_routes))
        .with_state(state)
}
