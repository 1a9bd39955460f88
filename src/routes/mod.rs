use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{admin, attractions, auth, bookings, catalog, profile, session};
use crate::middleware::auth::{auth_middleware, require_hotel_admin, require_tour_admin};
use crate::middleware::rate_limit::create_public_governor;
use crate::middleware::role_rate_limit::{create_role_governor, RateLimitedRole};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let rate_limits = state.config.rate_limit_enabled;

    // Registration and login (rate limited per IP)
    let mut auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Catalog, search and the seed dataset
    let public_routes = Router::new()
        .route("/data", get(catalog::get_data))
        .route("/tours", get(catalog::list_tours))
        .route("/tours/search", get(catalog::search_tours))
        .route("/tours/{id}", get(catalog::get_tour))
        .route("/rooms", get(catalog::list_rooms))
        .route("/rooms/{id}", get(catalog::get_room))
        .route("/room-types", get(catalog::list_room_types))
        .route("/attractions", get(catalog::list_attractions));

    // Signed-in user: profile, photo posts, navigation state
    let mut account_routes = Router::new()
        .route("/logout", post(auth::logout))
        .route("/profile", get(profile::get_profile).put(profile::update_profile))
        .route("/attractions", post(attractions::add_attraction))
        .route("/session", get(session::get_session))
        .route("/session/navigate", post(session::navigate))
        .route("/session/language", put(session::change_language))
        .route("/session/tour-filter", put(session::set_tour_filter))
        .route("/session/tours", get(session::session_tours));

    // Signed-in user: tour and hotel bookings
    let mut booking_routes = Router::new()
        .route("/tours", post(bookings::book_tour))
        .route("/tours/{id}", delete(bookings::cancel_tour_booking))
        .route("/hotel", post(bookings::request_hotel_booking))
        .route("/hotel/{id}", delete(bookings::cancel_hotel_booking));

    let mut tour_admin_routes = Router::new()
        .route("/tours/{id}", put(admin::update_tour))
        .route("/tours/{id}/bookings", get(admin::tour_bookings));

    let mut hotel_admin_routes = Router::new()
        .route("/bookings", get(admin::list_hotel_bookings))
        .route("/bookings/{id}/status", put(admin::review_hotel_booking));

    if rate_limits {
        if let Some(governor) = create_public_governor() {
            auth_routes = auth_routes.layer(governor);
        }
        if let Some(governor) = create_role_governor(RateLimitedRole::Customer) {
            account_routes = account_routes.layer(governor.clone());
            booking_routes = booking_routes.layer(governor);
        }
        if let Some(governor) = create_role_governor(RateLimitedRole::Staff) {
            tour_admin_routes = tour_admin_routes.layer(governor.clone());
            hotel_admin_routes = hotel_admin_routes.layer(governor);
        }
    }

    let account_routes =
        account_routes.layer(middleware::from_fn_with_state(state.clone(), auth_middleware));
    let booking_routes =
        booking_routes.layer(middleware::from_fn_with_state(state.clone(), auth_middleware));
    let tour_admin_routes = tour_admin_routes
        .layer(middleware::from_fn(require_tour_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));
    let hotel_admin_routes = hotel_admin_routes
        .layer(middleware::from_fn(require_hotel_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", public_routes)
        .nest("/api/account", account_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/tour-admin", tour_admin_routes)
        .nest("/api/hotel-admin", hotel_admin_routes)
        .with_state(state)
}
