use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::entities::booking::{
    BookingId, HotelBooking, HotelBookingStatus, TourBookingStatus,
};
use crate::entities::room::RoomTypeName;
use crate::entities::tour::{Tour, TourId, TourStatus};
use crate::entities::user::UserId;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::store::admin::TourUpdate;
use crate::utils::jwt::Claims;
use crate::AppState;

// ============ Tour Management ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourParticipant {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub final_price: f64,
    pub status: TourBookingStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTourRequest {
    pub base_price: Option<f64>,
    pub status: Option<TourStatus>,
}

/// Bookings on one of the caller's tours
pub async fn tour_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(tour_id): ApiPath<TourId>,
) -> AppResult<Json<Vec<TourParticipant>>> {
    let store = state.store.read().await;
    let bookings = store.bookings_for_tour(claims.sub, tour_id)?;

    let participants = bookings
        .into_iter()
        .map(|b| {
            let user = store.user(b.user_id);
            TourParticipant {
                booking_id: b.id,
                user_id: b.user_id,
                name: user
                    .map(|u| format!("{} {}", u.first_name, u.last_name))
                    .unwrap_or_default(),
                email: user.map(|u| u.email.clone()).unwrap_or_default(),
                final_price: b.final_price,
                status: b.status,
            }
        })
        .collect();

    Ok(Json(participants))
}

/// Reprice or archive one of the caller's tours
pub async fn update_tour(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(tour_id): ApiPath<TourId>,
    ApiJson(payload): ApiJson<UpdateTourRequest>,
) -> AppResult<Json<Tour>> {
    if let Some(price) = payload.base_price {
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::Validation(
                "Base price must be a non-negative number".to_string(),
            ));
        }
    }

    let tour = state.store.write().await.update_tour(
        claims.sub,
        tour_id,
        TourUpdate {
            base_price: payload.base_price,
            status: payload.status,
        },
    )?;

    Ok(Json(tour))
}

// ============ Hotel Booking Review ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRequestInfo {
    #[serde(flatten)]
    pub booking: HotelBooking,
    pub guest_email: String,
    pub room_type: Option<RoomTypeName>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub status: HotelBookingStatus,
}

/// All hotel bookings
pub async fn list_hotel_bookings(State(state): State<AppState>) -> Json<Vec<HotelRequestInfo>> {
    let store = state.store.read().await;

    let requests = store
        .hotel_bookings()
        .iter()
        .map(|b| HotelRequestInfo {
            booking: b.clone(),
            guest_email: store
                .user(b.user_id)
                .map(|u| u.email.clone())
                .unwrap_or_default(),
            room_type: store
                .room(b.room_id)
                .and_then(|r| store.room_type(r.room_type_id))
                .map(|rt| rt.name),
        })
        .collect();

    Json(requests)
}

/// Approve or reject a pending request
pub async fn review_hotel_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(booking_id): ApiPath<BookingId>,
    ApiJson(payload): ApiJson<ReviewRequest>,
) -> AppResult<Json<HotelBooking>> {
    let booking = state
        .store
        .write()
        .await
        .review_hotel_booking(booking_id, payload.status)?;

    tracing::debug!(booking_id, reviewer = claims.sub, "Hotel request reviewed");
    Ok(Json(booking))
}
