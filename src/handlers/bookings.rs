use axum::{extract::State, Extension, Json};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::entities::booking::{BookingId, HotelBooking, TourBooking};
use crate::entities::room::RoomId;
use crate::entities::tour::TourId;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTourRequest {
    pub tour_id: TourId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelBookingRequest {
    pub room_id: RoomId,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
}

// ============ Tours ============

/// Book a tour at its current price
pub async fn book_tour(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<BookTourRequest>,
) -> AppResult<Json<TourBooking>> {
    let booking = state
        .store
        .write()
        .await
        .book_tour_checked(Some(claims.sub), payload.tour_id)?;

    Ok(Json(booking))
}

/// Cancel one of the caller's tour bookings
pub async fn cancel_tour_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(booking_id): ApiPath<BookingId>,
) -> AppResult<Json<TourBooking>> {
    let policy = state.cancellation_policy();
    let now = Utc::now().naive_utc();

    let booking = state
        .store
        .write()
        .await
        .cancel_own_tour_booking(Some(claims.sub), booking_id, &policy, now)?;

    Ok(Json(booking))
}

// ============ Hotel ============

/// Request a room; the booking starts out pending
pub async fn request_hotel_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<HotelBookingRequest>,
) -> AppResult<Json<HotelBooking>> {
    let (Some(check_in), Some(check_out)) = (payload.check_in_date, payload.check_out_date) else {
        return Err(AppError::Validation(
            "Please fill in all required fields".to_string(),
        ));
    };

    let booking = state.store.write().await.add_hotel_booking_checked(
        Some(claims.sub),
        payload.room_id,
        check_in,
        check_out,
    )?;

    Ok(Json(booking))
}

/// Cancel one of the caller's hotel bookings
pub async fn cancel_hotel_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(booking_id): ApiPath<BookingId>,
) -> AppResult<Json<HotelBooking>> {
    let policy = state.cancellation_policy();
    let now = Utc::now().naive_utc();

    let booking = state
        .store
        .write()
        .await
        .cancel_own_hotel_booking(Some(claims.sub), booking_id, &policy, now)?;

    Ok(Json(booking))
}
