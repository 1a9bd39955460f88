use axum::{extract::State, Extension, Json};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::booking::{HotelBooking, TourBooking};
use crate::entities::room::RoomTypeName;
use crate::entities::LocalizedString;
use crate::error::{AppError, AppResult, DomainError};
use crate::extract::ApiJson;
use crate::handlers::auth::UserInfo;
use crate::store::account::ProfileUpdate;
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourBookingEntry {
    #[serde(flatten)]
    pub booking: TourBooking,
    pub tour_name: LocalizedString,
    pub start_datetime: NaiveDateTime,
    pub tour_archived: bool,
    pub cancellable: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelBookingEntry {
    #[serde(flatten)]
    pub booking: HotelBooking,
    pub room_type: Option<RoomTypeName>,
    pub price_per_night: f64,
    pub cancellable: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: UserInfo,
    pub tour_bookings: Vec<TourBookingEntry>,
    pub hotel_bookings: Vec<HotelBookingEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub patronymic: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Profile with the caller's booking history
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<ProfileResponse>> {
    let policy = state.cancellation_policy();
    let now = Utc::now().naive_utc();
    let store = state.store.read().await;

    let user = store.user(claims.sub).ok_or(DomainError::NotAuthenticated)?;

    let tour_bookings = store
        .tour_history(user.id)
        .into_iter()
        .map(|(booking, tour)| TourBookingEntry {
            booking: booking.clone(),
            tour_name: tour.name.clone(),
            start_datetime: tour.start_datetime,
            tour_archived: !tour.is_active(),
            cancellable: policy.tour_cancellable(booking, tour, now),
        })
        .collect();

    let hotel_bookings = store
        .hotel_history(user.id)
        .into_iter()
        .map(|(booking, room, room_type)| HotelBookingEntry {
            booking: booking.clone(),
            room_type: room_type.map(|rt| rt.name),
            price_per_night: room.price_per_night,
            cancellable: policy.hotel_cancellable(booking, now),
        })
        .collect();

    Ok(Json(ProfileResponse {
        user: UserInfo::from(user),
        tour_bookings,
        hotel_bookings,
    }))
}

/// Edit name and birth date
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> AppResult<Json<UserInfo>> {
    let blank = |v: &Option<String>| v.as_ref().is_some_and(|s| s.trim().is_empty());
    if blank(&payload.first_name) || blank(&payload.last_name) {
        return Err(AppError::Validation("Name fields cannot be empty".to_string()));
    }

    let user = state.store.write().await.update_profile(
        Some(claims.sub),
        ProfileUpdate {
            first_name: payload.first_name,
            last_name: payload.last_name,
            patronymic: payload.patronymic,
            birth_date: payload.birth_date,
        },
    )?;

    Ok(Json(UserInfo::from(&user)))
}
