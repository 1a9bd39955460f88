use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::entities::attraction::Attraction;
use crate::entities::room::{Room, RoomId, RoomType, RoomTypeName};
use crate::entities::tour::{Tour, TourId};
use crate::entities::Language;
use crate::error::{AppResult, DomainError};
use crate::extract::{ApiPath, ApiQuery};
use crate::store::Snapshot;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    pub lang: Option<Language>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub lang: Option<Language>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDetailsResponse {
    #[serde(flatten)]
    pub tour: Tour,
    pub attractions: Vec<Attraction>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCard {
    #[serde(flatten)]
    pub room: Room,
    pub room_type: Option<RoomTypeName>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailsResponse {
    #[serde(flatten)]
    pub room: Room,
    pub room_type: Option<RoomTypeName>,
    pub characteristic_list: Vec<String>,
}

/// Full dataset, the shape the site is seeded from
pub async fn get_data(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.store.read().await.snapshot())
}

/// List active tours
pub async fn list_tours(State(state): State<AppState>) -> Json<Vec<Tour>> {
    let store = state.store.read().await;
    Json(store.active_tours().into_iter().cloned().collect())
}

/// Search active tours by name, description or start location
pub async fn search_tours(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Json<Vec<Tour>> {
    let store = state.store.read().await;
    let lang = query.lang.unwrap_or_default();
    Json(store.search_tours(&query.q, lang).into_iter().cloned().collect())
}

/// Tour details, archived tours included
pub async fn get_tour(
    State(state): State<AppState>,
    ApiPath(tour_id): ApiPath<TourId>,
) -> AppResult<Json<TourDetailsResponse>> {
    let store = state.store.read().await;
    let tour = store
        .tour(tour_id)
        .ok_or(DomainError::TourNotFound(tour_id))?
        .clone();
    let attractions = store.tour_attractions(tour_id).into_iter().cloned().collect();

    Ok(Json(TourDetailsResponse { tour, attractions }))
}

pub async fn list_rooms(State(state): State<AppState>) -> Json<Vec<RoomCard>> {
    let store = state.store.read().await;
    let cards = store
        .rooms_with_types()
        .into_iter()
        .map(|(room, room_type)| RoomCard {
            room: room.clone(),
            room_type: room_type.map(|rt| rt.name),
        })
        .collect();

    Json(cards)
}

pub async fn get_room(
    State(state): State<AppState>,
    ApiPath(room_id): ApiPath<RoomId>,
    ApiQuery(query): ApiQuery<LanguageQuery>,
) -> AppResult<Json<RoomDetailsResponse>> {
    let store = state.store.read().await;
    let room = store.room(room_id).ok_or(DomainError::RoomNotFound(room_id))?;

    Ok(Json(RoomDetailsResponse {
        characteristic_list: room.characteristic_list(query.lang.unwrap_or_default()),
        room_type: store.room_type(room.room_type_id).map(|rt| rt.name),
        room: room.clone(),
    }))
}

pub async fn list_room_types(State(state): State<AppState>) -> Json<Vec<RoomType>> {
    Json(state.store.read().await.room_types().to_vec())
}

/// Attraction feed, newest first
pub async fn list_attractions(State(state): State<AppState>) -> Json<Vec<Attraction>> {
    Json(state.store.read().await.attractions().to_vec())
}
