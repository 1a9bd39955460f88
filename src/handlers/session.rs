use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::entities::tour::{Tour, TourId};
use crate::entities::Language;
use crate::error::{AppResult, DomainError};
use crate::extract::ApiJson;
use crate::session::{Page, Session};
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub page: Page,
    pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: Language,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourFilterRequest {
    pub tour_id: Option<TourId>,
}

pub async fn get_session(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Json<Session> {
    Json(state.sessions.read().await.get(claims.sub))
}

pub async fn navigate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<NavigateRequest>,
) -> Json<Session> {
    let session = state
        .sessions
        .write()
        .await
        .update(claims.sub, |s| s.navigate_to(payload.page, payload.id));
    Json(session)
}

pub async fn change_language(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<LanguageRequest>,
) -> Json<Session> {
    let session = state
        .sessions
        .write()
        .await
        .update(claims.sub, |s| s.change_language(payload.language));
    Json(session)
}

/// Pin the tours page to one tour, or clear the pin with `null`
pub async fn set_tour_filter(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<TourFilterRequest>,
) -> AppResult<Json<Session>> {
    if let Some(tour_id) = payload.tour_id {
        state
            .store
            .read()
            .await
            .tour(tour_id)
            .ok_or(DomainError::TourNotFound(tour_id))?;
    }

    let session = state
        .sessions
        .write()
        .await
        .update(claims.sub, |s| s.set_tour_filter(payload.tour_id));
    Ok(Json(session))
}

/// Tours page as the caller currently sees it
pub async fn session_tours(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Json<Vec<Tour>> {
    let filter = state.sessions.read().await.get(claims.sub).tour_filter;
    let store = state.store.read().await;
    Json(store.tour_listing(filter).into_iter().cloned().collect())
}
