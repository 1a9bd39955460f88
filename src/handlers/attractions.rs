use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::Deserialize;

use crate::entities::attraction::Attraction;
use crate::entities::tour::TourId;
use crate::error::{AppError, AppResult, DomainError};
use crate::extract::ApiJson;
use crate::store::catalog::NewAttraction;
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAttractionRequest {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    pub tour_id: Option<TourId>,
}

/// Post a photo to the attraction feed
pub async fn add_attraction(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<AddAttractionRequest>,
) -> AppResult<Json<Attraction>> {
    if payload.image_url.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide an image and a description".to_string(),
        ));
    }

    let mut store = state.store.write().await;

    if let Some(tour_id) = payload.tour_id {
        store.tour(tour_id).ok_or(DomainError::TourNotFound(tour_id))?;
    }

    let attraction = store.add_attraction(
        Some(claims.sub),
        NewAttraction {
            image_url: payload.image_url,
            description: payload.description,
            upload_date: Utc::now().date_naive(),
            tour_id: payload.tour_id,
        },
    )?;

    Ok(Json(attraction))
}
