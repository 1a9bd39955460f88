//! Initial dataset: the JSON blob the site is seeded from.
//!
//! The dataset comes from `SEED_URL`, `SEED_FILE` or the bundled demo data,
//! in that order. A failed load is logged and the service starts with empty
//! collections; there is no retry.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::entities::attraction::Attraction;
use crate::entities::booking::{HotelBooking, TourBooking};
use crate::entities::room::{Room, RoomType};
use crate::entities::tour::Tour;
use crate::entities::user::User;

const BUILTIN_SEED: &str = include_str!("../../data/seed.json");

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub tours: Vec<Tour>,
    pub attractions: Vec<Attraction>,
    pub room_types: Vec<RoomType>,
    pub rooms: Vec<Room>,
    pub tour_bookings: Vec<TourBooking>,
    pub hotel_bookings: Vec<HotelBooking>,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to fetch seed data: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed seed data: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Dataset {
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_json(BUILTIN_SEED)
    }

    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub async fn fetch(url: &str) -> Result<Self, SeedError> {
        let dataset = reqwest::get(url)
            .await?
            .error_for_status()?
            .json::<Dataset>()
            .await?;
        Ok(dataset)
    }
}

/// Load the initial dataset according to `config`.
pub async fn load(config: &Config) -> Dataset {
    let (source, result) = if let Some(url) = &config.seed_url {
        (url.clone(), Dataset::fetch(url).await)
    } else if let Some(path) = &config.seed_file {
        (path.display().to_string(), Dataset::from_file(path))
    } else {
        ("builtin".to_string(), Dataset::builtin())
    };

    match result {
        Ok(dataset) => {
            tracing::info!(
                source = %source,
                users = dataset.users.len(),
                tours = dataset.tours.len(),
                rooms = dataset.rooms.len(),
                "Seed data loaded"
            );
            dataset
        }
        Err(e) => {
            tracing::error!(source = %source, error = %e, "Failed to load seed data, starting empty");
            Dataset::default()
        }
    }
}
