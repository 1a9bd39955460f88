use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::LocalizedString;
use super::user::UserId;

pub type TourId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourStatus {
    Active,
    Archived,
}

/// A stop on the tour route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPoint {
    pub id: i64,
    pub description: LocalizedString,
    pub photo_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: TourId,
    pub name: LocalizedString,
    pub start_location: LocalizedString,
    pub start_datetime: NaiveDateTime,
    pub duration_days: u32,
    pub total_seats: u32,
    pub age_restriction: u32,
    pub base_price: f64,
    pub description: LocalizedString,
    pub admin_id: UserId,
    #[serde(default)]
    pub points: Vec<TourPoint>,
    pub status: TourStatus,
}

impl Tour {
    pub fn is_active(&self) -> bool {
        self.status == TourStatus::Active
    }
}
