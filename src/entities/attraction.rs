use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LocalizedString;
use super::tour::TourId;
use super::user::UserId;

/// A photo post submitted by a user, optionally tied to a tour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub id: i64,
    pub user_id: UserId,
    pub user_email: String,
    pub image_url: String,
    pub description: LocalizedString,
    pub upload_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour_id: Option<TourId>,
}
