use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::room::RoomId;
use super::tour::TourId;
use super::user::UserId;

pub type BookingId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourBookingStatus {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotelBookingStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl TourBookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TourBookingStatus::Confirmed => "confirmed",
            TourBookingStatus::Cancelled => "cancelled",
        }
    }
}

impl HotelBookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelBookingStatus::Pending => "pending",
            HotelBookingStatus::Approved => "approved",
            HotelBookingStatus::Rejected => "rejected",
            HotelBookingStatus::Cancelled => "cancelled",
        }
    }

    /// Pending and approved requests still hold the room.
    pub fn is_open(self) -> bool {
        matches!(self, HotelBookingStatus::Pending | HotelBookingStatus::Approved)
    }
}

/// `final_price` is the tour's base price at the moment of booking and is
/// never recalculated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourBooking {
    pub id: BookingId,
    pub user_id: UserId,
    pub tour_id: TourId,
    pub final_price: f64,
    pub status: TourBookingStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelBooking {
    pub id: BookingId,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: HotelBookingStatus,
}
