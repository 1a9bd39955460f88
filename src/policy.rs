//! Booking rules checked on the server before a booking changes.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::entities::booking::{HotelBooking, TourBooking, TourBookingStatus};
use crate::entities::tour::Tour;
use crate::error::{DomainError, DomainResult};

pub const DEFAULT_CANCELLATION_WINDOW_DAYS: i64 = 7;

/// Cancellation is allowed only while the start is more than `days` away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancellationPolicy {
    days: i64,
}

impl Default for CancellationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CANCELLATION_WINDOW_DAYS)
    }
}

impl CancellationPolicy {
    pub fn new(days: i64) -> Self {
        Self { days }
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    /// A window too large to represent keeps every booking locked.
    pub fn allows(&self, starts_at: NaiveDateTime, now: NaiveDateTime) -> bool {
        Duration::try_days(self.days)
            .and_then(|window| now.checked_add_signed(window))
            .is_some_and(|deadline| starts_at > deadline)
    }

    pub fn tour_cancellable(&self, booking: &TourBooking, tour: &Tour, now: NaiveDateTime) -> bool {
        booking.status == TourBookingStatus::Confirmed && self.allows(tour.start_datetime, now)
    }

    /// Check-in dates count from midnight.
    pub fn hotel_cancellable(&self, booking: &HotelBooking, now: NaiveDateTime) -> bool {
        booking.status.is_open()
            && self.allows(booking.check_in_date.and_time(NaiveTime::MIN), now)
    }

    pub fn check_tour(&self, booking: &TourBooking, tour: &Tour, now: NaiveDateTime) -> DomainResult<()> {
        if booking.status != TourBookingStatus::Confirmed {
            return Err(DomainError::InvalidStatusTransition {
                from: booking.status.as_str().to_string(),
                to: "cancelled".to_string(),
            });
        }
        if !self.allows(tour.start_datetime, now) {
            return Err(DomainError::CancellationWindowClosed { days: self.days });
        }
        Ok(())
    }

    pub fn check_hotel(&self, booking: &HotelBooking, now: NaiveDateTime) -> DomainResult<()> {
        if !booking.status.is_open() {
            return Err(DomainError::InvalidStatusTransition {
                from: booking.status.as_str().to_string(),
                to: "cancelled".to_string(),
            });
        }
        if !self.hotel_cancellable(booking, now) {
            return Err(DomainError::CancellationWindowClosed { days: self.days });
        }
        Ok(())
    }
}

/// Archived tours stay resolvable but cannot take new bookings.
pub fn ensure_bookable(tour: &Tour) -> DomainResult<()> {
    if tour.is_active() {
        Ok(())
    } else {
        Err(DomainError::TourArchived(tour.id))
    }
}
