//! Staff operations: tour admins manage their own tours, hotel admins
//! review pending room requests.

use super::DomainStore;
use crate::entities::booking::{BookingId, HotelBooking, HotelBookingStatus, TourBooking};
use crate::entities::tour::{Tour, TourId, TourStatus};
use crate::entities::user::UserId;
use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Default)]
pub struct TourUpdate {
    pub base_price: Option<f64>,
    pub status: Option<TourStatus>,
}

impl DomainStore {
    fn administered_tour(&self, admin_id: UserId, tour_id: TourId) -> DomainResult<&Tour> {
        let tour = self.tour(tour_id).ok_or(DomainError::TourNotFound(tour_id))?;
        if tour.admin_id != admin_id {
            return Err(DomainError::NotTourAdmin(tour_id));
        }
        Ok(tour)
    }

    pub fn bookings_for_tour(&self, admin_id: UserId, tour_id: TourId) -> DomainResult<Vec<&TourBooking>> {
        self.administered_tour(admin_id, tour_id)?;
        Ok(self
            .tour_bookings
            .iter()
            .filter(|b| b.tour_id == tour_id)
            .collect())
    }

    /// Existing bookings keep the price they were made at.
    pub fn update_tour(&mut self, admin_id: UserId, tour_id: TourId, update: TourUpdate) -> DomainResult<Tour> {
        self.administered_tour(admin_id, tour_id)?;
        let tour = self
            .tours
            .iter_mut()
            .find(|t| t.id == tour_id)
            .ok_or(DomainError::TourNotFound(tour_id))?;

        if let Some(price) = update.base_price {
            tour.base_price = price;
        }
        if let Some(status) = update.status {
            tour.status = status;
        }

        let tour = tour.clone();
        self.changed();
        tracing::info!(tour_id, admin_id, base_price = tour.base_price, status = ?tour.status, "Tour updated");
        Ok(tour)
    }

    /// Approve or reject a pending request. Nothing else is a valid review.
    pub fn review_hotel_booking(
        &mut self,
        booking_id: BookingId,
        decision: HotelBookingStatus,
    ) -> DomainResult<HotelBooking> {
        let booking = self
            .hotel_bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or(DomainError::BookingNotFound(booking_id))?;

        let valid_decision = matches!(
            decision,
            HotelBookingStatus::Approved | HotelBookingStatus::Rejected
        );
        if booking.status != HotelBookingStatus::Pending || !valid_decision {
            return Err(DomainError::InvalidStatusTransition {
                from: booking.status.as_str().to_string(),
                to: decision.as_str().to_string(),
            });
        }

        booking.status = decision;
        let booking = booking.clone();
        self.changed();
        tracing::info!(booking_id, status = decision.as_str(), "Hotel booking reviewed");
        Ok(booking)
    }
}
