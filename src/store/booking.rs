//! Tour and hotel booking transitions.
//!
//! The plain operations (`book_tour`, `cancel_tour_booking`,
//! `add_hotel_booking`, `cancel_hotel_booking`) keep their minimal contracts:
//! duplicate-confirmed check only, unconditional idempotent cancellation.
//! Request handlers go through the `*_checked` / `*_own_*` variants, which add
//! bookability, ownership and cancellation-window rules on top.

use chrono::{NaiveDate, NaiveDateTime};

use super::{next_id, DomainStore};
use crate::entities::booking::{
    BookingId, HotelBooking, HotelBookingStatus, TourBooking, TourBookingStatus,
};
use crate::entities::room::RoomId;
use crate::entities::tour::TourId;
use crate::entities::user::UserId;
use crate::error::{DomainError, DomainResult};
use crate::policy::{ensure_bookable, CancellationPolicy};

impl DomainStore {
    fn has_confirmed_booking(&self, user_id: UserId, tour_id: TourId) -> bool {
        self.tour_bookings.iter().any(|b| {
            b.user_id == user_id && b.tour_id == tour_id && b.status == TourBookingStatus::Confirmed
        })
    }

    /// Book a tour at its current base price.
    pub fn book_tour(&mut self, actor: Option<UserId>, tour_id: TourId) -> DomainResult<TourBooking> {
        let user_id = self.authenticated(actor)?.id;
        let final_price = self
            .tour(tour_id)
            .ok_or(DomainError::TourNotFound(tour_id))?
            .base_price;

        if self.has_confirmed_booking(user_id, tour_id) {
            return Err(DomainError::AlreadyBooked);
        }

        let booking = TourBooking {
            id: next_id(&self.tour_bookings, |b| b.id),
            user_id,
            tour_id,
            final_price,
            status: TourBookingStatus::Confirmed,
        };
        self.tour_bookings.push(booking.clone());
        self.changed();

        tracing::info!(booking_id = booking.id, user_id, tour_id, final_price, "Tour booked");
        Ok(booking)
    }

    /// Mark a tour booking cancelled. Unknown ids are ignored.
    pub fn cancel_tour_booking(&mut self, booking_id: BookingId) {
        if let Some(booking) = self.tour_bookings.iter_mut().find(|b| b.id == booking_id) {
            booking.status = TourBookingStatus::Cancelled;
            self.changed();
            tracing::info!(booking_id, "Tour booking cancelled");
        }
    }

    /// Record a hotel request as pending. Dates are taken as given.
    pub fn add_hotel_booking(
        &mut self,
        actor: Option<UserId>,
        room_id: RoomId,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
    ) -> DomainResult<HotelBooking> {
        let user_id = self.authenticated(actor)?.id;

        let booking = HotelBooking {
            id: next_id(&self.hotel_bookings, |b| b.id),
            user_id,
            room_id,
            check_in_date,
            check_out_date,
            status: HotelBookingStatus::Pending,
        };
        self.hotel_bookings.push(booking.clone());
        self.changed();

        tracing::info!(booking_id = booking.id, user_id, room_id, "Hotel booking requested");
        Ok(booking)
    }

    /// Mark a hotel booking cancelled. Unknown ids are ignored.
    pub fn cancel_hotel_booking(&mut self, booking_id: BookingId) {
        if let Some(booking) = self.hotel_bookings.iter_mut().find(|b| b.id == booking_id) {
            booking.status = HotelBookingStatus::Cancelled;
            self.changed();
            tracing::info!(booking_id, "Hotel booking cancelled");
        }
    }

    pub fn book_tour_checked(
        &mut self,
        actor: Option<UserId>,
        tour_id: TourId,
    ) -> DomainResult<TourBooking> {
        self.authenticated(actor)?;
        let tour = self.tour(tour_id).ok_or(DomainError::TourNotFound(tour_id))?;
        ensure_bookable(tour)?;
        self.book_tour(actor, tour_id)
    }

    pub fn add_hotel_booking_checked(
        &mut self,
        actor: Option<UserId>,
        room_id: RoomId,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
    ) -> DomainResult<HotelBooking> {
        self.authenticated(actor)?;
        if self.room(room_id).is_none() {
            return Err(DomainError::RoomNotFound(room_id));
        }
        if check_in_date >= check_out_date {
            return Err(DomainError::InvalidDateRange);
        }
        self.add_hotel_booking(actor, room_id, check_in_date, check_out_date)
    }

    /// Cancel the caller's own confirmed tour booking while the window is open.
    pub fn cancel_own_tour_booking(
        &mut self,
        actor: Option<UserId>,
        booking_id: BookingId,
        policy: &CancellationPolicy,
        now: NaiveDateTime,
    ) -> DomainResult<TourBooking> {
        let user_id = self.authenticated(actor)?.id;
        let booking = self
            .tour_booking(booking_id)
            .ok_or(DomainError::BookingNotFound(booking_id))?;
        if booking.user_id != user_id {
            return Err(DomainError::NotBookingOwner);
        }
        let tour = self
            .tour(booking.tour_id)
            .ok_or(DomainError::TourNotFound(booking.tour_id))?;
        policy.check_tour(booking, tour, now)?;

        self.cancel_tour_booking(booking_id);
        self.tour_booking(booking_id)
            .cloned()
            .ok_or(DomainError::BookingNotFound(booking_id))
    }

    /// Cancel the caller's own pending or approved hotel booking while the
    /// window is open.
    pub fn cancel_own_hotel_booking(
        &mut self,
        actor: Option<UserId>,
        booking_id: BookingId,
        policy: &CancellationPolicy,
        now: NaiveDateTime,
    ) -> DomainResult<HotelBooking> {
        let user_id = self.authenticated(actor)?.id;
        let booking = self
            .hotel_booking(booking_id)
            .ok_or(DomainError::BookingNotFound(booking_id))?;
        if booking.user_id != user_id {
            return Err(DomainError::NotBookingOwner);
        }
        policy.check_hotel(booking, now)?;

        self.cancel_hotel_booking(booking_id);
        self.hotel_booking(booking_id)
            .cloned()
            .ok_or(DomainError::BookingNotFound(booking_id))
    }
}
