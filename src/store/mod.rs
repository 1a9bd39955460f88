//! In-memory domain store.
//!
//! Holds every entity collection and exposes the mutation operations that
//! are the only write path. Ids are allocated as `max(existing) + 1`, so
//! mutations must hold the write half of [`SharedStore`].

pub mod account;
pub mod admin;
pub mod booking;
pub mod catalog;

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::entities::attraction::Attraction;
use crate::entities::booking::{BookingId, HotelBooking, TourBooking};
use crate::entities::room::{Room, RoomId, RoomType};
use crate::entities::tour::{Tour, TourId};
use crate::entities::user::{User, UserId};
use crate::error::{AppResult, DomainError, DomainResult};
use crate::seed::Dataset;
use crate::utils::password::{hash_password, is_password_hash};

pub type SharedStore = Arc<RwLock<DomainStore>>;

#[derive(Debug, Default)]
pub struct DomainStore {
    users: Vec<User>,
    tours: Vec<Tour>,
    attractions: Vec<Attraction>,
    room_types: Vec<RoomType>,
    rooms: Vec<Room>,
    tour_bookings: Vec<TourBooking>,
    hotel_bookings: Vec<HotelBooking>,
    version: u64,
}

/// Public view of the store. `version` increases on every mutation.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub version: u64,
    #[serde(flatten)]
    pub data: Dataset,
}

impl DomainStore {
    /// Build the store from a seed. Plaintext demo credentials are hashed
    /// on the way in; users without a password cannot log in.
    pub fn from_dataset(dataset: Dataset) -> AppResult<Self> {
        let Dataset {
            mut users,
            tours,
            attractions,
            room_types,
            rooms,
            tour_bookings,
            hotel_bookings,
        } = dataset;

        for user in users.iter_mut() {
            if !user.password_hash.is_empty() && !is_password_hash(&user.password_hash) {
                user.password_hash = hash_password(&user.password_hash)?;
            }
        }

        Ok(Self {
            users,
            tours,
            attractions,
            room_types,
            rooms,
            tour_bookings,
            hotel_bookings,
            version: 0,
        })
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            data: Dataset {
                users: self.users.clone(),
                tours: self.tours.clone(),
                attractions: self.attractions.clone(),
                room_types: self.room_types.clone(),
                rooms: self.rooms.clone(),
                tour_bookings: self.tour_bookings.clone(),
                hotel_bookings: self.hotel_bookings.clone(),
            },
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }

    pub fn room_types(&self) -> &[RoomType] {
        &self.room_types
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn tour_bookings(&self) -> &[TourBooking] {
        &self.tour_bookings
    }

    pub fn hotel_bookings(&self) -> &[HotelBooking] {
        &self.hotel_bookings
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn tour(&self, id: TourId) -> Option<&Tour> {
        self.tours.iter().find(|t| t.id == id)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_type(&self, id: i64) -> Option<&RoomType> {
        self.room_types.iter().find(|rt| rt.id == id)
    }

    pub fn tour_booking(&self, id: BookingId) -> Option<&TourBooking> {
        self.tour_bookings.iter().find(|b| b.id == id)
    }

    pub fn hotel_booking(&self, id: BookingId) -> Option<&HotelBooking> {
        self.hotel_bookings.iter().find(|b| b.id == id)
    }

    /// Resolve the acting user. A token for a user the store no longer knows
    /// counts as unauthenticated.
    fn authenticated(&self, actor: Option<UserId>) -> DomainResult<&User> {
        actor
            .and_then(|id| self.user(id))
            .ok_or(DomainError::NotAuthenticated)
    }

    fn changed(&mut self) {
        self.version += 1;
    }
}

fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> i64) -> i64 {
    items.iter().map(id_of).max().unwrap_or(0) + 1
}
