use chrono::NaiveDate;

use super::{next_id, DomainStore};
use crate::entities::booking::{HotelBooking, TourBooking};
use crate::entities::room::{Room, RoomType};
use crate::entities::tour::Tour;
use crate::entities::user::{User, UserId, UserRole};
use crate::error::{DomainError, DomainResult};
use crate::utils::password::verify_password;

/// Registration input. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub patronymic: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub patronymic: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl DomainStore {
    pub fn email_taken(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.email == email)
    }

    /// Emails compare exactly, case included. New accounts always get the
    /// `user` role.
    pub fn register(&mut self, new_user: NewUser) -> DomainResult<User> {
        if self.email_taken(&new_user.email) {
            return Err(DomainError::EmailExists);
        }

        let user = User {
            id: next_id(&self.users, |u| u.id),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            patronymic: new_user.patronymic,
            email: new_user.email,
            password_hash: new_user.password_hash,
            birth_date: new_user.birth_date,
            role: UserRole::User,
        };
        self.users.push(user.clone());
        self.changed();

        tracing::info!(user_id = user.id, email = %user.email, "User registered");
        Ok(user)
    }

    /// Id and stored hash for `email`. Callers verify the password after
    /// releasing the store.
    pub fn credentials(&self, email: &str) -> Option<(UserId, String)> {
        self.users
            .iter()
            .find(|u| u.email == email)
            .map(|u| (u.id, u.password_hash.clone()))
    }

    pub fn login(&self, email: &str, password: &str) -> DomainResult<&User> {
        self.users
            .iter()
            .find(|u| u.email == email)
            .filter(|u| verify_password(password, &u.password_hash))
            .ok_or(DomainError::InvalidCredentials)
    }

    /// Email, role and credentials are not editable here.
    pub fn update_profile(&mut self, actor: Option<UserId>, update: ProfileUpdate) -> DomainResult<User> {
        let user_id = self.authenticated(actor)?.id;
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(DomainError::NotAuthenticated)?;

        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(patronymic) = update.patronymic {
            user.patronymic = Some(patronymic).filter(|p| !p.is_empty());
        }
        if let Some(birth_date) = update.birth_date {
            user.birth_date = birth_date;
        }

        let user = user.clone();
        self.changed();
        Ok(user)
    }

    /// The user's tour bookings, latest tour start first. Bookings whose
    /// tour is gone are skipped.
    pub fn tour_history(&self, user_id: UserId) -> Vec<(&TourBooking, &Tour)> {
        let mut history: Vec<_> = self
            .tour_bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter_map(|b| self.tour(b.tour_id).map(|t| (b, t)))
            .collect();
        history.sort_by(|a, b| b.1.start_datetime.cmp(&a.1.start_datetime));
        history
    }

    /// The user's hotel bookings, latest check-in first.
    pub fn hotel_history(&self, user_id: UserId) -> Vec<(&HotelBooking, &Room, Option<&RoomType>)> {
        let mut history: Vec<_> = self
            .hotel_bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter_map(|b| {
                self.room(b.room_id)
                    .map(|r| (b, r, self.room_type(r.room_type_id)))
            })
            .collect();
        history.sort_by(|a, b| b.0.check_in_date.cmp(&a.0.check_in_date));
        history
    }
}
