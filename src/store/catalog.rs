use chrono::NaiveDate;

use super::{next_id, DomainStore};
use crate::entities::attraction::Attraction;
use crate::entities::room::{Room, RoomType};
use crate::entities::tour::{Tour, TourId};
use crate::entities::user::UserId;
use crate::entities::{Language, LocalizedString};
use crate::error::DomainResult;

#[derive(Debug, Clone)]
pub struct NewAttraction {
    pub image_url: String,
    pub description: String,
    pub upload_date: NaiveDate,
    pub tour_id: Option<TourId>,
}

impl DomainStore {
    pub fn active_tours(&self) -> Vec<&Tour> {
        self.tours.iter().filter(|t| t.is_active()).collect()
    }

    /// Tours page: just the filtered tour when a filter is set, otherwise
    /// every active tour.
    pub fn tour_listing(&self, filter: Option<TourId>) -> Vec<&Tour> {
        match filter.and_then(|id| self.tour(id)) {
            Some(tour) => vec![tour],
            None => self.active_tours(),
        }
    }

    /// Case-insensitive substring match on name, description and start
    /// location in `lang`. Blank terms match nothing.
    pub fn search_tours(&self, term: &str, lang: Language) -> Vec<&Tour> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        let matches = |text: &LocalizedString| text.get(lang).to_lowercase().contains(&term);

        self.active_tours()
            .into_iter()
            .filter(|t| matches(&t.name) || matches(&t.description) || matches(&t.start_location))
            .collect()
    }

    pub fn tour_attractions(&self, tour_id: TourId) -> Vec<&Attraction> {
        self.attractions
            .iter()
            .filter(|a| a.tour_id == Some(tour_id))
            .collect()
    }

    pub fn rooms_with_types(&self) -> Vec<(&Room, Option<&RoomType>)> {
        self.rooms
            .iter()
            .map(|r| (r, self.room_type(r.room_type_id)))
            .collect()
    }

    /// New posts go to the front of the feed. The single description is
    /// used for both languages.
    pub fn add_attraction(&mut self, actor: Option<UserId>, new: NewAttraction) -> DomainResult<Attraction> {
        let user = self.authenticated(actor)?;

        let attraction = Attraction {
            id: next_id(&self.attractions, |a| a.id),
            user_id: user.id,
            user_email: user.email.clone(),
            image_url: new.image_url,
            description: LocalizedString::uniform(new.description),
            upload_date: new.upload_date,
            tour_id: new.tour_id,
        };
        self.attractions.insert(0, attraction.clone());
        self.changed();

        tracing::info!(attraction_id = attraction.id, user_id = attraction.user_id, "Attraction added");
        Ok(attraction)
    }
}
