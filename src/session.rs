//! Per-user navigation state: current page, selected tour or room, display
//! language and the tour listing filter.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::entities::room::RoomId;
use crate::entities::tour::TourId;
use crate::entities::user::UserId;
use crate::entities::Language;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Udmurtia,
    Tours,
    TourDetails,
    Hotel,
    RoomDetails,
    Attractions,
    Search,
    Profile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub current_page: Page,
    pub selected_tour_id: Option<TourId>,
    pub selected_room_id: Option<RoomId>,
    pub language: Language,
    pub tour_filter: Option<TourId>,
}

impl Session {
    /// A tour and a room are never selected at the same time; an id only
    /// sticks for the matching details page.
    pub fn navigate_to(&mut self, page: Page, id: Option<i64>) {
        self.current_page = page;
        match (page, id) {
            (Page::TourDetails, Some(id)) => {
                self.selected_tour_id = Some(id);
                self.selected_room_id = None;
            }
            (Page::RoomDetails, Some(id)) => {
                self.selected_room_id = Some(id);
                self.selected_tour_id = None;
            }
            _ => {
                self.selected_tour_id = None;
                self.selected_room_id = None;
            }
        }
    }

    pub fn change_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_tour_filter(&mut self, tour_id: Option<TourId>) {
        self.tour_filter = tour_id;
    }
}

pub type SharedSessions = Arc<RwLock<SessionRegistry>>;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<UserId, Session>,
}

impl SessionRegistry {
    pub fn get(&self, user_id: UserId) -> Session {
        self.sessions.get(&user_id).cloned().unwrap_or_default()
    }

    pub fn update(&mut self, user_id: UserId, apply: impl FnOnce(&mut Session)) -> Session {
        let session = self.sessions.entry(user_id).or_default();
        apply(session);
        session.clone()
    }

    /// Logout drops everything back to the landing page.
    pub fn end(&mut self, user_id: UserId) {
        self.sessions.remove(&user_id);
    }
}
