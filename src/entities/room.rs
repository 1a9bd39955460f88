use serde::{Deserialize, Serialize};

use super::{Language, LocalizedString};

pub type RoomId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomTypeName {
    Standard,
    Studio,
    Lux,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: i64,
    pub name: RoomTypeName,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub room_type_id: i64,
    pub price_per_night: f64,
    pub characteristics: LocalizedString,
    pub long_description: LocalizedString,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl Room {
    /// Characteristics are stored as one comma-separated line per language.
    pub fn characteristic_list(&self, lang: Language) -> Vec<String> {
        self.characteristics
            .get(lang)
            .split(", ")
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_characteristic_list_splits_on_comma() {
        let room = Room {
            id: 101,
            room_type_id: 1,
            price_per_night: 2500.0,
            characteristics: LocalizedString {
                en: "1 double bed, TV, Wi-Fi".to_string(),
                ru: "1 двуспальная кровать, ТВ".to_string(),
            },
            long_description: LocalizedString::default(),
            image_urls: vec![],
        };

        assert_eq!(
            room.characteristic_list(Language::En),
            vec!["1 double bed", "TV", "Wi-Fi"]
        );
        assert_eq!(room.characteristic_list(Language::Ru).len(), 2);
    }
}
