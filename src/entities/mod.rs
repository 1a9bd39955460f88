pub mod attraction;
pub mod booking;
pub mod room;
pub mod tour;
pub mod user;

use serde::{Deserialize, Serialize};

/// Display language. Russian unless the visitor switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Ru,
}

/// Text carried in both supported languages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedString {
    pub en: String,
    pub ru: String,
}

impl LocalizedString {
    /// Same text for every language (user submissions are not translated).
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            en: text.clone(),
            ru: text,
        }
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Ru => &self.ru,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_lookup() {
        let s = LocalizedString {
            en: "Pond".to_string(),
            ru: "Пруд".to_string(),
        };
        assert_eq!(s.get(Language::En), "Pond");
        assert_eq!(s.get(Language::Ru), "Пруд");
        assert_eq!(Language::default(), Language::Ru);
    }

    #[test]
    fn test_uniform_copies_into_both_languages() {
        let s = LocalizedString::uniform("Sunset");
        assert_eq!(s.en, "Sunset");
        assert_eq!(s.ru, "Sunset");
    }
}
