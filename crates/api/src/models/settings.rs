//! Singleton settings shapes: site settings, carousel slides, feature cards.

use serde::{Deserialize, Deserializer, Serialize};

use showcase_core::TextError;

use super::{Validate, ValidationError};

/// Contact details and page copy.
///
/// Every field is a string; unset fields read back as `""`. A `null` in a
/// request body is read the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub whatsapp: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub instagram: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub email: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub address: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub about_text: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub hero_title: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub hero_subtitle: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub footer_text: String,
}

fn empty_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One home page carousel slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSlide {
    pub image: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

/// Body of `PUT /settings/carousel`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselUpdate {
    pub slides: Vec<CarouselSlide>,
}

impl Validate for CarouselUpdate {
    fn validate(self) -> Result<Self, ValidationError> {
        if self.slides.iter().any(|slide| slide.image.trim().is_empty()) {
            return Err(TextError::Empty { field: "image" }.into());
        }
        Ok(self)
    }
}

fn default_icon() -> String {
    "✨".to_owned()
}

/// One about-section feature card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCard {
    #[serde(default = "default_icon")]
    pub icon: String,
    pub title: String,
    pub description: String,
}

impl FeatureCard {
    fn new(icon: &str, title: &str, description: &str) -> Self {
        Self {
            icon: icon.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
        }
    }
}

/// Body of `PUT /settings/features`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCardsUpdate {
    pub cards: Vec<FeatureCard>,
}

impl Validate for FeatureCardsUpdate {
    fn validate(self) -> Result<Self, ValidationError> {
        for card in &self.cards {
            if card.title.trim().is_empty() {
                return Err(TextError::Empty { field: "title" }.into());
            }
            if card.description.trim().is_empty() {
                return Err(TextError::Empty {
                    field: "description",
                }
                .into());
            }
        }
        Ok(self)
    }
}

/// Cards served until an admin stores their own.
#[must_use]
pub fn default_feature_cards() -> Vec<FeatureCard> {
    vec![
        FeatureCard::new(
            "🎨",
            "Handcrafted",
            "Every piece is made by hand with attention to detail",
        ),
        FeatureCard::new(
            "✨",
            "Unique Designs",
            "No two pieces are exactly alike - each is one of a kind",
        ),
        FeatureCard::new(
            "💎",
            "Premium Quality",
            "We use only the finest resin and materials",
        ),
        FeatureCard::new(
            "🎁",
            "Perfect Gifts",
            "Ideal for special occasions and loved ones",
        ),
        FeatureCard::new(
            "🌿",
            "Eco-Friendly",
            "We use sustainable and eco-conscious materials",
        ),
        FeatureCard::new(
            "💝",
            "Made with Love",
            "Each creation carries our passion and dedication",
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_site_settings_fill_missing_and_null() {
        let settings: SiteSettings =
            serde_json::from_value(json!({"email": "hi@example.com", "address": null})).unwrap();

        assert_eq!(settings.email, "hi@example.com");
        assert_eq!(settings.address, "");

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 8);
    }

    #[test]
    fn test_feature_card_icon_default() {
        let card: FeatureCard =
            serde_json::from_value(json!({"title": "T", "description": "D"})).unwrap();
        assert_eq!(card.icon, "✨");
    }

    #[test]
    fn test_default_cards_order() {
        let titles: Vec<_> = default_feature_cards()
            .into_iter()
            .map(|card| card.title)
            .collect();
        assert_eq!(
            titles,
            [
                "Handcrafted",
                "Unique Designs",
                "Premium Quality",
                "Perfect Gifts",
                "Eco-Friendly",
                "Made with Love",
            ]
        );
    }

    #[test]
    fn test_slide_requires_image() {
        let missing: Result<CarouselUpdate, _> =
            serde_json::from_value(json!({"slides": [{"title": "No image"}]}));
        assert!(missing.is_err());

        let blank: CarouselUpdate =
            serde_json::from_value(json!({"slides": [{"image": ""}]})).unwrap();
        assert!(blank.validate().is_err());
    }
}
