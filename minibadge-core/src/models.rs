use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PROFILE_PICTURE_URL: &str = "./cat.jpeg";
pub const DEFAULT_FRONT_IMAGE_URL: &str = "./front.png";
pub const DEFAULT_BACK_IMAGE_URL: &str = "./back.png";

/// One catalog entry.
///
/// Every text field deserializes leniently: absent fields and `null` become
/// empty strings, numbers and booleans become their textual form. A loaded
/// item is never mutated; the store only hands out shared references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub conference_year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub soldering_difficulty: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub quantity_made: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub board_house: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub special_instructions: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub soldering_instructions: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub how_to_acquire: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: String,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub rarity: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_picture_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub front_image_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub back_image_url: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Item {
    /// Raw value of a field; absent optional fields read as "".
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Category => &self.category,
            Field::ConferenceYear => &self.conference_year,
            Field::SolderingDifficulty => &self.soldering_difficulty,
            Field::QuantityMade => &self.quantity_made,
            Field::BoardHouse => &self.board_house,
            Field::Description => &self.description,
            Field::SpecialInstructions => &self.special_instructions,
            Field::SolderingInstructions => &self.soldering_instructions,
            Field::HowToAcquire => &self.how_to_acquire,
            Field::Timestamp => &self.timestamp,
            Field::Rarity => self.rarity.as_deref().unwrap_or(""),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::classify(&self.soldering_difficulty)
    }

    pub fn profile_picture_url(&self) -> &str {
        non_empty_or(&self.profile_picture_url, DEFAULT_PROFILE_PICTURE_URL)
    }

    pub fn front_image_url(&self) -> &str {
        non_empty_or(&self.front_image_url, DEFAULT_FRONT_IMAGE_URL)
    }

    pub fn back_image_url(&self) -> &str {
        non_empty_or(&self.back_image_url, DEFAULT_BACK_IMAGE_URL)
    }
}

fn non_empty_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

/// Named item attributes that can be searched, filtered or sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Author,
    Category,
    ConferenceYear,
    SolderingDifficulty,
    QuantityMade,
    BoardHouse,
    Description,
    SpecialInstructions,
    SolderingInstructions,
    HowToAcquire,
    Timestamp,
    Rarity,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Title,
        Field::Author,
        Field::Category,
        Field::ConferenceYear,
        Field::SolderingDifficulty,
        Field::QuantityMade,
        Field::BoardHouse,
        Field::Description,
        Field::SpecialInstructions,
        Field::SolderingInstructions,
        Field::HowToAcquire,
        Field::Timestamp,
        Field::Rarity,
    ];

    /// The JSON key for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Category => "category",
            Field::ConferenceYear => "conferenceYear",
            Field::SolderingDifficulty => "solderingDifficulty",
            Field::QuantityMade => "quantityMade",
            Field::BoardHouse => "boardHouse",
            Field::Description => "description",
            Field::SpecialInstructions => "specialInstructions",
            Field::SolderingInstructions => "solderingInstructions",
            Field::HowToAcquire => "howToAcquire",
            Field::Timestamp => "timestamp",
            Field::Rarity => "rarity",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts JSON keys case-insensitively, with or without the `item-`
    /// prefix used by the card markup, plus the `year` and `difficulty`
    /// facet names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let key = trimmed.strip_prefix("item-").unwrap_or(trimmed);

        match key.to_ascii_lowercase().as_str() {
            "year" => return Ok(Field::ConferenceYear),
            "difficulty" => return Ok(Field::SolderingDifficulty),
            "quantity" => return Ok(Field::QuantityMade),
            _ => {}
        }

        Field::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Soldering difficulty tiers. The enumeration is open: anything unrecognised
/// is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    PreSoldered,
    Beginner,
    Intermediate,
    Advanced,
    Torture,
    Other,
}

impl Difficulty {
    /// Case-insensitive classification of a raw difficulty value.
    pub fn classify(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "pre-soldered" | "presoldered" => Difficulty::PreSoldered,
            "beginner" => Difficulty::Beginner,
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            s if s.starts_with("torture") => Difficulty::Torture,
            _ => Difficulty::Other,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let item: Item = serde_json::from_value(json!({ "title": "Lonely" })).unwrap();

        assert_eq!(item.title, "Lonely");
        assert_eq!(item.field(Field::Author), "");
        assert_eq!(item.field(Field::Rarity), "");
        assert!(item.rarity.is_none());
    }

    #[test]
    fn test_numbers_and_nulls_are_lenient() {
        let item: Item = serde_json::from_value(json!({
            "title": "Counter",
            "quantityMade": 250,
            "conferenceYear": 2025,
            "author": null,
            "rarity": "rare"
        }))
        .unwrap();

        assert_eq!(item.quantity_made, "250");
        assert_eq!(item.conference_year, "2025");
        assert_eq!(item.author, "");
        assert_eq!(item.rarity.as_deref(), Some("rare"));
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let item: Item =
            serde_json::from_value(json!({ "title": "X", "badgeColor": "teal" })).unwrap();
        assert_eq!(item.extra.get("badgeColor"), Some(&json!("teal")));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["badgeColor"], json!("teal"));
    }

    #[test]
    fn test_media_fallbacks() {
        let item: Item = serde_json::from_value(json!({
            "title": "Pics",
            "frontImageUrl": "images/pics-front.jpg",
            "backImageUrl": "   "
        }))
        .unwrap();

        assert_eq!(item.front_image_url(), "images/pics-front.jpg");
        assert_eq!(item.back_image_url(), DEFAULT_BACK_IMAGE_URL);
        assert_eq!(item.profile_picture_url(), DEFAULT_PROFILE_PICTURE_URL);
    }

    #[rstest]
    #[case("title", Field::Title)]
    #[case("item-quantityMade", Field::QuantityMade)]
    #[case("QUANTITYMADE", Field::QuantityMade)]
    #[case("year", Field::ConferenceYear)]
    #[case("item-solderingDifficulty", Field::SolderingDifficulty)]
    #[case("difficulty", Field::SolderingDifficulty)]
    fn test_field_parsing(#[case] input: &str, #[case] expected: Field) {
        assert_eq!(input.parse::<Field>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert_eq!(
            "colour".parse::<Field>(),
            Err(UnknownField("colour".to_string()))
        );
    }

    #[rstest]
    #[case("Pre-Soldered", Difficulty::PreSoldered)]
    #[case(" beginner ", Difficulty::Beginner)]
    #[case("INTERMEDIATE", Difficulty::Intermediate)]
    #[case("Advanced", Difficulty::Advanced)]
    #[case("Torture", Difficulty::Torture)]
    #[case("torture (or equivalent)", Difficulty::Torture)]
    #[case("impossible", Difficulty::Other)]
    #[case("", Difficulty::Other)]
    fn test_difficulty_classification(#[case] raw: &str, #[case] expected: Difficulty) {
        assert_eq!(Difficulty::classify(raw), expected);
    }
}
