//! Conversion of form-response CSV exports into catalog items.

use crate::error::Result;
use crate::models::Item;
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, info};
use url::Url;

/// Form question headers, keyed by the catalog field they fill.
/// `conferenceYear` has no column; it is derived from the timestamp.
pub const FORM_COLUMNS: [(&str, &str); 15] = [
    ("title", "Title of your badge"),
    ("author", "Your handle/name"),
    ("category", "Type of badge"),
    ("solderingDifficulty", "Soldering difficulty"),
    ("rarity", "Rarity"),
    ("quantityMade", "How many did you make?"),
    ("howToAcquire", "How do people get one?"),
    ("boardHouse", "PCB company used"),
    ("description", "Description"),
    ("specialInstructions", "Special instructions"),
    ("solderingInstructions", "Assembly and soldering instructions"),
    ("profilePictureUrl", "Your profile picture"),
    ("frontImageUrl", "Front image"),
    ("backImageUrl", "Back image"),
    ("timestamp", "Timestamp"),
];

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMATS: [&str; 1] = ["%m/%d/%Y"];

struct HeaderIndex(HashMap<String, usize>);

impl HeaderIndex {
    fn new(headers: &StringRecord) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.trim().to_string(), i))
                .collect(),
        )
    }

    /// Trimmed cell for a catalog field, "" when the column is absent.
    fn get<'r>(&self, record: &'r StringRecord, field: &str) -> &'r str {
        FORM_COLUMNS
            .iter()
            .find(|(key, _)| *key == field)
            .and_then(|(_, header)| self.0.get(*header))
            .and_then(|i| record.get(*i))
            .map(str::trim)
            .unwrap_or("")
    }
}

/// Read form responses. Rows without a title are skipped.
pub fn import_form_responses<R: Read>(reader: R) -> Result<Vec<Item>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = HeaderIndex::new(csv_reader.headers()?);

    let mut items = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let get = |field: &str| headers.get(&record, field).to_string();
        let optional = |field: &str| Some(get(field));
        let media = |field: &str| Some(google_drive_to_direct(&get(field)));

        let title = get("title");
        if title.is_empty() {
            debug!(row = row + 1, "skipping response without a title");
            continue;
        }

        let timestamp = get("timestamp");
        items.push(Item {
            title,
            author: get("author"),
            category: get("category"),
            conference_year: derive_year_from_timestamp(&timestamp),
            soldering_difficulty: get("solderingDifficulty"),
            quantity_made: get("quantityMade"),
            board_house: get("boardHouse"),
            description: get("description"),
            special_instructions: get("specialInstructions"),
            soldering_instructions: get("solderingInstructions"),
            how_to_acquire: get("howToAcquire"),
            timestamp,
            rarity: optional("rarity"),
            profile_picture_url: media("profilePictureUrl"),
            front_image_url: media("frontImageUrl"),
            back_image_url: media("backImageUrl"),
            extra: HashMap::new(),
        });
    }

    info!(items = items.len(), "form responses imported");
    Ok(items)
}

/// Year of a form timestamp as a string, or "" if no known format parses.
pub fn derive_year_from_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let from_datetime = TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date());
    let date = from_datetime.or_else(|| {
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    });

    date.map(|d| d.format("%Y").to_string()).unwrap_or_default()
}

/// Rewrite Google Drive share links to direct-download links. Anything else
/// is returned unchanged.
///
/// Handles `.../open?id=FILE` and `.../file/d/FILE/...`.
pub fn google_drive_to_direct(link: &str) -> String {
    if !link.contains("drive.google.com") {
        return link.to_string();
    }
    let Ok(parsed) = Url::parse(link) else {
        return link.to_string();
    };

    let from_query = parsed
        .query_pairs()
        .find(|(key, value)| key == "id" && !value.is_empty())
        .map(|(_, value)| value.into_owned());

    let from_path = || {
        let segments: Vec<&str> = parsed.path_segments()?.collect();
        if !segments.contains(&"file") {
            return None;
        }
        let d = segments.iter().position(|s| *s == "d")?;
        segments
            .get(d + 1)
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string())
    };

    match from_query.or_else(from_path) {
        Some(file_id) => format!("https://drive.google.com/uc?export=download&id={}", file_id),
        None => link.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RESPONSES: &str = "\
Timestamp,Title of your badge,Your handle/name,Type of badge,Soldering difficulty,Rarity,How many did you make?,Front image
11/02/2024 10:15:00,  Blinky  ,sparky,Game,Beginner,Common,25,https://drive.google.com/open?id=abc123
11/03/2024 09:00:00,,nobody,Tool,Advanced,,10,
2025-08-07 12:30,Soldering Iron,hotplate,Tool,Advanced,Rare,3 of 12 made,images/iron-front.png
";

    #[test]
    fn test_import_maps_columns_and_skips_untitled() {
        let items = import_form_responses(RESPONSES.as_bytes()).unwrap();

        assert_eq!(items.len(), 2);
        let blinky = &items[0];
        assert_eq!(blinky.title, "Blinky");
        assert_eq!(blinky.author, "sparky");
        assert_eq!(blinky.conference_year, "2024");
        assert_eq!(blinky.quantity_made, "25");
        assert_eq!(blinky.rarity.as_deref(), Some("Common"));
        assert_eq!(
            blinky.front_image_url.as_deref(),
            Some("https://drive.google.com/uc?export=download&id=abc123")
        );
        assert_eq!(blinky.board_house, "");
        assert_eq!(blinky.back_image_url(), crate::models::DEFAULT_BACK_IMAGE_URL);

        let iron = &items[1];
        assert_eq!(iron.conference_year, "2025");
        assert_eq!(iron.quantity_made, "3 of 12 made");
        assert_eq!(iron.front_image_url(), "images/iron-front.png");
    }

    #[rstest]
    #[case("11/02/2024 10:15:00", "2024")]
    #[case("11/02/2024 10:15", "2024")]
    #[case("2023-05-01 08:00:00", "2023")]
    #[case("2023-05-01 08:00", "2023")]
    #[case("12/31/2022", "2022")]
    #[case("last tuesday", "")]
    #[case("  ", "")]
    fn test_derive_year(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(derive_year_from_timestamp(raw), expected);
    }

    #[rstest]
    #[case(
        "https://drive.google.com/open?id=FILEID",
        "https://drive.google.com/uc?export=download&id=FILEID"
    )]
    #[case(
        "https://drive.google.com/file/d/FILEID/view?usp=sharing",
        "https://drive.google.com/uc?export=download&id=FILEID"
    )]
    #[case(
        "https://drive.google.com/drive/folders/xyz",
        "https://drive.google.com/drive/folders/xyz"
    )]
    #[case("https://example.com/front.png", "https://example.com/front.png")]
    #[case("", "")]
    fn test_google_drive_to_direct(#[case] link: &str, #[case] expected: &str) {
        assert_eq!(google_drive_to_direct(link), expected);
    }
}
