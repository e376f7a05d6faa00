use once_cell::sync::Lazy;
use serde_json::{json, Value};

const TEXT_FIELDS: [&str; 16] = [
    "title",
    "author",
    "category",
    "conferenceYear",
    "solderingDifficulty",
    "quantityMade",
    "boardHouse",
    "description",
    "specialInstructions",
    "solderingInstructions",
    "howToAcquire",
    "timestamp",
    "rarity",
    "profilePictureUrl",
    "frontImageUrl",
    "backImageUrl",
];

/// JSON Schema for a catalog document: an array of objects whose known keys
/// hold scalars. Unknown keys are allowed.
pub static CATALOG_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let properties: serde_json::Map<String, Value> = TEXT_FIELDS
        .iter()
        .map(|key| {
            (
                key.to_string(),
                json!({ "type": ["string", "number", "boolean", "null"] }),
            )
        })
        .collect();

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Minibadge catalog",
        "type": "array",
        "items": {
            "type": "object",
            "properties": properties
        }
    })
});

/// Validate data against JSON Schema
/// Returns Ok(()) if valid, Err with every validation error if invalid
pub fn validate_against_schema(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let compiled = jsonschema::validator_for(schema)
        .map_err(|e| vec![format!("Schema compilation error: {}", e)])?;

    let errors: Vec<String> = compiled
        .iter_errors(data)
        .map(|error| {
            let path_str = error.instance_path.to_string();
            let location = if path_str.is_empty() {
                "root".to_string()
            } else {
                path_str
            };
            format!("{} at {}", error, location)
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a raw catalog document.
pub fn validate_catalog(data: &Value) -> Result<(), Vec<String>> {
    validate_against_schema(&CATALOG_SCHEMA, data)
}
