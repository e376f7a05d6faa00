use crate::error::{CatalogError, Result};
use crate::models::Item;
use crate::schema_validation::validate_catalog;
use crate::store::ItemStore;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load the items of one catalog JSON file.
///
/// The document is checked against the catalog schema before deserializing
/// so shape problems report every offending location at once.
pub fn load_items<P: AsRef<Path>>(path: P) -> Result<Vec<Item>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_catalog(&value).map_err(|errors| CatalogError::Schema {
        path: path.to_path_buf(),
        errors,
    })?;

    let items: Vec<Item> = serde_json::from_value(value).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), items = items.len(), "catalog file read");
    Ok(items)
}

/// Load every source into one store, tolerating individual failures.
pub fn load_store<P: AsRef<Path>>(paths: &[P]) -> Result<ItemStore> {
    ItemStore::from_sources(paths.iter().map(load_items))
}

/// Save items to a JSON file with pretty printing, creating parent
/// directories as needed.
pub fn save_items<P: AsRef<Path>>(items: &[Item], path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CatalogError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = serde_json::to_string_pretty(items)?;
    fs::write(path, json).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_items() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "badges.json",
            r#"[{"title": "A", "quantityMade": 12}, {"title": "B"}]"#,
        );

        let items = load_items(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity_made, "12");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = load_items(dir.path().join("nope.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.json", "[{\"title\": ");
        assert!(matches!(load_items(&path), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_wrong_shape_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "object.json", r#"{"title": "A"}"#);
        assert!(matches!(load_items(&path), Err(CatalogError::Schema { .. })));
    }

    #[test]
    fn test_load_store_skips_failed_source() {
        let dir = TempDir::new().unwrap();
        let good = write(&dir, "good.json", r#"[{"title": "A"}]"#);
        let missing = dir.path().join("missing.json");

        let store = load_store(&[missing, good]).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("badges.json");
        let items = vec![Item {
            title: "Saved".to_string(),
            rarity: Some("common".to_string()),
            ..Default::default()
        }];

        save_items(&items, &path).unwrap();
        assert_eq!(load_items(&path).unwrap(), items);
    }
}
