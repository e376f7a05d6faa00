use minibadge_core::CatalogError;
use std::io::ErrorKind;

/// Map catalog loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_catalog_load_error(error: &CatalogError) -> (String, String, String) {
    match error {
        CatalogError::Io { path, source } if source.kind() == ErrorKind::NotFound => (
            "File Not Found".to_string(),
            "The catalog file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists or set MINIBADGE_JSON.",
                path.display()
            ),
        ),
        CatalogError::Io { path, source } if source.kind() == ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        ),
        CatalogError::Parse { path, source } => (
            "Invalid JSON".to_string(),
            "The catalog file is not valid JSON.".to_string(),
            format!("{}: line {}, column {}", path.display(), source.line(), source.column()),
        ),
        CatalogError::Schema { path, errors } => (
            "Validation Error".to_string(),
            "The catalog file has validation errors.".to_string(),
            format!("{}\n{}", path.display(), errors.join("\n")),
        ),
        CatalogError::AllSourcesFailed(count) => (
            "Error Loading Catalog".to_string(),
            "None of the catalog files could be loaded.".to_string(),
            format!("{} sources failed; run with --verbose to see each error.", count),
        ),
        other => (
            "Error Loading Catalog".to_string(),
            "Failed to load minibadge data.".to_string(),
            other.to_string(),
        ),
    }
}
