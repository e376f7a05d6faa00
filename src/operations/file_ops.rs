use anyhow::{Context, Result};
use colored::Colorize;
use minibadge_core::{import_form_responses, load_store, save_items, CatalogError, ItemStore};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::map_catalog_load_error;

/// Load every catalog file into one store. A failed file is logged and
/// skipped; the load fails only if none succeed.
pub fn load_catalog(paths: &[PathBuf]) -> Result<ItemStore, CatalogError> {
    let loaded = load_store(paths);
    if let Ok(store) = &loaded {
        info!(files = paths.len(), items = store.len(), "catalog ready");
    }
    loaded
}

/// Print a load error the way the user should see it
pub fn report_load_error(error: &CatalogError) {
    let (title, message, details) = map_catalog_load_error(error);
    eprintln!("{} {}", format!("{}:", title).red().bold(), message);
    for line in details.lines() {
        eprintln!("  {}", line);
    }
}

/// Convert a form-response CSV export into a catalog JSON file.
/// Returns the number of items written.
pub fn import_catalog(csv_path: &Path, output: &Path) -> Result<usize> {
    let file = File::open(csv_path)
        .with_context(|| format!("CSV file not found: {}", csv_path.display()))?;
    info!(path = %csv_path.display(), "reading form responses");

    let items = import_form_responses(BufReader::new(file))
        .with_context(|| format!("Failed to read form responses from {}", csv_path.display()))?;

    save_items(&items, output)
        .with_context(|| format!("Failed to write catalog to {}", output.display()))?;

    Ok(items.len())
}
