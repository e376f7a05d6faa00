use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog {path} does not match the expected shape:\n{}", .errors.join("\n"))]
    Schema { path: PathBuf, errors: Vec<String> },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No catalog sources were given")]
    NoSources,

    #[error("All {0} catalog sources failed to load")]
    AllSourcesFailed(usize),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
