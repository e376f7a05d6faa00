// Public modules
pub mod error;
pub mod facets;
pub mod filtering;
pub mod import;
pub mod io;
pub mod models;
pub mod options;
pub mod schema_validation;
pub mod selection;
pub mod session;
pub mod sorting;
pub mod store;
pub mod view;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use facets::{Facet, UnknownFacet};
pub use filtering::{
    apply_filters, filter_indices, matches_all_except, matches_full_query, search_haystack,
    FilterPass, Predicate,
};
pub use import::{derive_year_from_timestamp, google_drive_to_direct, import_form_responses};
pub use io::{load_items, load_store, save_items};
pub use models::{Difficulty, Field, Item, UnknownField};
pub use options::{derive_options, options_for_pass, FacetOptions};
pub use schema_validation::{validate_against_schema, validate_catalog};
pub use selection::{InvalidSortDirective, Selection, SortDirection, SortMode, SortSpec};
pub use session::{render_load_failure, Session};
pub use sorting::{extract_number, natural_cmp, normalize_for_sorting, sort_items};
pub use store::ItemStore;
pub use view::{results_label, EmptyState, FacetControl, ViewReconciler, ViewSnapshot};
