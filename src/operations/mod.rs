pub mod file_ops;

pub use file_ops::{import_catalog, load_catalog, report_load_error};
