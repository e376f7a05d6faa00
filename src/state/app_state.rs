use minibadge_core::{Session, ViewReconciler};
use std::path::PathBuf;

use crate::operations::{load_catalog, report_load_error};

/// Application state: where the catalog came from and the session over it.
/// The session only exists once the catalog has loaded.
#[derive(Debug)]
pub struct AppState {
    /// Catalog files, in load order
    pub sources: Vec<PathBuf>,
    /// Browsing session, `None` until loaded or after a failed load
    pub session: Option<Session>,
}

impl AppState {
    pub fn new(sources: Vec<PathBuf>) -> Self {
        Self {
            sources,
            session: None,
        }
    }

    /// Load the catalog and render the initial view, or the load-failure
    /// view. Returns whether a session is now available.
    pub fn load<V>(&mut self, view: &mut V) -> bool
    where
        V: ViewReconciler + ?Sized,
    {
        let loaded = load_catalog(&self.sources);
        if let Err(ref err) = loaded {
            report_load_error(err);
        }

        self.session = Session::bootstrap(loaded, view);
        self.session.is_some()
    }

    /// Banner with the catalog file name(s)
    pub fn get_title(&self) -> String {
        let file_name = self
            .sources
            .first()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("no catalog");

        match self.sources.len() {
            0 | 1 => format!("Minibadges - {}", file_name),
            n => format!("Minibadges - {} (+{} more)", file_name, n - 1),
        }
    }
}
