//! The boundary the engine drives after every recomputation pass.
//!
//! Rendering belongs to the implementor; the engine only promises the order of
//! calls: visible items, then each facet's options, then counts, then the
//! empty state.

use crate::facets::Facet;
use crate::models::Item;
use serde::Serialize;

pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load minibadge data.";

/// What the view should show in place of results, if anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmptyState {
    /// There are visible items.
    Hidden,
    /// The filters and search exclude every item. Recoverable.
    NoMatches,
    /// The catalog never loaded.
    LoadFailed { message: String },
}

impl EmptyState {
    pub fn is_empty(&self) -> bool {
        !matches!(self, EmptyState::Hidden)
    }
}

pub trait ViewReconciler {
    /// Show exactly these items, in this order.
    fn show_items(&mut self, visible: &[&Item]);

    /// Repopulate a facet control. `selected` is always either "" or one of
    /// `options`.
    fn set_facet_options(&mut self, facet: Facet, options: &[String], selected: &str);

    fn set_counts(&mut self, visible: usize, total: usize);

    fn set_empty_state(&mut self, state: EmptyState);
}

/// "Showing N minibadges" or "Showing N of M minibadges".
pub fn results_label(visible: usize, total: usize) -> String {
    if visible == total {
        format!("Showing {} minibadges", visible)
    } else {
        format!("Showing {} of {} minibadges", visible, total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetControl {
    pub facet: &'static str,
    pub label: &'static str,
    pub options: Vec<String>,
    pub selected: String,
}

/// A view that records the latest state it was handed. Serializes to the
/// JSON shape used by `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub items: Vec<Item>,
    pub facets: Vec<FacetControl>,
    pub visible: usize,
    pub total: usize,
    pub label: String,
    pub empty: EmptyState,
}

impl Default for ViewSnapshot {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            facets: Facet::ALL
                .into_iter()
                .map(|facet| FacetControl {
                    facet: facet.name(),
                    label: facet.label(),
                    options: Vec::new(),
                    selected: String::new(),
                })
                .collect(),
            visible: 0,
            total: 0,
            label: results_label(0, 0),
            empty: EmptyState::Hidden,
        }
    }
}

impl ViewSnapshot {
    pub fn titles(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.title.as_str()).collect()
    }

    pub fn facet(&self, facet: Facet) -> &FacetControl {
        &self.facets[facet.index()]
    }
}

impl ViewReconciler for ViewSnapshot {
    fn show_items(&mut self, visible: &[&Item]) {
        self.items = visible.iter().map(|item| (*item).clone()).collect();
    }

    fn set_facet_options(&mut self, facet: Facet, options: &[String], selected: &str) {
        let control = &mut self.facets[facet.index()];
        control.options = options.to_vec();
        control.selected = selected.to_string();
    }

    fn set_counts(&mut self, visible: usize, total: usize) {
        self.visible = visible;
        self.total = total;
        self.label = results_label(visible, total);
    }

    fn set_empty_state(&mut self, state: EmptyState) {
        self.empty = state;
    }
}
