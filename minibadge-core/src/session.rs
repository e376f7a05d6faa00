use crate::error::CatalogError;
use crate::facets::Facet;
use crate::filtering::FilterPass;
use crate::models::Item;
use crate::options::{options_for_pass, FacetOptions};
use crate::selection::{Selection, SortSpec};
use crate::sorting::sort_items;
use crate::store::ItemStore;
use crate::view::{EmptyState, ViewReconciler, LOAD_FAILURE_MESSAGE};
use tracing::{debug, error};

/// One browsing session: the loaded catalog, the current selection and the
/// state derived from them.
///
/// Every handler runs one complete recomputation pass and then drives the
/// view before returning. The derived state is never mutated anywhere else.
#[derive(Debug)]
pub struct Session {
    store: ItemStore,
    selection: Selection,
    /// Store indices of matching items, in store order.
    matching: Vec<usize>,
    options: FacetOptions,
}

impl Session {
    /// Start a session with the initial selection. Nothing is rendered.
    pub fn new(store: ItemStore) -> Self {
        let mut session = Self {
            store,
            selection: Selection::new(),
            matching: Vec::new(),
            options: FacetOptions::default(),
        };
        session.recompute();
        session
    }

    /// Gate on the catalog load: a loaded store starts a session and renders
    /// it, a failed load renders the load-failure state and yields nothing.
    pub fn bootstrap<V>(loaded: Result<ItemStore, CatalogError>, view: &mut V) -> Option<Self>
    where
        V: ViewReconciler + ?Sized,
    {
        match loaded {
            Ok(store) => {
                let session = Self::new(store);
                session.render(view);
                Some(session)
            }
            Err(err) => {
                error!(error = %err, "catalog failed to load");
                render_load_failure(view);
                None
            }
        }
    }

    pub fn set_search<V>(&mut self, query: impl Into<String>, view: &mut V)
    where
        V: ViewReconciler + ?Sized,
    {
        self.selection.set_query(query);
        self.refresh(view);
    }

    /// Set a facet's value; "" unconstrains it.
    pub fn set_facet<V>(&mut self, facet: Facet, value: impl AsRef<str>, view: &mut V)
    where
        V: ViewReconciler + ?Sized,
    {
        self.selection.set_facet(facet, value);
        self.refresh(view);
    }

    /// Reorder the current visible subset. Filtering and facet options are
    /// untouched.
    pub fn set_sort<V>(&mut self, sort: SortSpec, view: &mut V)
    where
        V: ViewReconciler + ?Sized,
    {
        self.selection.set_sort(sort);
        debug!(sort = %sort, "sort changed");
        self.render(view);
    }

    /// Drop every facet filter and the query, restore the default sort.
    pub fn clear<V>(&mut self, view: &mut V)
    where
        V: ViewReconciler + ?Sized,
    {
        self.selection.clear();
        self.refresh(view);
    }

    /// Apply a whole selection at once, as one event.
    pub fn apply<V>(&mut self, selection: Selection, view: &mut V)
    where
        V: ViewReconciler + ?Sized,
    {
        self.selection = selection;
        self.refresh(view);
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn options(&self) -> &FacetOptions {
        &self.options
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Matching items in the current sort order.
    pub fn visible(&self) -> Vec<&Item> {
        let mut visible: Vec<&Item> = self
            .matching
            .iter()
            .filter_map(|&index| self.store.get(index))
            .collect();
        sort_items(&mut visible, &self.selection.sort());
        visible
    }

    pub fn visible_count(&self) -> usize {
        self.matching.len()
    }

    pub fn total_count(&self) -> usize {
        self.store.len()
    }

    pub fn empty_state(&self) -> EmptyState {
        if self.matching.is_empty() {
            EmptyState::NoMatches
        } else {
            EmptyState::Hidden
        }
    }

    /// Push the current derived state to the view, in contract order.
    pub fn render<V>(&self, view: &mut V)
    where
        V: ViewReconciler + ?Sized,
    {
        view.show_items(&self.visible());
        for facet in Facet::ALL {
            view.set_facet_options(facet, self.options.get(facet), self.selection.facet(facet));
        }
        view.set_counts(self.visible_count(), self.total_count());
        view.set_empty_state(self.empty_state());
    }

    fn refresh<V>(&mut self, view: &mut V)
    where
        V: ViewReconciler + ?Sized,
    {
        self.recompute();
        self.render(view);
    }

    fn recompute(&mut self) {
        let pass = FilterPass::new(self.store.items(), &self.selection);
        let options = options_for_pass(&pass);
        let matching = pass.matching();
        self.options = options;
        self.matching = matching;

        debug!(
            visible = self.matching.len(),
            total = self.store.len(),
            "selection recomputed"
        );
    }
}

/// Zero counts and the load-failure empty state.
pub fn render_load_failure<V>(view: &mut V)
where
    V: ViewReconciler + ?Sized,
{
    view.show_items(&[]);
    for facet in Facet::ALL {
        view.set_facet_options(facet, &[], "");
    }
    view.set_counts(0, 0);
    view.set_empty_state(EmptyState::LoadFailed {
        message: LOAD_FAILURE_MESSAGE.to_string(),
    });
}
