use crate::facets::Facet;
use crate::models::{Field, Item};
use crate::selection::Selection;

/// Fields concatenated into the free-text search haystack, in order.
/// `rarity` is appended when the item carries one.
pub const SEARCH_FIELDS: [Field; 8] = [
    Field::Title,
    Field::Author,
    Field::Category,
    Field::ConferenceYear,
    Field::SolderingDifficulty,
    Field::Description,
    Field::BoardHouse,
    Field::HowToAcquire,
];

/// Predicates built once per recomputation pass from a selection.
///
/// The query is trimmed and case-folded up front so scanning the catalog only
/// folds the item side.
#[derive(Debug)]
pub struct Predicate<'a> {
    selection: &'a Selection,
    query: String,
}

impl<'a> Predicate<'a> {
    pub fn new(selection: &'a Selection) -> Self {
        Self {
            selection,
            query: selection.normalized_query(),
        }
    }

    /// All facet filters AND the search.
    pub fn matches(&self, item: &Item) -> bool {
        self.matches_facets(item, None) && self.matches_search(item)
    }

    /// Every facet filter except `excluded`, AND the search. The excluded
    /// facet's own value is never consulted.
    pub fn matches_except(&self, item: &Item, excluded: Facet) -> bool {
        self.matches_facets(item, Some(excluded)) && self.matches_search(item)
    }

    pub fn matches_search(&self, item: &Item) -> bool {
        self.query.is_empty() || search_haystack(item).contains(&self.query)
    }

    pub fn selection(&self) -> &'a Selection {
        self.selection
    }

    /// Facet filters only, skipping `excluded` when given.
    pub fn matches_facets(&self, item: &Item, excluded: Option<Facet>) -> bool {
        self.selection
            .active_facets()
            .filter(|(facet, _)| Some(*facet) != excluded)
            .all(|(facet, wanted)| facet.value_of(item) == wanted)
    }
}

/// One recomputation pass over the catalog.
///
/// The search is evaluated once per item up front; the full query and every
/// facet-excluded query then only check facet values.
#[derive(Debug)]
pub struct FilterPass<'a> {
    items: &'a [Item],
    predicate: Predicate<'a>,
    search_hits: Vec<bool>,
}

impl<'a> FilterPass<'a> {
    pub fn new(items: &'a [Item], selection: &'a Selection) -> Self {
        let predicate = Predicate::new(selection);
        let search_hits = items
            .iter()
            .map(|item| predicate.matches_search(item))
            .collect();

        Self {
            items,
            predicate,
            search_hits,
        }
    }

    pub fn selection(&self) -> &'a Selection {
        self.predicate.selection()
    }

    /// Store indices of items matching the full query, in store order.
    pub fn matching(&self) -> Vec<usize> {
        self.searched()
            .filter(|(_, item)| self.predicate.matches_facets(item, None))
            .map(|(index, _)| index)
            .collect()
    }

    /// Items matching every facet filter except `excluded`, and the search.
    pub fn matching_except(&self, excluded: Facet) -> impl Iterator<Item = &'a Item> + '_ {
        self.searched()
            .filter(move |(_, item)| self.predicate.matches_facets(item, Some(excluded)))
            .map(|(_, item)| item)
    }

    fn searched(&self) -> impl Iterator<Item = (usize, &'a Item)> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(index, _)| self.search_hits[*index])
    }
}

/// Case-folded search text of an item. Absent fields contribute "".
pub fn search_haystack(item: &Item) -> String {
    let mut parts: Vec<String> = SEARCH_FIELDS
        .iter()
        .map(|field| item.field(*field).to_lowercase())
        .collect();

    if let Some(rarity) = &item.rarity {
        parts.push(rarity.to_lowercase());
    }

    parts.join(" ")
}

pub fn matches_full_query(item: &Item, selection: &Selection) -> bool {
    Predicate::new(selection).matches(item)
}

pub fn matches_all_except(item: &Item, selection: &Selection, excluded: Facet) -> bool {
    Predicate::new(selection).matches_except(item, excluded)
}

/// Store indices of matching items, in store order.
pub fn filter_indices(items: &[Item], selection: &Selection) -> Vec<usize> {
    FilterPass::new(items, selection).matching()
}

/// Apply the full query to a list of items, returning only those that match
pub fn apply_filters<'a>(items: &'a [Item], selection: &Selection) -> Vec<&'a Item> {
    let predicate = Predicate::new(selection);
    items.iter().filter(|item| predicate.matches(item)).collect()
}
