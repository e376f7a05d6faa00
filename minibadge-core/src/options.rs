use crate::facets::Facet;
use crate::filtering::FilterPass;
use crate::models::Item;
use crate::selection::Selection;
use crate::sorting::natural_cmp;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Per-facet lists of values still reachable under every other facet's filter
/// and the search, plus the facet's own selected value. Each list is distinct,
/// non-empty values in natural order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetOptions {
    options: BTreeMap<Facet, Vec<String>>,
}

impl FacetOptions {
    pub fn get(&self, facet: Facet) -> &[String] {
        self.options.get(&facet).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, facet: Facet, value: &str) -> bool {
        self.get(facet).iter().any(|option| option == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Facet, &[String])> {
        self.options
            .iter()
            .map(|(facet, values)| (*facet, values.as_slice()))
    }
}

/// Compute the option list of every facet.
///
/// A facet's own filter never narrows its own list: for facet F an item
/// contributes its F value whenever it matches every other facet and the
/// search. Scans the catalog once per facet.
pub fn derive_options(items: &[Item], selection: &Selection) -> FacetOptions {
    options_for_pass(&FilterPass::new(items, selection))
}

/// Option lists for a pass already built over the catalog.
///
/// A selected value that no reachable item carries any more is still listed,
/// so the control keeps showing the filter that is in effect.
pub fn options_for_pass(pass: &FilterPass<'_>) -> FacetOptions {
    let selection = pass.selection();

    let options = Facet::ALL
        .into_iter()
        .map(|facet| {
            let mut seen = HashSet::new();
            let mut values: Vec<String> = pass
                .matching_except(facet)
                .map(|item| facet.value_of(item))
                .filter(|value| !value.is_empty() && seen.insert(*value))
                .map(str::to_string)
                .collect();

            let selected = selection.facet(facet);
            if !selected.is_empty() && !seen.contains(selected) {
                debug!(facet = facet.name(), value = selected, "selected value unreachable");
                values.push(selected.to_string());
            }

            values.sort_by(|a, b| natural_cmp(a, b));
            (facet, values)
        })
        .collect();

    FacetOptions { options }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn badge(title: &str, category: &str, difficulty: &str, year: &str) -> Item {
        Item {
            title: title.to_string(),
            category: category.to_string(),
            soldering_difficulty: difficulty.to_string(),
            conference_year: year.to_string(),
            ..Default::default()
        }
    }

    fn catalog() -> Vec<Item> {
        vec![
            badge("A", "Game", "Beginner", "2024"),
            badge("B", "Tool", "Advanced", "2025"),
            badge("C", "Art", "Advanced", "2025"),
            badge("D", "Game", " Beginner ", "2024"),
            badge("E", "", "Intermediate", "2"),
        ]
    }

    #[test]
    fn test_options_without_filters_are_distinct_and_non_empty() {
        let options = derive_options(&catalog(), &Selection::new());

        assert_eq!(options.get(Facet::Category), ["Art", "Game", "Tool"]);
        assert_eq!(
            options.get(Facet::Difficulty),
            ["Advanced", "Beginner", "Intermediate"]
        );
        assert!(options.get(Facet::Author).is_empty());
    }

    #[test]
    fn test_options_use_natural_order() {
        let options = derive_options(&catalog(), &Selection::new());
        assert_eq!(options.get(Facet::Year), ["2", "2024", "2025"]);

        let items = vec![
            badge("x", "", "", "10"),
            badge("y", "", "", "9"),
            badge("z", "", "", "100"),
        ];
        let options = derive_options(&items, &Selection::new());
        assert_eq!(options.get(Facet::Year), ["9", "10", "100"]);
    }

    #[test]
    fn test_own_filter_does_not_narrow_own_options() {
        let items = catalog();
        let mut selection = Selection::new();
        selection.set_facet(Facet::Difficulty, "Advanced");

        let options = derive_options(&items, &selection);

        assert_eq!(
            options.get(Facet::Difficulty),
            ["Advanced", "Beginner", "Intermediate"]
        );
        assert_eq!(options.get(Facet::Category), ["Art", "Tool"]);
        assert_eq!(options.get(Facet::Year), ["2025"]);
    }

    #[test]
    fn test_changing_own_value_leaves_own_options_unchanged() {
        let items = catalog();
        let mut selection = Selection::new();
        selection.set_facet(Facet::Category, "Game");

        for difficulty in ["", "Beginner"] {
            selection.set_facet(Facet::Difficulty, difficulty);
            let options = derive_options(&items, &selection);
            assert_eq!(options.get(Facet::Difficulty), ["Beginner"]);
        }
    }

    #[test]
    fn test_search_narrows_every_facet() {
        let items = catalog();
        let mut selection = Selection::new();
        selection.set_query("tool");

        let options = derive_options(&items, &selection);

        assert_eq!(options.get(Facet::Category), ["Tool"]);
        assert_eq!(options.get(Facet::Difficulty), ["Advanced"]);
    }

    #[test]
    fn test_conflicting_selections_stay_listed() {
        let items = catalog();
        let mut selection = Selection::new();
        selection.set_facet(Facet::Difficulty, "Advanced");
        selection.set_facet(Facet::Category, "Game");

        let options = derive_options(&items, &selection);

        // No Game badge is Advanced, yet both controls still show their value.
        assert_eq!(options.get(Facet::Category), ["Art", "Game", "Tool"]);
        assert_eq!(options.get(Facet::Difficulty), ["Advanced", "Beginner"]);
        assert!(options.get(Facet::Year).is_empty());
        assert!(crate::filtering::filter_indices(&items, &selection).is_empty());
    }

    #[test]
    fn test_reachable_selection_is_not_duplicated() {
        let items = catalog();
        let mut selection = Selection::new();
        selection.set_facet(Facet::Difficulty, "Advanced");
        selection.set_facet(Facet::Category, "Tool");

        let options = derive_options(&items, &selection);

        assert_eq!(options.get(Facet::Category), ["Art", "Tool"]);
        assert_eq!(options.get(Facet::Difficulty), ["Advanced"]);
    }

    #[test]
    fn test_search_keeps_unreachable_selection_listed() {
        let items = catalog();
        let mut selection = Selection::new();
        selection.set_facet(Facet::Category, "Art");
        selection.set_query("tool");

        let options = derive_options(&items, &selection);

        assert_eq!(options.get(Facet::Category), ["Art", "Tool"]);
        assert_eq!(selection.facet(Facet::Category), "Art");
        assert_eq!(selection.query(), "tool");
    }
}
