use crate::error::{CatalogError, Result};
use crate::models::Item;
use tracing::{info, warn};

/// The loaded catalog, in load order. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Concatenate several independently loaded sources.
    ///
    /// A failed source contributes zero items and the rest still load. Only
    /// when every source fails is the whole load an error; a lone failing
    /// source reports its own error.
    pub fn from_sources<I>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Vec<Item>>>,
    {
        let mut items = Vec::new();
        let mut attempted = 0;
        let mut failures = Vec::new();

        for source in sources {
            attempted += 1;
            match source {
                Ok(loaded) => items.extend(loaded),
                Err(err) => {
                    warn!(error = %err, "catalog source failed, treating it as empty");
                    failures.push(err);
                }
            }
        }

        if attempted == 0 {
            return Err(CatalogError::NoSources);
        }

        if failures.len() == attempted {
            return match failures.pop() {
                Some(err) if attempted == 1 => Err(err),
                _ => Err(CatalogError::AllSourcesFailed(attempted)),
            };
        }

        info!(
            items = items.len(),
            sources = attempted,
            failed = failures.len(),
            "catalog loaded"
        );
        Ok(Self::new(items))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> Item {
        Item {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sources_are_concatenated_in_order() {
        let store = ItemStore::from_sources(vec![
            Ok(vec![titled("A"), titled("B")]),
            Ok(vec![titled("C")]),
        ])
        .unwrap();

        let titles: Vec<_> = store.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_failed_source_contributes_nothing() {
        let store = ItemStore::from_sources(vec![
            Err(CatalogError::NoSources),
            Ok(vec![titled("A")]),
        ])
        .unwrap();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_single_failed_source_keeps_its_error() {
        let result = ItemStore::from_sources(vec![Err(CatalogError::NoSources)]);
        assert!(matches!(result, Err(CatalogError::NoSources)));
    }

    #[test]
    fn test_all_sources_failed() {
        let result = ItemStore::from_sources(vec![
            Err(CatalogError::NoSources),
            Err(CatalogError::NoSources),
        ]);
        assert!(matches!(result, Err(CatalogError::AllSourcesFailed(2))));
    }

    #[test]
    fn test_no_sources() {
        let result = ItemStore::from_sources(Vec::new());
        assert!(matches!(result, Err(CatalogError::NoSources)));
    }

    #[test]
    fn test_empty_source_is_not_a_failure() {
        let store = ItemStore::from_sources(vec![Ok(Vec::new())]).unwrap();
        assert!(store.is_empty());
    }
}
