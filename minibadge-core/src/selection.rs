use crate::facets::Facet;
use crate::models::Field;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Numeric-aware string ordering.
    #[default]
    Natural,
    /// Compare the first run of digits in the value as an integer.
    NumericExtract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: Field,
    pub direction: SortDirection,
    pub mode: SortMode,
}

impl SortSpec {
    pub fn new(field: Field, direction: SortDirection) -> Self {
        Self {
            field,
            direction,
            mode: SortMode::Natural,
        }
    }

    pub fn numeric(field: Field, direction: SortDirection) -> Self {
        Self {
            field,
            direction,
            mode: SortMode::NumericExtract,
        }
    }
}

impl Default for SortSpec {
    /// Most recent first.
    fn default() -> Self {
        Self::new(Field::Timestamp, SortDirection::Desc)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        match self.mode {
            SortMode::Natural => write!(f, "{}:{}", self.field, direction),
            SortMode::NumericExtract => write!(f, "{}:num-{}", self.field, direction),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSortDirective {
    pub directive: String,
    pub reason: String,
}

impl fmt::Display for InvalidSortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid sort '{}': {}", self.directive, self.reason)
    }
}

impl std::error::Error for InvalidSortDirective {}

impl FromStr for SortSpec {
    type Err = InvalidSortDirective;

    /// Parse `<field>[:<order>]` where order is `asc`, `desc`, `num-asc` or
    /// `num-desc`. The field may carry the `item-` prefix. A missing order
    /// means ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| InvalidSortDirective {
            directive: s.to_string(),
            reason,
        };

        let (field_part, order_part) = match s.trim().split_once(':') {
            Some((field, order)) => (field, order.trim()),
            None => (s.trim(), ""),
        };

        let field: Field = field_part.parse().map_err(|e: crate::models::UnknownField| {
            invalid(e.to_string())
        })?;

        let (mode, order) = match order_part.split_once('-') {
            Some(("num", order)) => (SortMode::NumericExtract, order),
            Some((mode, _)) => return Err(invalid(format!("unknown sort mode '{}'", mode))),
            None => (SortMode::Natural, order_part),
        };

        let direction = match order.to_ascii_lowercase().as_str() {
            "" | "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(invalid(format!("unknown direction '{}'", other))),
        };

        Ok(SortSpec {
            field,
            direction,
            mode,
        })
    }
}

/// The current query: one value per facet ("" = unconstrained), free-text
/// search and sort directive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    facets: [String; Facet::COUNT],
    query: String,
    sort: SortSpec,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn facet(&self, facet: Facet) -> &str {
        &self.facets[facet.index()]
    }

    /// Set a facet's value; whitespace-only values clear it.
    pub fn set_facet(&mut self, facet: Facet, value: impl AsRef<str>) {
        self.facets[facet.index()] = value.as_ref().trim().to_string();
    }

    pub fn clear_facet(&mut self, facet: Facet) {
        self.facets[facet.index()].clear();
    }

    /// Facets that currently constrain the result, with their values.
    pub fn active_facets(&self) -> impl Iterator<Item = (Facet, &str)> {
        Facet::ALL
            .into_iter()
            .map(move |facet| (facet, self.facet(facet)))
            .filter(|(_, value)| !value.is_empty())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The query as matched: trimmed and case-folded.
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Back to no filters, empty query and the default sort.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active_facets().next().is_none() && self.normalized_query().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("item-title:asc", SortSpec::new(Field::Title, SortDirection::Asc))]
    #[case("title:desc", SortSpec::new(Field::Title, SortDirection::Desc))]
    #[case("author", SortSpec::new(Field::Author, SortDirection::Asc))]
    #[case(
        "item-quantityMade:num-asc",
        SortSpec::numeric(Field::QuantityMade, SortDirection::Asc)
    )]
    #[case(
        "quantityMade:num-desc",
        SortSpec::numeric(Field::QuantityMade, SortDirection::Desc)
    )]
    #[case("item-timestamp:desc", SortSpec::default())]
    fn test_parse_sort_directive(#[case] input: &str, #[case] expected: SortSpec) {
        assert_eq!(input.parse::<SortSpec>().unwrap(), expected);
    }

    #[rstest]
    #[case("colour:asc")]
    #[case("title:sideways")]
    #[case("title:alpha-asc")]
    fn test_reject_bad_sort_directive(#[case] input: &str) {
        assert!(input.parse::<SortSpec>().is_err());
    }

    #[test]
    fn test_sort_directive_display_parses_back() {
        let spec = SortSpec::numeric(Field::QuantityMade, SortDirection::Desc);
        assert_eq!(spec.to_string(), "quantityMade:num-desc");
        assert_eq!(spec.to_string().parse::<SortSpec>().unwrap(), spec);
    }

    #[test]
    fn test_initial_selection() {
        let selection = Selection::new();

        assert!(selection.is_unconstrained());
        assert_eq!(selection.sort(), SortSpec::new(Field::Timestamp, SortDirection::Desc));
        for facet in Facet::ALL {
            assert_eq!(selection.facet(facet), "");
        }
    }

    #[test]
    fn test_set_facet_trims_value() {
        let mut selection = Selection::new();
        selection.set_facet(Facet::Difficulty, "  Advanced ");
        selection.set_facet(Facet::Author, "   ");

        assert_eq!(selection.facet(Facet::Difficulty), "Advanced");
        assert_eq!(
            selection.active_facets().collect::<Vec<_>>(),
            vec![(Facet::Difficulty, "Advanced")]
        );
    }

    #[test]
    fn test_clear_restores_initial_state() {
        let mut selection = Selection::new();
        selection.set_facet(Facet::Category, "Game");
        selection.set_query("Tool");
        selection.set_sort(SortSpec::new(Field::Title, SortDirection::Asc));

        selection.clear();

        assert_eq!(selection, Selection::new());
    }

    #[test]
    fn test_normalized_query() {
        let mut selection = Selection::new();
        selection.set_query("  BLINKY Lights ");
        assert_eq!(selection.normalized_query(), "blinky lights");
        assert_eq!(selection.query(), "  BLINKY Lights ");
    }
}
