use crate::models::{Field, Item};
use std::fmt;
use std::str::FromStr;

/// The fixed set of filterable dimensions. Each facet reads exactly one item
/// field; declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Category,
    Year,
    Difficulty,
    Author,
}

impl Facet {
    pub const COUNT: usize = 4;
    pub const ALL: [Facet; Facet::COUNT] =
        [Facet::Category, Facet::Year, Facet::Difficulty, Facet::Author];

    pub fn name(self) -> &'static str {
        match self {
            Facet::Category => "category",
            Facet::Year => "year",
            Facet::Difficulty => "difficulty",
            Facet::Author => "author",
        }
    }

    pub fn field(self) -> Field {
        match self {
            Facet::Category => Field::Category,
            Facet::Year => Field::ConferenceYear,
            Facet::Difficulty => Field::SolderingDifficulty,
            Facet::Author => Field::Author,
        }
    }

    /// Label of the unconstrained choice in the facet's control.
    pub fn label(self) -> &'static str {
        match self {
            Facet::Category => "All categories",
            Facet::Year => "All years",
            Facet::Difficulty => "All difficulties",
            Facet::Author => "All authors",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// The item's value for this facet, trimmed.
    pub fn value_of(self, item: &Item) -> &str {
        item.field(self.field()).trim()
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFacet(pub String);

impl fmt::Display for UnknownFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = Facet::ALL.iter().map(|f| f.name()).collect();
        write!(f, "unknown facet '{}' (expected one of: {})", self.0, names.join(", "))
    }
}

impl std::error::Error for UnknownFacet {}

impl FromStr for Facet {
    type Err = UnknownFacet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Facet::ALL
            .into_iter()
            .find(|facet| facet.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| UnknownFacet(s.to_string()))
    }
}
