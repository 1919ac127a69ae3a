//! Browse filter definitions
//!
//! A browse filter is a catalog-configured facet: what the storefront lets a
//! shopper narrow results by. Filters are deserialized from configuration
//! (see [`crate::config::FacetsConfig`]) or handed over by a
//! [`crate::providers::BrowseFilterProvider`].

use serde::{Deserialize, Serialize};

/// Search criteria the facets are computed for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSearchCriteria {
    /// Catalog whose properties provide the facet labels
    pub catalog_id: String,
    /// Currency of the search; selects the matching price range filter
    #[serde(default)]
    pub currency: Option<String>,
}

impl ProductSearchCriteria {
    pub fn new(catalog_id: impl Into<String>) -> Self {
        Self {
            catalog_id: catalog_id.into(),
            ..Default::default()
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// A configured facet, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BrowseFilter {
    Attribute(AttributeFilter),
    Range(RangeFilter),
    PriceRange(PriceRangeFilter),
    /// Filter kind this crate does not know about; never produces requests or results
    #[serde(other)]
    Unsupported,
}

impl BrowseFilter {
    /// Filter key, `None` for unsupported kinds
    pub fn key(&self) -> Option<&str> {
        match self {
            BrowseFilter::Attribute(f) => Some(&f.key),
            BrowseFilter::Range(f) => Some(&f.key),
            BrowseFilter::PriceRange(f) => Some(&f.key),
            BrowseFilter::Unsupported => None,
        }
    }
}

/// Facet over the distinct values of an indexed field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
    pub key: String,
    /// Restricts the facet to these value ids; empty means every observed value
    #[serde(default)]
    pub values: Vec<AttributeFilterValue>,
    /// Maximum number of buckets to ask the engine for
    #[serde(default)]
    pub facet_size: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilterValue {
    pub id: String,
}

impl AttributeFilterValue {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Facet made of explicitly configured range buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub key: String,
    #[serde(default)]
    pub values: Vec<RangeFilterValue>,
}

/// Range facet scoped to one currency
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeFilter {
    pub key: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub values: Vec<RangeFilterValue>,
}

/// One range bucket. Bounds are opaque, comparable text (numbers or dates);
/// a missing or empty bound leaves that side of the range open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilterValue {
    pub id: String,
    #[serde(default)]
    pub lower: Option<String>,
    #[serde(default)]
    pub upper: Option<String>,
    #[serde(default = "default_true")]
    pub include_lower: bool,
    #[serde(default)]
    pub include_upper: bool,
}

fn default_true() -> bool {
    true
}

impl RangeFilterValue {
    /// Bucket `[lower, upper)`, the usual shape for facet ranges
    pub fn new(id: impl Into<String>, lower: Option<&str>, upper: Option<&str>) -> Self {
        Self {
            id: id.into(),
            lower: lower.map(str::to_string),
            upper: upper.map(str::to_string),
            include_lower: true,
            include_upper: false,
        }
    }
}

/// Case-insensitive comparison used for keys, ids and aliases. Folds
/// non-ASCII letters too, so `Größe` equals `GRÖßE`.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Grouping key agreeing with [`eq_ignore_case`]
pub(crate) fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Like [`eq_ignore_case`], where two missing values are equal
pub(crate) fn opt_eq_ignore_case(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => eq_ignore_case(a, b),
        (None, None) => true,
        _ => false,
    }
}
