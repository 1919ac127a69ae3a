//! Engine-facing filter expressions and the active filter set

use crate::filters::eq_ignore_case;
use serde::{Deserialize, Serialize};

/// Filter expression handed to the search engine alongside an aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchFilter {
    /// Field equals any of the values
    Term { field: String, values: Vec<String> },
    /// Field falls in any of the ranges
    Range { field: String, values: Vec<RangeBound> },
    And { filters: Vec<SearchFilter> },
    Or { filters: Vec<SearchFilter> },
    Not { filter: Box<SearchFilter> },
}

/// One interval of a [`SearchFilter::Range`]; `None` is an open side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBound {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<String>,
    pub include_lower: bool,
    pub include_upper: bool,
}

impl SearchFilter {
    pub fn term(field: impl Into<String>, values: Vec<String>) -> Self {
        SearchFilter::Term {
            field: field.into(),
            values,
        }
    }

    /// Single-interval range condition on `field`
    pub fn range(
        field: impl Into<String>,
        lower: Option<&str>,
        upper: Option<&str>,
        include_lower: bool,
        include_upper: bool,
    ) -> Self {
        SearchFilter::Range {
            field: field.into(),
            values: vec![RangeBound {
                lower: lower.map(str::to_string),
                upper: upper.map(str::to_string),
                include_lower,
                include_upper,
            }],
        }
    }

    pub fn not(filter: SearchFilter) -> Self {
        SearchFilter::Not {
            filter: Box::new(filter),
        }
    }
}

/// Conjunction of `filters` plus an optional extra condition.
///
/// Returns `None` when there is nothing to combine and the single filter
/// itself when only one remains, so requests never carry a trivial `And`.
pub fn and<I>(filters: I, extra: Option<SearchFilter>) -> Option<SearchFilter>
where
    I: IntoIterator<Item = SearchFilter>,
{
    let mut all: Vec<SearchFilter> = filters.into_iter().chain(extra).collect();
    match all.len() {
        0 => None,
        1 => all.pop(),
        _ => Some(SearchFilter::And { filters: all }),
    }
}

/// Filters currently applied to a search.
///
/// Permanent filters (catalog, visibility, outline...) always apply.
/// Removable filters are the ones the shopper picked, keyed by the browse
/// filter key that produced them, so a facet can be computed as if its own
/// selection were relaxed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub permanent: Vec<SearchFilter>,
    #[serde(default)]
    pub removable: Vec<KeyedFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyedFilter {
    pub key: String,
    pub filter: SearchFilter,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_permanent(mut self, filter: SearchFilter) -> Self {
        self.permanent.push(filter);
        self
    }

    pub fn with_removable(mut self, key: impl Into<String>, filter: SearchFilter) -> Self {
        self.removable.push(KeyedFilter {
            key: key.into(),
            filter,
        });
        self
    }

    /// Every active filter except the removable ones registered under `key`
    /// (compared case-insensitively). Permanent filters first.
    pub fn except(&self, key: &str) -> Vec<SearchFilter> {
        self.permanent
            .iter()
            .cloned()
            .chain(
                self.removable
                    .iter()
                    .filter(|f| !eq_ignore_case(&f.key, key))
                    .map(|f| f.filter.clone()),
            )
            .collect()
    }

    /// Every active filter
    pub fn all(&self) -> Vec<SearchFilter> {
        self.permanent
            .iter()
            .cloned()
            .chain(self.removable.iter().map(|f| f.filter.clone()))
            .collect()
    }
}
