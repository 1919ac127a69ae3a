//! Collaborators the converter depends on
//!
//! Browse filter configuration, catalog properties and property dictionaries
//! live in other services. The converter only sees them through these traits;
//! the static implementations here serve fixed data from configuration or
//! tests.

use crate::filters::{eq_ignore_case, BrowseFilter, ProductSearchCriteria};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Source of the browse filters configured for a search
#[async_trait]
pub trait BrowseFilterProvider: Send + Sync {
    /// `None` when nothing is configured for this search
    async fn browse_filters(
        &self,
        criteria: &ProductSearchCriteria,
    ) -> anyhow::Result<Option<Vec<BrowseFilter>>>;
}

/// Source of catalog property definitions
#[async_trait]
pub trait PropertyProvider: Send + Sync {
    async fn catalog_properties(&self, catalog_id: &str) -> anyhow::Result<Vec<CatalogProperty>>;
}

/// Search over property dictionary items
#[async_trait]
pub trait DictionaryItemSearch: Send + Sync {
    async fn search(
        &self,
        criteria: &DictionaryItemSearchCriteria,
    ) -> anyhow::Result<DictionaryItemSearchResult>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProperty {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_names: Vec<PropertyDisplayName>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDisplayName {
    pub language_code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryItemSearchCriteria {
    pub property_ids: Vec<String>,
    /// Page size
    pub take: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryItemSearchResult {
    #[serde(default)]
    pub results: Vec<DictionaryItem>,
}

/// One enumerated value of a dictionary property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryItem {
    #[serde(default)]
    pub property_id: String,
    pub alias: String,
    #[serde(default)]
    pub localized_values: Vec<DictionaryItemLocalizedValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryItemLocalizedValue {
    pub language_code: String,
    pub value: String,
}

/// Serves the same browse filters for every search
#[derive(Debug, Clone, Default)]
pub struct StaticBrowseFilterProvider {
    filters: Vec<BrowseFilter>,
}

impl StaticBrowseFilterProvider {
    pub fn new(filters: Vec<BrowseFilter>) -> Self {
        Self { filters }
    }
}

#[async_trait]
impl BrowseFilterProvider for StaticBrowseFilterProvider {
    async fn browse_filters(
        &self,
        _criteria: &ProductSearchCriteria,
    ) -> anyhow::Result<Option<Vec<BrowseFilter>>> {
        if self.filters.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.filters.clone()))
    }
}

/// Fixed property set, shared by every catalog
#[derive(Debug, Clone, Default)]
pub struct StaticPropertyProvider {
    properties: Vec<CatalogProperty>,
}

impl StaticPropertyProvider {
    pub fn new(properties: Vec<CatalogProperty>) -> Self {
        Self { properties }
    }
}

#[async_trait]
impl PropertyProvider for StaticPropertyProvider {
    async fn catalog_properties(&self, _catalog_id: &str) -> anyhow::Result<Vec<CatalogProperty>> {
        Ok(self.properties.clone())
    }
}

/// In-memory dictionary filtered by property id and truncated to `take`
#[derive(Debug, Clone, Default)]
pub struct StaticDictionaryItemSearch {
    items: Vec<DictionaryItem>,
}

impl StaticDictionaryItemSearch {
    pub fn new(items: Vec<DictionaryItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl DictionaryItemSearch for StaticDictionaryItemSearch {
    async fn search(
        &self,
        criteria: &DictionaryItemSearchCriteria,
    ) -> anyhow::Result<DictionaryItemSearchResult> {
        let results = self
            .items
            .iter()
            .filter(|item| {
                criteria
                    .property_ids
                    .iter()
                    .any(|id| eq_ignore_case(id, &item.property_id))
            })
            .take(criteria.take)
            .cloned()
            .collect();
        Ok(DictionaryItemSearchResult { results })
    }
}
