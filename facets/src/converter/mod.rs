//! Conversion between browse filters and search-engine aggregations
//!
//! [`AggregationConverter`] runs in both directions for one search:
//!
//! - [`aggregation_requests`](AggregationConverter::aggregation_requests)
//!   turns the configured browse filters into aggregation requests, each
//!   filtered by every active filter except its own so counts show what a
//!   shopper would get by changing that facet's selection.
//! - [`convert_aggregations`](AggregationConverter::convert_aggregations)
//!   matches the engine's responses back to the browse filters and attaches
//!   localized labels from catalog properties and their dictionaries.

mod labels;
mod request;
mod response;

use crate::aggregations::{
    Aggregation, AggregationRequest, AggregationResponse, PRICE_RANGE_AGGREGATION,
    RANGE_AGGREGATION,
};
use crate::config::ConverterConfig;
use crate::error::{Error, Result};
use crate::filters::{opt_eq_ignore_case, BrowseFilter, ProductSearchCriteria};
use crate::providers::{BrowseFilterProvider, DictionaryItemSearch, PropertyProvider};
use crate::search::FilterSet;
use std::sync::Arc;
use tracing::{debug, instrument};

pub use labels::first_label_per_language;

pub struct AggregationConverter {
    browse_filters: Arc<dyn BrowseFilterProvider>,
    properties: Arc<dyn PropertyProvider>,
    dictionary: Arc<dyn DictionaryItemSearch>,
    config: ConverterConfig,
}

impl AggregationConverter {
    pub fn new(
        browse_filters: Arc<dyn BrowseFilterProvider>,
        properties: Arc<dyn PropertyProvider>,
        dictionary: Arc<dyn DictionaryItemSearch>,
    ) -> Self {
        Self {
            browse_filters,
            properties,
            dictionary,
            config: ConverterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    /// Aggregation requests for every browse filter configured for the search
    #[instrument(skip_all, fields(catalog_id = %criteria.catalog_id))]
    pub async fn aggregation_requests(
        &self,
        criteria: &ProductSearchCriteria,
        active_filters: &FilterSet,
    ) -> Result<Vec<AggregationRequest>> {
        let mut result = Vec::new();

        let Some(browse_filters) = self.fetch_browse_filters(criteria).await? else {
            return Ok(result);
        };

        for filter in &browse_filters {
            let Some(key) = filter.key() else {
                continue;
            };
            let existing = active_filters.except(key);

            match filter {
                BrowseFilter::Attribute(f) => {
                    result.push(request::attribute_request(f, existing));
                }
                BrowseFilter::Range(f) => {
                    result.extend(request::range_requests(f, &existing));
                }
                BrowseFilter::PriceRange(f) => {
                    if !opt_eq_ignore_case(f.currency.as_deref(), criteria.currency.as_deref()) {
                        continue;
                    }
                    result.extend(request::price_range_request(
                        f,
                        &self.config.price_field_prefix,
                        existing,
                    ));
                }
                BrowseFilter::Unsupported => {}
            }
        }

        debug!(
            browse_filters = browse_filters.len(),
            requests = result.len(),
            "Built aggregation requests"
        );
        Ok(result)
    }

    /// Facet results for the engine's responses, with localized labels.
    /// Facets without any matched bucket are left out.
    #[instrument(skip_all, fields(catalog_id = %criteria.catalog_id, responses = responses.len()))]
    pub async fn convert_aggregations(
        &self,
        responses: &[AggregationResponse],
        criteria: &ProductSearchCriteria,
    ) -> Result<Vec<Aggregation>> {
        let mut result = Vec::new();

        let browse_filters = self.fetch_browse_filters(criteria).await?;
        if let Some(browse_filters) = browse_filters.filter(|_| !responses.is_empty()) {
            for filter in &browse_filters {
                let aggregation = match filter {
                    BrowseFilter::Attribute(f) => {
                        response::attribute_aggregation(f, responses, &self.config.label_delimiter)
                    }
                    BrowseFilter::Range(f) => Some(response::range_aggregation(
                        RANGE_AGGREGATION,
                        &f.key,
                        &f.values,
                        responses,
                    )),
                    BrowseFilter::PriceRange(f) => Some(response::range_aggregation(
                        PRICE_RANGE_AGGREGATION,
                        &f.key,
                        &f.values,
                        responses,
                    )),
                    BrowseFilter::Unsupported => None,
                };

                if let Some(aggregation) = aggregation.filter(|a| !a.items.is_empty()) {
                    result.push(aggregation);
                }
            }
        }

        if !result.is_empty() {
            labels::add_labels(
                &mut result,
                &criteria.catalog_id,
                self.properties.as_ref(),
                self.dictionary.as_ref(),
                self.config.dictionary_take,
            )
            .await?;
        }

        debug!(aggregations = result.len(), "Converted aggregations");
        Ok(result)
    }

    async fn fetch_browse_filters(
        &self,
        criteria: &ProductSearchCriteria,
    ) -> Result<Option<Vec<BrowseFilter>>> {
        self.browse_filters
            .browse_filters(criteria)
            .await
            .map_err(Error::BrowseFilters)
    }
}
