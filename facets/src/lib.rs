//! Catalog facets for product search
//!
//! Turns a catalog's configured browse filters into aggregation requests for
//! the search engine, and the engine's aggregation responses back into
//! localized facets.
//!
//! # Facet kinds
//!
//! - `attribute` - one bucket per distinct field value, optionally restricted
//!   to configured values
//! - `range` - explicitly configured buckets, counted one request per bucket
//! - `price_range` - range buckets on the per-currency price field, merged
//!   into a single range request
//!
//! # Labels
//!
//! Facet names come from catalog property display names and facet values
//! from property dictionaries, reduced to one label per language.

pub mod aggregations;
pub mod config;
pub mod converter;
pub mod error;
pub mod filters;
pub mod providers;
pub mod search;

pub use config::{ConverterConfig, FacetsConfig};
pub use converter::AggregationConverter;
pub use error::{Error, Result};
