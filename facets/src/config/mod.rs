//! Configuration for the facet converter
//!
//! Loaded from TOML, e.g.:
//!
//! ```toml
//! [converter]
//! label_delimiter = "___"
//!
//! [[browse_filters]]
//! type = "attribute"
//! key = "color"
//! facet_size = 20
//! ```

use crate::error::{Error, Result};
use crate::filters::BrowseFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Separator between a value and its embedded label in attribute bucket ids
pub const DEFAULT_LABEL_DELIMITER: &str = "___";

/// Prefix of the per-currency price field
pub const DEFAULT_PRICE_FIELD_PREFIX: &str = "price";

/// Dictionary page size meaning "everything"
pub const DEFAULT_DICTIONARY_TAKE: usize = i32::MAX as usize;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FacetsConfig {
    #[serde(default)]
    pub converter: ConverterConfig,
    /// Browse filters served by [`crate::providers::StaticBrowseFilterProvider`]
    #[serde(default)]
    pub browse_filters: Vec<BrowseFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConverterConfig {
    #[serde(default = "default_label_delimiter")]
    pub label_delimiter: String,
    #[serde(default = "default_price_field_prefix")]
    pub price_field_prefix: String,
    #[serde(default = "default_dictionary_take")]
    pub dictionary_take: usize,
}

fn default_label_delimiter() -> String {
    DEFAULT_LABEL_DELIMITER.to_string()
}

fn default_price_field_prefix() -> String {
    DEFAULT_PRICE_FIELD_PREFIX.to_string()
}

fn default_dictionary_take() -> usize {
    DEFAULT_DICTIONARY_TAKE
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            label_delimiter: default_label_delimiter(),
            price_field_prefix: default_price_field_prefix(),
            dictionary_take: default_dictionary_take(),
        }
    }
}

impl ConverterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.label_delimiter.is_empty() {
            return Err(Error::Config("label_delimiter must not be empty".to_string()));
        }
        if self.price_field_prefix.is_empty() {
            return Err(Error::Config(
                "price_field_prefix must not be empty".to_string(),
            ));
        }
        if self.dictionary_take == 0 {
            return Err(Error::Config(
                "dictionary_take must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl FacetsConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FacetsConfig = toml::from_str(content)?;
        config.converter.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save config to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}
