use crate::search::SearchFilter;
use serde::{Deserialize, Serialize};

/// `Aggregation::aggregation_type` for attribute facets
pub const ATTRIBUTE_AGGREGATION: &str = "attr";
/// `Aggregation::aggregation_type` for range facets
pub const RANGE_AGGREGATION: &str = "range";
/// `Aggregation::aggregation_type` for price range facets
pub const PRICE_RANGE_AGGREGATION: &str = "pricerange";

/// Aggregation the search engine is asked to compute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AggregationRequest {
    Term(TermAggregationRequest),
    Range(RangeAggregationRequest),
}

impl AggregationRequest {
    /// Identifier the engine's response carries: the explicit id, else the field name
    pub fn effective_id(&self) -> Option<&str> {
        let (id, field_name) = match self {
            AggregationRequest::Term(r) => (&r.id, &r.field_name),
            AggregationRequest::Range(r) => (&r.id, &r.field_name),
        };
        id.as_deref().or(field_name.as_deref())
    }

    pub fn filter(&self) -> Option<&SearchFilter> {
        match self {
            AggregationRequest::Term(r) => r.filter.as_ref(),
            AggregationRequest::Range(r) => r.filter.as_ref(),
        }
    }
}

/// One bucket per distinct value of `field_name`, or a plain match count
/// when `field_name` is unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermAggregationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// Only count these values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

/// Several numeric buckets over one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeAggregationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    pub values: Vec<RangeAggregationRequestValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeAggregationRequestValue {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<String>,
    pub include_lower: bool,
    pub include_upper: bool,
}

/// Raw bucket counts returned by the search engine for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResponse {
    pub id: String,
    #[serde(default)]
    pub values: Vec<AggregationResponseValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResponseValue {
    pub id: String,
    pub count: u64,
}

impl AggregationResponse {
    pub fn new(id: impl Into<String>, values: Vec<(&str, u64)>) -> Self {
        Self {
            id: id.into(),
            values: values
                .into_iter()
                .map(|(id, count)| AggregationResponseValue {
                    id: id.to_string(),
                    count,
                })
                .collect(),
        }
    }
}

/// Localized facet returned to the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    pub aggregation_type: String,
    pub field: String,
    pub items: Vec<AggregationItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<AggregationLabel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationItem {
    pub value: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_lower_bound: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_upper_bound: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_lower: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_upper: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<AggregationLabel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationLabel {
    /// `None` for labels embedded in the bucket id, which carry no language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub label: String,
}

impl AggregationLabel {
    pub fn new(language: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_id_prefers_id() {
        let req = AggregationRequest::Term(TermAggregationRequest {
            id: Some("weight-light".to_string()),
            field_name: Some("weight".to_string()),
            ..Default::default()
        });
        assert_eq!(req.effective_id(), Some("weight-light"));
    }

    #[test]
    fn test_effective_id_falls_back_to_field_name() {
        let req = AggregationRequest::Term(TermAggregationRequest {
            field_name: Some("color".to_string()),
            ..Default::default()
        });
        assert_eq!(req.effective_id(), Some("color"));

        let empty = AggregationRequest::Range(RangeAggregationRequest::default());
        assert_eq!(empty.effective_id(), None);
    }

    #[test]
    fn test_item_serialization_skips_absent_fields() {
        let item = AggregationItem {
            value: "red".to_string(),
            count: 3,
            ..Default::default()
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"value": "red", "count": 3}));
    }

    #[test]
    fn test_response_deserialization_defaults_values() {
        let resp: AggregationResponse =
            serde_json::from_value(serde_json::json!({"id": "color"})).unwrap();
        assert_eq!(resp.id, "color");
        assert!(resp.values.is_empty());
    }
}
