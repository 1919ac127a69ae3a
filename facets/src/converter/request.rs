//! Browse filters → aggregation requests

use crate::aggregations::{
    AggregationRequest, RangeAggregationRequest, RangeAggregationRequestValue,
    TermAggregationRequest,
};
use crate::filters::{AttributeFilter, PriceRangeFilter, RangeFilter, RangeFilterValue};
use crate::search::{and, SearchFilter};

/// Term request over the attribute's field, restricted to the configured
/// values when there are any
pub(crate) fn attribute_request(
    filter: &AttributeFilter,
    existing: Vec<SearchFilter>,
) -> AggregationRequest {
    let values = if filter.values.is_empty() {
        None
    } else {
        Some(filter.values.iter().map(|v| v.id.clone()).collect())
    };

    AggregationRequest::Term(TermAggregationRequest {
        id: None,
        field_name: Some(filter.key.clone()),
        values,
        filter: and(existing, None),
        size: filter.facet_size,
    })
}

/// One counting request per bucket, each filtered by the bucket's own range
pub(crate) fn range_requests(
    filter: &RangeFilter,
    existing: &[SearchFilter],
) -> Vec<AggregationRequest> {
    filter
        .values
        .iter()
        .map(|value| range_value_request(&filter.key, value, existing))
        .collect()
}

fn range_value_request(
    field_name: &str,
    value: &RangeFilterValue,
    existing: &[SearchFilter],
) -> AggregationRequest {
    let value_filter = SearchFilter::range(
        field_name,
        value.lower.as_deref(),
        value.upper.as_deref(),
        value.include_lower,
        value.include_upper,
    );

    AggregationRequest::Term(TermAggregationRequest {
        id: Some(bucket_id(field_name, &value.id)),
        field_name: None,
        values: None,
        filter: and(existing.iter().cloned(), Some(value_filter)),
        size: None,
    })
}

/// All price buckets merged into a single range request on the currency's
/// price field. Returns `None` when the filter has no buckets: no request is
/// sent at all, rather than a range request with id `"{key}-"` and no values.
pub(crate) fn price_range_request(
    filter: &PriceRangeFilter,
    price_field_prefix: &str,
    existing: Vec<SearchFilter>,
) -> Option<AggregationRequest> {
    if filter.values.is_empty() {
        return None;
    }

    let values: Vec<RangeAggregationRequestValue> = filter
        .values
        .iter()
        .map(|v| RangeAggregationRequestValue {
            id: v.id.clone(),
            lower: v.lower.clone(),
            upper: v.upper.clone(),
            include_lower: v.include_lower,
            include_upper: v.include_upper,
        })
        .collect();

    let ids: Vec<&str> = values.iter().map(|v| v.id.as_str()).collect();

    Some(AggregationRequest::Range(RangeAggregationRequest {
        id: Some(format!("{}-{}", filter.key, ids.join("-"))),
        field_name: Some(price_field_name(
            price_field_prefix,
            filter.currency.as_deref(),
        )),
        values,
        filter: and(existing, None),
    }))
}

/// `price_usd` for `USD`, plain `price` without a currency
pub(crate) fn price_field_name(prefix: &str, currency: Option<&str>) -> String {
    let name = match currency {
        Some(currency) if !currency.is_empty() => format!("{}_{}", prefix, currency),
        _ => prefix.to_string(),
    };
    name.to_lowercase()
}

/// Identifier correlating a range bucket's request and response
pub(crate) fn bucket_id(key: &str, value_id: &str) -> String {
    format!("{}-{}", key, value_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::AttributeFilterValue;

    fn brand_filter() -> SearchFilter {
        SearchFilter::term("brand", vec!["acme".to_string()])
    }

    #[test]
    fn test_attribute_request_without_values() {
        let filter = AttributeFilter {
            key: "color".to_string(),
            values: vec![],
            facet_size: Some(25),
        };

        match attribute_request(&filter, vec![brand_filter()]) {
            AggregationRequest::Term(req) => {
                assert_eq!(req.id, None);
                assert_eq!(req.field_name.as_deref(), Some("color"));
                assert_eq!(req.values, None);
                assert_eq!(req.size, Some(25));
                assert_eq!(req.filter, Some(brand_filter()));
            }
            other => panic!("Expected Term, got {:?}", other),
        }
    }

    #[test]
    fn test_attribute_request_with_values() {
        let filter = AttributeFilter {
            key: "color".to_string(),
            values: vec![AttributeFilterValue::new("red"), AttributeFilterValue::new("blue")],
            facet_size: None,
        };

        match attribute_request(&filter, vec![]) {
            AggregationRequest::Term(req) => {
                assert_eq!(
                    req.values,
                    Some(vec!["red".to_string(), "blue".to_string()])
                );
                assert_eq!(req.filter, None);
            }
            other => panic!("Expected Term, got {:?}", other),
        }
    }

    #[test]
    fn test_range_requests_one_per_bucket() {
        let filter = RangeFilter {
            key: "weight".to_string(),
            values: vec![
                RangeFilterValue::new("light", None, Some("10")),
                RangeFilterValue::new("heavy", Some("10"), None),
            ],
        };

        let requests = range_requests(&filter, &[brand_filter()]);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].effective_id(), Some("weight-light"));
        assert_eq!(requests[1].effective_id(), Some("weight-heavy"));

        let expected = SearchFilter::And {
            filters: vec![
                brand_filter(),
                SearchFilter::range("weight", None, Some("10"), true, false),
            ],
        };
        assert_eq!(requests[0].filter(), Some(&expected));
    }

    #[test]
    fn test_price_range_request_merges_buckets() {
        let filter = PriceRangeFilter {
            key: "price".to_string(),
            currency: Some("USD".to_string()),
            values: vec![
                RangeFilterValue::new("0-50", Some("0"), Some("50")),
                RangeFilterValue::new("50-100", Some("50"), Some("100")),
            ],
        };

        match price_range_request(&filter, "price", vec![]) {
            Some(AggregationRequest::Range(req)) => {
                assert_eq!(req.id.as_deref(), Some("price-0-50-50-100"));
                assert_eq!(req.field_name.as_deref(), Some("price_usd"));
                assert_eq!(req.values.len(), 2);
                assert_eq!(req.values[1].lower.as_deref(), Some("50"));
                assert_eq!(req.filter, None);
            }
            other => panic!("Expected Range, got {:?}", other),
        }
    }

    #[test]
    fn test_price_range_request_without_buckets() {
        let filter = PriceRangeFilter {
            key: "price".to_string(),
            currency: Some("USD".to_string()),
            values: vec![],
        };
        assert!(price_range_request(&filter, "price", vec![]).is_none());
    }

    #[test]
    fn test_price_field_name() {
        assert_eq!(price_field_name("price", Some("EUR")), "price_eur");
        assert_eq!(price_field_name("price", Some("")), "price");
        assert_eq!(price_field_name("Price", None), "price");
    }
}
