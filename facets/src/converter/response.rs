//! Aggregation responses → facet results

use super::request::bucket_id;
use crate::aggregations::{
    Aggregation, AggregationItem, AggregationLabel, AggregationResponse,
    AggregationResponseValue, ATTRIBUTE_AGGREGATION,
};
use crate::filters::{eq_ignore_case, fold_case, AttributeFilter, RangeFilterValue};
use std::collections::HashSet;

pub(crate) fn attribute_aggregation(
    filter: &AttributeFilter,
    responses: &[AggregationResponse],
    label_delimiter: &str,
) -> Option<Aggregation> {
    let field_name = &filter.key;
    let response = find_response(responses, field_name)?;

    let values: Vec<&AggregationResponseValue> = if filter.values.is_empty() {
        response.values.iter().collect()
    } else {
        distinct_by_id(filter.values.iter().map(|v| v.id.as_str()))
            .into_iter()
            .filter_map(|id| response.values.iter().find(|v| eq_ignore_case(&v.id, id)))
            .collect()
    };

    if values.is_empty() {
        return None;
    }

    Some(Aggregation {
        aggregation_type: ATTRIBUTE_AGGREGATION.to_string(),
        field: field_name.clone(),
        items: values
            .into_iter()
            .map(|v| attribute_item(v, label_delimiter))
            .collect(),
        labels: None,
    })
}

/// Range and price range facets share the per-bucket lookup
pub(crate) fn range_aggregation(
    aggregation_type: &str,
    key: &str,
    values: &[RangeFilterValue],
    responses: &[AggregationResponse],
) -> Aggregation {
    Aggregation {
        aggregation_type: aggregation_type.to_string(),
        field: key.to_string(),
        items: range_items(key, values, responses),
        labels: None,
    }
}

/// Splits `value<delim>label` bucket ids into a value and an unlocalized label.
/// An empty segment after the delimiter (`red___`) counts as no label, and
/// the raw id is kept as the value.
fn attribute_item(value: &AggregationResponseValue, label_delimiter: &str) -> AggregationItem {
    let mut parts = value.id.split(label_delimiter);
    let head = parts.next();
    let label = parts.next().filter(|label| !label.is_empty());

    match (head, label) {
        (Some(head), Some(label)) => AggregationItem {
            value: head.to_string(),
            count: value.count,
            labels: Some(vec![AggregationLabel {
                language: None,
                label: label.to_string(),
            }]),
            ..Default::default()
        },
        _ => AggregationItem {
            value: value.id.clone(),
            count: value.count,
            ..Default::default()
        },
    }
}

fn range_items(
    key: &str,
    values: &[RangeFilterValue],
    responses: &[AggregationResponse],
) -> Vec<AggregationItem> {
    let mut items = Vec::new();
    let mut seen = HashSet::new();

    for range_value in values {
        if !seen.insert(fold_case(&range_value.id)) {
            continue;
        }

        let response_id = bucket_id(key, &range_value.id);
        let Some(first) = find_response(responses, &response_id).and_then(|r| r.values.first())
        else {
            tracing::trace!(bucket = %response_id, "No response for range bucket");
            continue;
        };

        items.push(AggregationItem {
            value: range_value.id.clone(),
            count: first.count,
            requested_lower_bound: non_empty(range_value.lower.as_deref()),
            requested_upper_bound: non_empty(range_value.upper.as_deref()),
            include_lower: Some(range_value.include_lower),
            include_upper: Some(range_value.include_upper),
            labels: None,
        });
    }

    items
}

fn find_response<'a>(
    responses: &'a [AggregationResponse],
    id: &str,
) -> Option<&'a AggregationResponse> {
    responses.iter().find(|r| eq_ignore_case(&r.id, id))
}

/// First occurrence of each id, ignoring case, in input order
fn distinct_by_id<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(fold_case(id))).collect()
}

fn non_empty(bound: Option<&str>) -> Option<String> {
    bound.filter(|b| !b.is_empty()).map(str::to_string)
}
