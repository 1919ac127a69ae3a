//! Localized labels for facet names and values

use crate::aggregations::{Aggregation, AggregationLabel};
use crate::error::{Error, Result};
use crate::filters::{eq_ignore_case, fold_case};
use crate::providers::{
    CatalogProperty, DictionaryItem, DictionaryItemSearch, DictionaryItemSearchCriteria,
    PropertyProvider,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub(crate) async fn add_labels(
    aggregations: &mut [Aggregation],
    catalog_id: &str,
    properties: &dyn PropertyProvider,
    dictionary: &dyn DictionaryItemSearch,
    dictionary_take: usize,
) -> Result<()> {
    let all_properties = properties
        .catalog_properties(catalog_id)
        .await
        .map_err(Error::Properties)?;

    for aggregation in aggregations.iter_mut() {
        // Several properties may share a name across categories
        let matched: Vec<&CatalogProperty> = all_properties
            .iter()
            .filter(|p| eq_ignore_case(&p.name, &aggregation.field))
            .collect();

        if matched.is_empty() {
            continue;
        }

        let property_labels = matched.iter().flat_map(|p| {
            p.display_names
                .iter()
                .map(|n| AggregationLabel::new(n.language_code.clone(), n.name.clone()))
        });
        aggregation.labels = first_label_per_language(property_labels);

        let criteria = DictionaryItemSearchCriteria {
            property_ids: matched.iter().map(|p| p.id.clone()).collect(),
            take: dictionary_take,
        };
        let items = dictionary
            .search(&criteria)
            .await
            .map_err(Error::DictionaryItems)?
            .results;

        debug!(
            field = %aggregation.field,
            properties = matched.len(),
            dictionary_items = items.len(),
            "Resolved facet labels"
        );

        let aliases = group_by_alias(&items);
        for item in aggregation.items.iter_mut() {
            if item.value.is_empty() {
                continue;
            }
            if let Some(entry) = aliases.get(&fold_case(&item.value)) {
                item.value = entry.alias.to_string();
                item.labels = first_label_per_language(entry.labels.iter().cloned());
            }
        }
    }

    Ok(())
}

struct AliasLabels<'a> {
    /// Spelling of the first dictionary item carrying this alias
    alias: &'a str,
    labels: Vec<AggregationLabel>,
}

/// Localized values of all dictionary items, grouped by alias ignoring case
fn group_by_alias(items: &[DictionaryItem]) -> HashMap<String, AliasLabels<'_>> {
    let mut map: HashMap<String, AliasLabels<'_>> = HashMap::new();
    for item in items {
        let entry = map
            .entry(fold_case(&item.alias))
            .or_insert_with(|| AliasLabels {
                alias: &item.alias,
                labels: Vec::new(),
            });
        entry.labels.extend(
            item.localized_values
                .iter()
                .map(|v| AggregationLabel::new(v.language_code.clone(), v.value.clone())),
        );
    }
    map
}

/// One label per language: the smallest label of each language, sorted by
/// language. Labels without a language or text are dropped; `None` when
/// nothing is left.
pub fn first_label_per_language(
    labels: impl IntoIterator<Item = AggregationLabel>,
) -> Option<Vec<AggregationLabel>> {
    let mut labels: Vec<(String, AggregationLabel)> = labels
        .into_iter()
        .filter(|l| !l.label.is_empty())
        .filter_map(|l| {
            let language = fold_case(l.language.as_deref()?);
            (!language.is_empty()).then_some((language, l))
        })
        .collect();

    labels.sort_by(|(a_lang, a), (b_lang, b)| {
        a_lang.cmp(b_lang).then_with(|| a.label.cmp(&b.label))
    });

    let mut seen = HashSet::new();
    let result: Vec<AggregationLabel> = labels
        .into_iter()
        .filter(|(language, _)| seen.insert(language.clone()))
        .map(|(_, label)| label)
        .collect();

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregations::AggregationItem;
    use crate::providers::{
        DictionaryItemLocalizedValue, PropertyDisplayName, StaticDictionaryItemSearch,
        StaticPropertyProvider,
    };

    fn label(language: &str, text: &str) -> AggregationLabel {
        AggregationLabel::new(language, text)
    }

    fn property(id: &str, name: &str, names: &[(&str, &str)]) -> CatalogProperty {
        CatalogProperty {
            id: id.to_string(),
            name: name.to_string(),
            display_names: names
                .iter()
                .map(|(lang, name)| PropertyDisplayName {
                    language_code: lang.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn dictionary_item(property_id: &str, alias: &str, values: &[(&str, &str)]) -> DictionaryItem {
        DictionaryItem {
            property_id: property_id.to_string(),
            alias: alias.to_string(),
            localized_values: values
                .iter()
                .map(|(lang, value)| DictionaryItemLocalizedValue {
                    language_code: lang.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    fn aggregation(field: &str, values: &[&str]) -> Aggregation {
        Aggregation {
            aggregation_type: "attr".to_string(),
            field: field.to_string(),
            items: values
                .iter()
                .map(|v| AggregationItem {
                    value: v.to_string(),
                    count: 1,
                    ..Default::default()
                })
                .collect(),
            labels: None,
        }
    }

    #[test]
    fn test_smallest_label_wins_per_language() {
        let result = first_label_per_language(vec![
            label("fr", "Rouge"),
            label("en", "Red"),
            label("en", "Crimson"),
        ])
        .unwrap();

        assert_eq!(result, vec![label("en", "Crimson"), label("fr", "Rouge")]);
    }

    #[test]
    fn test_languages_compared_ignoring_case() {
        let result =
            first_label_per_language(vec![label("en-US", "Size"), label("EN-us", "Dimension")])
                .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].label, "Dimension");
    }

    #[test]
    fn test_empty_labels_are_none() {
        assert_eq!(first_label_per_language(Vec::<AggregationLabel>::new()), None);
        assert_eq!(
            first_label_per_language(vec![
                label("", "Red"),
                label("en", ""),
                AggregationLabel {
                    language: None,
                    label: "Red".to_string(),
                },
            ]),
            None
        );
    }

    #[tokio::test]
    async fn test_add_labels_for_property_and_dictionary_values() {
        let properties = StaticPropertyProvider::new(vec![
            property("p1", "Color", &[("en", "Colour"), ("de", "Farbe")]),
            property("p2", "color", &[("en", "Color")]),
            property("p3", "size", &[("en", "Size")]),
        ]);
        let dictionary = StaticDictionaryItemSearch::new(vec![
            dictionary_item("p1", "Red", &[("en", "Red"), ("de", "Rot")]),
            dictionary_item("p2", "RED", &[("fr", "Rouge")]),
            dictionary_item("p3", "blue", &[("en", "Blue")]),
            dictionary_item("p1", "", &[("en", "Unnamed")]),
        ]);

        let mut aggregations = vec![aggregation("color", &["red", "blue", "green", ""])];
        add_labels(&mut aggregations, "catalog", &properties, &dictionary, 100)
            .await
            .unwrap();

        let agg = &aggregations[0];
        assert_eq!(
            agg.labels,
            Some(vec![label("de", "Farbe"), label("en", "Color")])
        );

        assert_eq!(agg.items[0].value, "Red");
        assert_eq!(
            agg.items[0].labels,
            Some(vec![
                label("de", "Rot"),
                label("en", "Red"),
                label("fr", "Rouge")
            ])
        );
        // "blue" belongs to another property's dictionary
        assert_eq!(agg.items[1].value, "blue");
        assert_eq!(agg.items[1].labels, None);
        assert_eq!(agg.items[2].labels, None);
        // Empty bucket values are never matched, not even against an empty alias
        assert_eq!(agg.items[3].value, "");
        assert_eq!(agg.items[3].labels, None);
    }

    #[tokio::test]
    async fn test_add_labels_matches_non_ascii_alias() {
        let properties =
            StaticPropertyProvider::new(vec![property("p1", "Früchte", &[("de", "Früchte")])]);
        let dictionary = StaticDictionaryItemSearch::new(vec![dictionary_item(
            "p1",
            "Äpfel",
            &[("de", "Äpfel"), ("en", "Apples")],
        )]);

        let mut aggregations = vec![aggregation("FRÜCHTE", &["äpfel"])];
        add_labels(&mut aggregations, "catalog", &properties, &dictionary, 100)
            .await
            .unwrap();

        let agg = &aggregations[0];
        assert_eq!(agg.labels, Some(vec![label("de", "Früchte")]));
        assert_eq!(agg.items[0].value, "Äpfel");
        assert_eq!(
            agg.items[0].labels,
            Some(vec![label("de", "Äpfel"), label("en", "Apples")])
        );
    }

    #[tokio::test]
    async fn test_unmatched_field_keeps_labels_unset() {
        let properties =
            StaticPropertyProvider::new(vec![property("p1", "color", &[("en", "Color")])]);
        let dictionary = StaticDictionaryItemSearch::default();

        let mut aggregations = vec![aggregation("brand", &["acme"])];
        add_labels(&mut aggregations, "catalog", &properties, &dictionary, 100)
            .await
            .unwrap();

        assert_eq!(aggregations[0].labels, None);
        assert_eq!(aggregations[0].items[0].value, "acme");
    }

    #[tokio::test]
    async fn test_property_without_display_names_has_no_labels() {
        let properties = StaticPropertyProvider::new(vec![property("p1", "color", &[])]);
        let dictionary = StaticDictionaryItemSearch::default();

        let mut aggregations = vec![aggregation("color", &["red"])];
        add_labels(&mut aggregations, "catalog", &properties, &dictionary, 100)
            .await
            .unwrap();

        assert_eq!(aggregations[0].labels, None);
    }
}
