//! Layout metadata to canonical schema.

use crate::ir::{
    FieldDescriptor, FieldKind, LayoutMetadata, PortalSchema, SchemaEntry, ValueList,
    ValueListMode,
};
use std::collections::HashSet;

/// Canonical schemas for one layout plus the value-list catalog to emit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedLayout {
    pub schema: Vec<SchemaEntry>,
    pub portals: Vec<PortalSchema>,
    /// Deduplicated catalog, empty when the source sent none.
    pub value_lists: Vec<ValueList>,
}

/// Normalize every field list of a layout.
///
/// Portals come out in name order.
pub fn normalize_layout(meta: &LayoutMetadata, mode: ValueListMode) -> NormalizedLayout {
    let catalog = meta.value_lists.as_deref().map(dedupe_value_lists);
    let catalog_ref = catalog.as_deref();

    let schema = normalize_fields(&meta.fields, catalog_ref, mode);
    let portals = meta
        .portals
        .iter()
        .map(|(name, fields)| PortalSchema {
            schema_name: name.clone(),
            schema: normalize_fields(fields, catalog_ref, mode),
        })
        .collect();

    NormalizedLayout {
        schema,
        portals,
        value_lists: catalog.unwrap_or_default(),
    }
}

/// Build a canonical schema from raw field descriptors.
///
/// The first descriptor with a given name wins; later duplicates are dropped
/// without error. A field becomes a value list only when a catalog is
/// available, the mode is not [`ValueListMode::Ignore`], and the catalog has
/// an entry with the field's value-list name.
pub fn normalize_fields(
    fields: &[FieldDescriptor],
    catalog: Option<&[ValueList]>,
    mode: ValueListMode,
) -> Vec<SchemaEntry> {
    let mut seen = HashSet::new();
    let mut schema = Vec::with_capacity(fields.len());

    for field in fields {
        if !seen.insert(field.name.as_str()) {
            tracing::debug!(field = %field.name, "dropping duplicate field");
            continue;
        }
        schema.push(SchemaEntry {
            name: field.name.clone(),
            kind: field_kind(field, catalog, mode),
        });
    }
    schema
}

fn field_kind(
    field: &FieldDescriptor,
    catalog: Option<&[ValueList]>,
    mode: ValueListMode,
) -> FieldKind {
    if let Some(values) = value_list_values(field, catalog, mode) {
        return FieldKind::ValueList { values };
    }
    if field.result == "number" {
        FieldKind::FmNumber
    } else {
        FieldKind::String
    }
}

fn value_list_values(
    field: &FieldDescriptor,
    catalog: Option<&[ValueList]>,
    mode: ValueListMode,
) -> Option<Vec<String>> {
    if mode == ValueListMode::Ignore {
        return None;
    }
    let list_name = field.value_list.as_deref()?;
    let list = catalog?.iter().find(|vl| vl.name == list_name)?;

    let mut values = list.values.clone();
    if mode == ValueListMode::AllowEmpty && !values.iter().any(String::is_empty) {
        values.push(String::new());
    }
    Some(values)
}

/// Deduplicate a value-list catalog by name, first entry wins.
pub fn dedupe_value_lists(lists: &[ValueList]) -> Vec<ValueList> {
    let mut seen = HashSet::new();
    lists
        .iter()
        .filter(|vl| seen.insert(vl.name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn statuses() -> Vec<ValueList> {
        vec![ValueList::new("Statuses", vec!["Open", "Closed"])]
    }

    #[test]
    fn number_and_text() {
        let fields = vec![
            FieldDescriptor::new("id", "number"),
            FieldDescriptor::new("name", "text"),
            FieldDescriptor::new("created", "timestamp"),
            FieldDescriptor::new("blank", ""),
        ];
        let schema = normalize_fields(&fields, None, ValueListMode::Strict);
        let kinds: Vec<_> = schema.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::FmNumber,
                FieldKind::String,
                FieldKind::String,
                FieldKind::String
            ]
        );
    }

    #[test]
    fn duplicate_names_first_wins() {
        let fields = vec![
            FieldDescriptor::new("a", "number"),
            FieldDescriptor::new("b", "text"),
            FieldDescriptor::new("a", "text"),
        ];
        let schema = normalize_fields(&fields, None, ValueListMode::Ignore);
        assert_eq!(
            schema,
            vec![
                SchemaEntry::new("a", FieldKind::FmNumber),
                SchemaEntry::new("b", FieldKind::String),
            ]
        );
    }

    #[test]
    fn value_list_strict() {
        let catalog = statuses();
        let fields = vec![FieldDescriptor::new("status", "text").with_value_list("Statuses")];
        let schema = normalize_fields(&fields, Some(&catalog), ValueListMode::Strict);
        assert_eq!(
            schema[0].kind,
            FieldKind::ValueList {
                values: vec!["Open".into(), "Closed".into()]
            }
        );
    }

    #[test]
    fn value_list_allow_empty_appends_empty_string() {
        let catalog = statuses();
        let fields = vec![FieldDescriptor::new("status", "text").with_value_list("Statuses")];
        let schema = normalize_fields(&fields, Some(&catalog), ValueListMode::AllowEmpty);
        assert_eq!(
            schema[0].kind,
            FieldKind::ValueList {
                values: vec!["Open".into(), "Closed".into(), String::new()]
            }
        );
    }

    #[test]
    fn value_list_ignored() {
        let catalog = statuses();
        let fields = vec![FieldDescriptor::new("status", "number").with_value_list("Statuses")];
        let schema = normalize_fields(&fields, Some(&catalog), ValueListMode::Ignore);
        assert_eq!(schema[0].kind, FieldKind::FmNumber);
    }

    #[test]
    fn value_list_without_catalog_or_entry() {
        let fields = vec![FieldDescriptor::new("status", "text").with_value_list("Statuses")];
        let without_catalog = normalize_fields(&fields, None, ValueListMode::Strict);
        assert_eq!(without_catalog[0].kind, FieldKind::String);

        let other = vec![ValueList::new("Other", vec!["x"])];
        let unknown_entry = normalize_fields(&fields, Some(&other), ValueListMode::Strict);
        assert_eq!(unknown_entry[0].kind, FieldKind::String);
    }

    #[test]
    fn catalog_dedup_first_wins() {
        let lists = vec![
            ValueList::new("Statuses", vec!["Open"]),
            ValueList::new("Sizes", vec!["S", "M"]),
            ValueList::new("Statuses", vec!["Closed"]),
        ];
        let deduped = dedupe_value_lists(&lists);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].values, vec!["Open"]);

        let fields = vec![FieldDescriptor::new("status", "text").with_value_list("Statuses")];
        let schema = normalize_fields(&fields, Some(&deduped), ValueListMode::Strict);
        assert_eq!(
            schema[0].kind,
            FieldKind::ValueList {
                values: vec!["Open".into()]
            }
        );
    }

    #[test]
    fn layout_with_portals() {
        let mut portals = BTreeMap::new();
        portals.insert(
            "Order".to_string(),
            vec![
                FieldDescriptor::new("Order::total", "number"),
                FieldDescriptor::new("Order::total", "text"),
            ],
        );
        let meta = LayoutMetadata {
            fields: vec![FieldDescriptor::new("name", "text")],
            portals,
            value_lists: Some(statuses()),
        };

        let layout = normalize_layout(&meta, ValueListMode::Ignore);
        assert_eq!(layout.schema, vec![SchemaEntry::new("name", FieldKind::String)]);
        assert_eq!(layout.portals.len(), 1);
        assert_eq!(layout.portals[0].schema_name, "Order");
        assert_eq!(
            layout.portals[0].schema,
            vec![SchemaEntry::new("Order::total", FieldKind::FmNumber)]
        );
        assert_eq!(layout.value_lists, statuses());
    }

    #[test]
    fn layout_without_catalog() {
        let meta = LayoutMetadata {
            fields: vec![FieldDescriptor::new("name", "text")],
            ..Default::default()
        };
        let layout = normalize_layout(&meta, ValueListMode::Strict);
        assert!(layout.portals.is_empty());
        assert!(layout.value_lists.is_empty());
    }
}
