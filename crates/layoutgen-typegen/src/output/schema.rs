//! Type/validator module builder.
//!
//! Statement order: primary schema, one schema per portal, the portal
//! aggregate (only with portals), then every non-empty value list.

use super::{
    GenerationUnit, portals_type_name, portals_validator_name, type_name, validator_name,
    value_list_type_name, value_list_validator_name,
};
use crate::ir::{Backend, SchemaEntry, ValueList};
use crate::lower::{lower, value_list_type, value_list_validator, z};
use crate::sanitize::sanitize;
use layoutgen_syntax::{Document, Expr, Stmt, Type};
use std::collections::HashSet;

/// Build the schema module for `unit` in its backend.
pub fn build_schema_module(unit: &GenerationUnit) -> Document {
    match unit.backend {
        Backend::Validator => build_validator_module(unit),
        Backend::TypesOnly => build_types_module(unit),
    }
}

fn build_validator_module(unit: &GenerationUnit) -> Document {
    let mut doc = Document::new(vec![Stmt::import(vec!["z".into()], "zod")]);

    doc.extend(validator_pair(unit, &unit.schema_name, &unit.schema));
    for portal in &unit.portals {
        doc.extend(validator_pair(unit, &portal.schema_name, &portal.schema));
    }

    if unit.has_portals() {
        let members = unit
            .portals
            .iter()
            .map(|portal| {
                let item = Expr::ident(validator_name(&portal.schema_name));
                (portal.schema_name.clone(), z("array", vec![item]))
            })
            .collect();
        let name = portals_validator_name(&unit.schema_name);
        doc.push(Stmt::export_const(
            &name,
            z("object", vec![Expr::object_multiline(members)]),
        ));
        doc.push(Stmt::export_type(
            portals_type_name(&unit.schema_name),
            infer(&name),
        ));
    }

    for list in emitted_value_lists(&unit.value_lists) {
        let name = value_list_validator_name(&list.name);
        doc.push(Stmt::export_const(&name, value_list_validator(&list.values)));
        doc.push(Stmt::export_type(value_list_type_name(&list.name), infer(&name)));
    }

    doc
}

fn build_types_module(unit: &GenerationUnit) -> Document {
    let mut doc = Document::default();

    doc.push(object_type(unit, &unit.schema_name, &unit.schema));
    for portal in &unit.portals {
        doc.push(object_type(unit, &portal.schema_name, &portal.schema));
    }

    if unit.has_portals() {
        let members = unit
            .portals
            .iter()
            .map(|portal| {
                let item = Type::reference(type_name(&portal.schema_name));
                (portal.schema_name.clone(), Type::array(item))
            })
            .collect();
        doc.push(Stmt::export_type(
            portals_type_name(&unit.schema_name),
            Type::Object(members),
        ));
    }

    for list in emitted_value_lists(&unit.value_lists) {
        doc.push(Stmt::export_type(
            value_list_type_name(&list.name),
            value_list_type(&list.values),
        ));
    }

    doc
}

/// `export const Z<name> = z.object({...});` and its inferred `T<name>`.
fn validator_pair(unit: &GenerationUnit, name: &str, schema: &[SchemaEntry]) -> [Stmt; 2] {
    let members = schema
        .iter()
        .filter_map(|entry| {
            let lowered = lower(entry, unit.strict_numbers, unit.backend);
            lowered.validator.map(|validator| (entry.name.clone(), validator))
        })
        .collect();
    let z_name = validator_name(name);
    [
        Stmt::export_const(&z_name, z("object", vec![Expr::object_multiline(members)])),
        Stmt::export_type(type_name(name), infer(&z_name)),
    ]
}

/// `export type T<name> = { field: type; ... };`
fn object_type(unit: &GenerationUnit, name: &str, schema: &[SchemaEntry]) -> Stmt {
    let members = schema
        .iter()
        .map(|entry| {
            let lowered = lower(entry, unit.strict_numbers, unit.backend);
            (entry.name.clone(), lowered.ty)
        })
        .collect();
    Stmt::export_type(type_name(name), Type::Object(members))
}

/// `z.infer<typeof name>`
fn infer(validator: &str) -> Type {
    Type::generic("z.infer", vec![Type::type_of(validator)])
}

/// Value lists worth emitting: at least one member, and an identifier not
/// already taken by an earlier list.
fn emitted_value_lists(lists: &[ValueList]) -> impl Iterator<Item = &ValueList> {
    let mut taken = HashSet::new();
    lists.iter().filter(move |list| {
        if list.values.is_empty() {
            return false;
        }
        if !taken.insert(sanitize(&list.name)) {
            tracing::warn!(value_list = %list.name, "value list name collides after sanitizing, skipped");
            return false;
        }
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::NormalizedLayout;
    use crate::ir::{FieldKind, PortalSchema};
    use crate::output::EnvNames;
    use layoutgen_syntax::TypeScriptWriter;

    fn person_with_orders(backend: Backend) -> GenerationUnit {
        let layout = NormalizedLayout {
            schema: vec![
                SchemaEntry::new("name", FieldKind::String),
                SchemaEntry::new("age", FieldKind::FmNumber),
            ],
            portals: vec![PortalSchema {
                schema_name: "Order".into(),
                schema: vec![SchemaEntry::new("Order::total", FieldKind::FmNumber)],
            }],
            value_lists: vec![],
        };
        GenerationUnit::new("Person", "Person", layout, backend, EnvNames::default())
    }

    fn print(unit: &GenerationUnit) -> String {
        TypeScriptWriter::emit(&build_schema_module(unit))
    }

    #[test]
    fn types_only_portal_aggregate() {
        let out = print(&person_with_orders(Backend::TypesOnly));
        assert!(out.contains("export type TPerson = {\n  name: string;\n  age: number | string;\n};"));
        assert!(out.contains("export type TOrder = {\n  \"Order::total\": number | string;\n};"));
        assert!(out.contains("export type TPersonPortals = {\n  Order: TOrder[];\n};"));
        assert!(!out.contains("zod"));
    }

    #[test]
    fn validator_portal_aggregate_wraps_in_array() {
        let out = print(&person_with_orders(Backend::Validator));
        assert!(out.starts_with("import { z } from \"zod\";\n"));
        assert!(out.contains("export const ZPersonPortals = z.object({\n  Order: z.array(ZOrder),\n});"));
        assert!(out.contains("export type TPersonPortals = z.infer<typeof ZPersonPortals>;"));
    }

    #[test]
    fn no_portals_no_aggregate() {
        let mut unit = person_with_orders(Backend::Validator);
        unit.portals.clear();
        let out = print(&unit);
        assert!(!out.contains("Portals"));
    }

    #[test]
    fn empty_and_colliding_value_lists_are_skipped() {
        let mut unit = person_with_orders(Backend::Validator);
        unit.value_lists = vec![
            ValueList::new("Yes No", vec!["Yes", "No"]),
            ValueList::new("Empty", vec![]),
            ValueList::new("YesNo", vec!["Y", "N"]),
        ];
        let out = print(&unit);
        assert!(out.contains("export const ZVLYesNo = z.enum([\"Yes\", \"No\"]);"));
        assert!(out.contains("export type TVLYesNo = z.infer<typeof ZVLYesNo>;"));
        assert!(!out.contains("ZVLEmpty"));
        assert_eq!(out.matches("export const ZVLYesNo").count(), 1);
    }

    #[test]
    fn types_only_value_list_is_exported_union() {
        let mut unit = person_with_orders(Backend::TypesOnly);
        unit.value_lists = vec![ValueList::new("Sizes", vec!["S", "M"])];
        let out = print(&unit);
        assert!(out.ends_with("export type TVLSizes = \"S\" | \"M\";\n"));
    }

    #[test]
    fn strict_numbers_reach_both_backends() {
        let mut unit = person_with_orders(Backend::Validator);
        unit.strict_numbers = true;
        let out = print(&unit);
        assert!(out.contains("  age: z.coerce.number().nullable().catch(null),\n"));
        assert!(out.contains("  \"Order::total\": z.coerce.number().nullable().catch(null),\n"));

        unit.backend = Backend::TypesOnly;
        let out = print(&unit);
        assert!(out.contains("  age: number | null;\n"));
        assert!(out.contains("  \"Order::total\": number | null;\n"));
    }

    #[test]
    fn identifiers_use_sanitized_schema_name() {
        let mut unit = person_with_orders(Backend::Validator);
        unit.schema_name = "2024 Sales Data".into();
        let out = print(&unit);
        assert!(out.contains("export const ZSalesData = z.object({"));
        assert!(out.contains("export type TSalesData = z.infer<typeof ZSalesData>;"));
        assert!(out.contains("export const ZSalesDataPortals"));
    }
}
