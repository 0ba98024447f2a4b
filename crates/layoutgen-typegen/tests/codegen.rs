//! Integration tests for layoutgen-typegen.

use layoutgen_syntax::{Expr, GENERATED_BANNER, TYPESCRIPT_WRITER, TypeScriptWriter, Writer};
use layoutgen_typegen::{
    Backend, ClientTarget, EnvNames, GenerationUnit, LayoutMetadata, ValueListMode,
    build_client_module, build_index_module, build_schema_module, normalize_layout,
};

fn load_fixture(name: &str) -> LayoutMetadata {
    let path = format!("tests/fixtures/{}.json", name);
    let content =
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("fixture {} not found", name));
    serde_json::from_str(&content).expect("invalid JSON")
}

fn customer(backend: Backend, mode: ValueListMode) -> GenerationUnit {
    let layout = normalize_layout(&load_fixture("customer"), mode);
    GenerationUnit::new("Customer", "API Customer", layout, backend, EnvNames::default())
}

// === Schema module ===

#[test]
fn validator_schema_strict_allow_empty() {
    let unit = customer(Backend::Validator, ValueListMode::AllowEmpty).with_strict_numbers(true);
    let output = TypeScriptWriter::emit(&build_schema_module(&unit));

    insta::assert_snapshot!(output, @r#"
    import { z } from "zod";
    export const ZCustomer = z.object({
      id: z.coerce.number().nullable().catch(null),
      name: z.string(),
      status: z.enum(["Active", "Inactive", ""]),
      "Invoice Total": z.coerce.number().nullable().catch(null),
    });
    export type TCustomer = z.infer<typeof ZCustomer>;
    export const ZOrders = z.object({
      "Orders::id": z.coerce.number().nullable().catch(null),
      "Orders::note": z.string(),
    });
    export type TOrders = z.infer<typeof ZOrders>;
    export const ZCustomerPortals = z.object({
      Orders: z.array(ZOrders),
    });
    export type TCustomerPortals = z.infer<typeof ZCustomerPortals>;
    export const ZVLStatuses = z.enum(["Active", "Inactive"]);
    export type TVLStatuses = z.infer<typeof ZVLStatuses>;
    "#);
}

#[test]
fn types_only_schema_lenient_ignore() {
    let unit = customer(Backend::TypesOnly, ValueListMode::Ignore);
    let output = TypeScriptWriter::emit(&build_schema_module(&unit));

    insta::assert_snapshot!(output, @r#"
    export type TCustomer = {
      id: number | string;
      name: string;
      status: string;
      "Invoice Total": number | string;
    };
    export type TOrders = {
      "Orders::id": number | string;
      "Orders::note": string;
    };
    export type TCustomerPortals = {
      Orders: TOrders[];
    };
    export type TVLStatuses = "Active" | "Inactive";
    "#);
}

#[test]
fn portal_aggregation() {
    let layout = normalize_layout(&load_fixture("person"), ValueListMode::Ignore);
    let unit = GenerationUnit::new("Person", "Person", layout, Backend::TypesOnly, EnvNames::default());
    let output = TypeScriptWriter::emit(&build_schema_module(&unit));

    insta::assert_snapshot!(output, @r"
    export type TPerson = {
      name: string;
      age: number | string;
    };
    export type TOrder = {
      total: number | string;
    };
    export type TPersonPortals = {
      Order: TOrder[];
    };
    ");
}

// === Client module ===

#[test]
fn standard_client_with_token_store() {
    let unit = customer(Backend::Validator, ValueListMode::Ignore).with_target(
        ClientTarget::Standard {
            token_store: Some(Expr::call(Expr::ident("makeStore"), vec![])),
        },
    );
    let output = TypeScriptWriter::emit(&build_client_module(&unit));

    insta::assert_snapshot!(output, @r#"
    import { DataApi } from "@proofgeist/fmdapi";
    import { TCustomer, TCustomerPortals, ZCustomer, ZCustomerPortals } from "../Customer";
    if (!process.env.FM_DATABASE) throw new Error("Missing env var: FM_DATABASE");
    if (!process.env.FM_SERVER) throw new Error("Missing env var: FM_SERVER");
    if (!process.env.OTTO_API_KEY) throw new Error("Missing env var: OTTO_API_KEY");
    export const client = DataApi<any, TCustomer, TCustomerPortals>({
      auth: { apiKey: process.env.OTTO_API_KEY },
      db: process.env.FM_DATABASE,
      server: process.env.FM_SERVER,
      layout: "API Customer",
      tokenStore: makeStore(),
    }, {
      fieldData: ZCustomer,
      portalData: ZCustomerPortals,
    });
    "#);
}

#[test]
fn web_viewer_client() {
    let unit = customer(Backend::TypesOnly, ValueListMode::Ignore).with_target(
        ClientTarget::WebViewer {
            script_name: "ExecuteDataApi".into(),
        },
    );
    let output = TypeScriptWriter::emit(&build_client_module(&unit));

    insta::assert_snapshot!(output, @r#"
    import { DataApi } from "@proofgeist/fmdapi/dist/wv";
    import { TCustomer, TCustomerPortals } from "../Customer";
    export const client = DataApi<any, TCustomer, TCustomerPortals>({
      layout: "API Customer",
      scriptName: "ExecuteDataApi",
    });
    "#);
}

// === Index module ===

#[test]
fn index_sorted_by_schema_name() {
    let output = TypeScriptWriter::emit(&build_index_module(["Invoices", "Customer", "Assets"]));

    insta::assert_snapshot!(output, @r#"
    export { client as AssetsClient } from "./Assets";
    export { client as CustomerClient } from "./Customer";
    export { client as InvoicesClient } from "./Invoices";
    "#);
}

// === Whole files ===

#[test]
fn modules_carry_banner_and_print_identically() {
    let unit = customer(Backend::Validator, ValueListMode::Strict);
    let doc = build_schema_module(&unit);

    let first = TYPESCRIPT_WRITER.write(&doc);
    let second = TYPESCRIPT_WRITER.write(&build_schema_module(&unit));
    assert!(first.starts_with(GENERATED_BANNER));
    assert_eq!(first, second);
    assert_eq!(TYPESCRIPT_WRITER.extension(), "ts");
}
