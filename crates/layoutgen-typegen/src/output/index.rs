//! Client index module builder.

use super::client_export_name;
use layoutgen_syntax::{Document, Stmt};
use std::collections::BTreeSet;

/// `export { client as <S>Client } from "./<schema_name>";` for every
/// generated client, sorted by schema name regardless of input order.
pub fn build_index_module<'a>(schema_names: impl IntoIterator<Item = &'a str>) -> Document {
    let sorted: BTreeSet<&str> = schema_names.into_iter().collect();
    Document::new(
        sorted
            .into_iter()
            .map(|name| Stmt::export_from("client", client_export_name(name), format!("./{name}")))
            .collect(),
    )
}
