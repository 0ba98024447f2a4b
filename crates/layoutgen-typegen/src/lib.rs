//! TypeScript type and validator generation from FileMaker layout metadata.
//!
//! `layoutgen-typegen` turns the field metadata of one layout into a canonical
//! schema and lowers it into documents for one of two backends.
//!
//! # Architecture
//!
//! ```text
//! Input                   IR                  Output (Document)
//! ──────────────     ───────────────     ──────────────────────────
//! LayoutMetadata ──> SchemaEntry[] ──┬─> schema module (types-only | validator)
//!  (fields,          PortalSchema[]  ├─> client module (standard | web viewer)
//!   portals,         ValueList[]     └─> index module
//!   value lists)
//! ```
//!
//! Printing is left to [`layoutgen_syntax::TypeScriptWriter`].
//!
//! # Example
//!
//! ```
//! use layoutgen_typegen::ir::{Backend, FieldDescriptor, LayoutMetadata, ValueListMode};
//! use layoutgen_typegen::input::normalize_layout;
//! use layoutgen_typegen::output::{EnvNames, GenerationUnit, build_schema_module};
//! use layoutgen_syntax::TypeScriptWriter;
//!
//! let meta = LayoutMetadata {
//!     fields: vec![FieldDescriptor::new("name", "text")],
//!     ..Default::default()
//! };
//! let layout = normalize_layout(&meta, ValueListMode::Ignore);
//! let unit = GenerationUnit::new("Customer", "Customer", layout, Backend::TypesOnly, EnvNames::default());
//!
//! let ts = TypeScriptWriter::emit(&build_schema_module(&unit));
//! assert!(ts.contains("export type TCustomer = {"));
//! ```

pub mod input;
pub mod ir;
pub mod lower;
pub mod output;
pub mod sanitize;

pub use input::{NormalizedLayout, normalize_fields, normalize_layout};
pub use ir::{
    Backend, FieldDescriptor, FieldKind, LayoutMetadata, PortalSchema, SchemaEntry, ValueList,
    ValueListMode,
};
pub use lower::{Lowered, lower};
pub use output::{
    AuthEnvNames, ClientTarget, EnvNames, GenerationUnit, build_client_module, build_index_module,
    build_schema_module,
};
pub use sanitize::sanitize;
