//! TypeScript syntax model for generated modules.
//!
//! `layoutgen-syntax` holds the statement/expression/type nodes that code
//! generators assemble, the printer that turns them into TypeScript text, and
//! a tree-sitter reader that looks values up in user-authored config files.
//!
//! # Architecture
//!
//! ```text
//! Builders (typegen)        IR                Output
//! ──────────────────    ─────────────    ──────────────────
//! schema module     ─┐                ┌─> TypeScript text
//! client module     ─┼─> Document ────┘   (banner + body)
//! index module      ─┘    (ir.rs)
//!
//! fmschema.config.ts ──> input::typescript ──> Expr (token store)
//! ```
//!
//! # Example
//!
//! ```
//! use layoutgen_syntax::{Document, Expr, Stmt, TypeScriptWriter};
//!
//! let doc = Document::new(vec![Stmt::export_const(
//!     "ZUser",
//!     Expr::method(Expr::ident("z"), "string", vec![]),
//! )]);
//! assert_eq!(TypeScriptWriter::emit(&doc), "export const ZUser = z.string();\n");
//! ```

pub mod ir;
pub mod traits;

pub mod input;
pub mod output;

// Re-exports: IR types
pub use ir::{Document, ExportSpecifier, Expr, Literal, Stmt, Type};

// Re-exports: Traits
pub use traits::{ReadError, Writer};

// Re-exports: Built-in reader
#[cfg(feature = "read-typescript")]
pub use input::{read_token_store, reflect_token_store};

// Re-exports: Built-in writer
pub use output::{GENERATED_BANNER, TYPESCRIPT_WRITER, TypeScriptWriter, TypeScriptWriterImpl};
