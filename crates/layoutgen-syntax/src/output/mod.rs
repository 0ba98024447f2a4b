//! Output writers - emit documents as source code.

pub mod typescript;

pub use typescript::{GENERATED_BANNER, TYPESCRIPT_WRITER, TypeScriptWriter, TypeScriptWriterImpl};
