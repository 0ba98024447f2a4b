//! Traits and errors shared by readers and writers.

use crate::ir::Document;

/// Error that can occur while reading a user-authored source file.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// A writer emits a document as source code in a target language.
pub trait Writer: Send + Sync {
    /// File extension for output (e.g., "ts").
    fn extension(&self) -> &'static str;

    /// Emit the document as a complete file, generated-file banner included.
    fn write(&self, document: &Document) -> String;
}
