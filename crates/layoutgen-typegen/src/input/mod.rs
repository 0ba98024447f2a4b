//! Input normalization.
//!
//! Turns the metadata reported for a layout into canonical schemas.

pub mod metadata;

pub use metadata::{NormalizedLayout, dedupe_value_lists, normalize_fields, normalize_layout};
