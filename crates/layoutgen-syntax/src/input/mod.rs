//! Input readers - inspect user-authored source without executing it.

#[cfg(feature = "read-typescript")]
pub mod typescript;

#[cfg(feature = "read-typescript")]
pub use typescript::{read_token_store, reflect_token_store};
