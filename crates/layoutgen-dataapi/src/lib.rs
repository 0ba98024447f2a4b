//! Blocking client for the FileMaker Data API.
//!
//! Only what schema generation needs: authenticate, read a layout's
//! metadata, log out. Session tokens live in memory for the lifetime of one
//! [`DataApiClient`].
//!
//! # Example
//!
//! ```ignore
//! use layoutgen_dataapi::{Auth, ClientConfig, DataApiClient};
//!
//! let mut client = DataApiClient::new(ClientConfig {
//!     server: "https://fm.example.com".into(),
//!     db: "Contacts".into(),
//!     auth: Auth::api_key("dk_123"),
//! })?;
//! let meta = client.layout_metadata("API_Contacts")?;
//! println!("{} fields", meta.field_meta_data.len());
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{Auth, ClientConfig, DEFAULT_OTTO_PORT, DataApiClient, base_url};
pub use error::{DataApiError, LAYOUT_MISSING};
pub use types::{FieldMetaData, LayoutMetadataResponse, ValueListEntry, WireValueList};
