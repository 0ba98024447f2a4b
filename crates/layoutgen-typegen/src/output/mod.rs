//! Document builders.
//!
//! Each builder takes a [`GenerationUnit`] (or the set of generated clients)
//! and assembles a [`Document`](layoutgen_syntax::Document). Every identifier
//! derived from a user-supplied name goes through [`sanitize`] here, at the
//! definition site and at every reference site alike.

pub mod client;
pub mod index;
pub mod schema;

pub use client::build_client_module;
pub use index::build_index_module;
pub use schema::build_schema_module;

use crate::input::NormalizedLayout;
use crate::ir::{Backend, PortalSchema, SchemaEntry, ValueList};
use crate::sanitize::sanitize;
use layoutgen_syntax::Expr;

/// Everything needed to emit the files for one layout.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationUnit {
    /// User-chosen name; sanitized for identifiers, used raw for file paths.
    pub schema_name: String,
    pub layout_name: String,
    pub schema: Vec<SchemaEntry>,
    pub portals: Vec<PortalSchema>,
    pub value_lists: Vec<ValueList>,
    pub backend: Backend,
    pub strict_numbers: bool,
    pub env_names: EnvNames,
    pub target: ClientTarget,
}

/// Which client shape to emit.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientTarget {
    /// Server-side client reading credentials from `process.env`.
    Standard {
        /// Token store construction reused from the user's config file.
        token_store: Option<Expr>,
    },
    /// Client running inside a FileMaker web viewer, calling back through a script.
    WebViewer { script_name: String },
}

/// Names (not values) of the environment variables the client reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvNames {
    pub server: String,
    pub db: String,
    pub auth: AuthEnvNames,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEnvNames {
    ApiKey { api_key: String },
    UserPassword { username: String, password: String },
}

impl Default for EnvNames {
    fn default() -> Self {
        Self {
            server: "FM_SERVER".into(),
            db: "FM_DATABASE".into(),
            auth: AuthEnvNames::ApiKey {
                api_key: "OTTO_API_KEY".into(),
            },
        }
    }
}

impl Default for ClientTarget {
    fn default() -> Self {
        ClientTarget::Standard { token_store: None }
    }
}

impl GenerationUnit {
    pub fn new(
        schema_name: impl Into<String>,
        layout_name: impl Into<String>,
        layout: NormalizedLayout,
        backend: Backend,
        env_names: EnvNames,
    ) -> Self {
        Self {
            schema_name: schema_name.into(),
            layout_name: layout_name.into(),
            schema: layout.schema,
            portals: layout.portals,
            value_lists: layout.value_lists,
            backend,
            strict_numbers: false,
            env_names,
            target: ClientTarget::default(),
        }
    }

    pub fn with_strict_numbers(mut self, strict: bool) -> Self {
        self.strict_numbers = strict;
        self
    }

    pub fn with_target(mut self, target: ClientTarget) -> Self {
        self.target = target;
        self
    }

    pub fn has_portals(&self) -> bool {
        !self.portals.is_empty()
    }
}

// Identifier naming. Keep every builder on these so definitions and
// references agree.

/// `T<name>`
pub fn type_name(name: &str) -> String {
    format!("T{}", sanitize(name))
}

/// `Z<name>`
pub fn validator_name(name: &str) -> String {
    format!("Z{}", sanitize(name))
}

/// `T<name>Portals`
pub fn portals_type_name(name: &str) -> String {
    format!("T{}Portals", sanitize(name))
}

/// `Z<name>Portals`
pub fn portals_validator_name(name: &str) -> String {
    format!("Z{}Portals", sanitize(name))
}

/// `TVL<name>`
pub fn value_list_type_name(name: &str) -> String {
    format!("TVL{}", sanitize(name))
}

/// `ZVL<name>`
pub fn value_list_validator_name(name: &str) -> String {
    format!("ZVL{}", sanitize(name))
}

/// `<name>Client`
pub fn client_export_name(name: &str) -> String {
    format!("{}Client", sanitize(name))
}
