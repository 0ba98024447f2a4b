//! Run configuration.
//!
//! Loaded from `layoutgen.toml` (or `--config`). Every key is optional.
//!
//! Example:
//! ```toml
//! path = "schema"
//! backend = "validator"
//!
//! [env_names]
//! api_key = "MY_OTTO_KEY"
//!
//! [[schemas]]
//! layout = "API Customer"
//! schema_name = "Customer"
//! strict_numbers = true
//! ```
//!
//! Per-schema keys override the top-level ones for that schema only; the
//! merged result is a [`ViewSettings`].

use layoutgen_typegen::{Backend, ValueListMode, sanitize};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "layoutgen.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("schema name {0:?} has no characters usable in an identifier")]
    UnusableSchemaName(String),

    #[error("schema name {0:?} collides with an earlier schema name")]
    DuplicateSchemaName(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Output root; schema modules land here, clients under `client/`.
    pub path: PathBuf,
    pub generate_client: bool,
    pub backend: Backend,
    pub strict_numbers: bool,
    pub value_lists: ValueListMode,
    /// Emit web viewer clients calling back through this FileMaker script.
    pub webviewer_script_name: Option<String>,
    /// TypeScript file whose `config.tokenStore` is reused by generated clients.
    pub token_store_config: Option<PathBuf>,
    pub env_names: EnvNameConfig,
    pub schemas: Vec<SchemaConfig>,
}

/// Names of the environment variables holding connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvNameConfig {
    pub server: String,
    pub db: String,
    pub api_key: String,
    pub username: String,
    pub password: String,
    pub otto_port: String,
}

/// One layout to generate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Layout name on the server.
    pub layout: String,
    /// Base name for generated files and identifiers.
    pub schema_name: String,
    #[serde(default)]
    pub backend: Option<Backend>,
    #[serde(default)]
    pub strict_numbers: Option<bool>,
    #[serde(default)]
    pub value_lists: Option<ValueListMode>,
    #[serde(default)]
    pub generate_client: Option<bool>,
}

/// Effective settings for one schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub backend: Backend,
    pub strict_numbers: bool,
    pub value_lists: ValueListMode,
    pub generate_client: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("schema"),
            generate_client: true,
            backend: Backend::default(),
            strict_numbers: false,
            value_lists: ValueListMode::default(),
            webviewer_script_name: None,
            token_store_config: None,
            env_names: EnvNameConfig::default(),
            schemas: Vec::new(),
        }
    }
}

impl Default for EnvNameConfig {
    fn default() -> Self {
        Self {
            server: "FM_SERVER".into(),
            db: "FM_DATABASE".into(),
            api_key: "OTTO_API_KEY".into(),
            username: "FM_USERNAME".into(),
            password: "FM_PASSWORD".into(),
            otto_port: "OTTO_PORT".into(),
        }
    }
}

impl GenerateConfig {
    /// Read and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse and validate config text; `origin` is only used in errors.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject schema names that would produce broken identifiers, or that
    /// share an identifier (and so an index export) with an earlier schema.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for schema in &self.schemas {
            let identifier = sanitize(&schema.schema_name);
            if identifier.is_empty() {
                return Err(ConfigError::UnusableSchemaName(schema.schema_name.clone()));
            }
            if !seen.insert(identifier) {
                return Err(ConfigError::DuplicateSchemaName(schema.schema_name.clone()));
            }
        }
        Ok(())
    }

    /// Merge the per-schema overrides of `schema` over the run defaults.
    pub fn view_settings(&self, schema: &SchemaConfig) -> ViewSettings {
        ViewSettings {
            backend: schema.backend.unwrap_or(self.backend),
            strict_numbers: schema.strict_numbers.unwrap_or(self.strict_numbers),
            value_lists: schema.value_lists.unwrap_or(self.value_lists),
            generate_client: schema.generate_client.unwrap_or(self.generate_client),
        }
    }
}

/// Config written by `layoutgen init`.
pub const STARTER_CONFIG: &str = r#"# layoutgen configuration
# Generated files are written under `path`; clients under `path`/client.

path = "schema"
# backend = "validator"        # or "types-only"
# generate_client = true
# strict_numbers = false       # type number fields as `number | null`
# value_lists = "ignore"       # "strict" | "allow-empty" | "ignore"
# webviewer_script_name = "ExecuteDataApi"
# token_store_config = "fmschema.config.ts"

# [env_names]
# server = "FM_SERVER"
# db = "FM_DATABASE"
# api_key = "OTTO_API_KEY"
# username = "FM_USERNAME"
# password = "FM_PASSWORD"
# otto_port = "OTTO_PORT"

[[schemas]]
layout = "API_Contacts"
schema_name = "Contacts"
"#;
