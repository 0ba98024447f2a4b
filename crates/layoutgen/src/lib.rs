//! Schema and client generation for FileMaker layouts.
//!
//! The [`pipeline`] drives one run: for every configured layout it fetches
//! metadata through a [`MetadataSource`](source::MetadataSource), builds the
//! schema and client modules, and writes them through an
//! [`ArtifactSink`](sink::ArtifactSink). Everything else here prepares its
//! inputs: [`config`] reads `layoutgen.toml`, [`env`] resolves credentials.

pub mod commands;
pub mod config;
pub mod env;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use config::{ConfigError, GenerateConfig, SchemaConfig, ViewSettings};
pub use env::{MissingEnv, ResolvedEnv, resolve_env};
pub use pipeline::{GenerateError, GenerateReport, Pipeline};
pub use sink::{ArtifactSink, FsSink, MemorySink};
pub use source::{FetchError, MetadataSource};
