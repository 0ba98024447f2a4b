//! One generation run.
//!
//! For every configured schema, in config order:
//!
//! ```text
//! fetch metadata ──► normalize ──► build schema module ──► <root>/<name>.ts
//!      │                      └──► build client module ──► <root>/client/<name>.ts
//!      └─ not found: warn, skip
//! ```
//!
//! After the loop, `<root>/client/index.ts` re-exports every generated client
//! in schema-name order; it is not written when no client was generated.
//! Any failure other than a missing layout aborts the run where it happens.

use crate::config::GenerateConfig;
use crate::sink::ArtifactSink;
use crate::source::{FetchError, MetadataSource};
use layoutgen_syntax::{Document, Expr, TYPESCRIPT_WRITER, Writer};
use layoutgen_typegen::{
    ClientTarget, EnvNames, GenerationUnit, build_client_module, build_index_module,
    build_schema_module, normalize_layout,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Subdirectory of the output root holding client modules.
pub const CLIENT_DIR: &str = "client";

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Files written, in write order.
    pub written: Vec<PathBuf>,
    /// Schema names that got a client, sorted.
    pub clients: Vec<String>,
    /// Layouts the server did not know, in config order.
    pub skipped: Vec<String>,
}

/// Inputs shared by every schema of a run.
pub struct Pipeline<'a> {
    config: &'a GenerateConfig,
    env_names: EnvNames,
    token_store: Option<Expr>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a GenerateConfig, env_names: EnvNames) -> Self {
        Self {
            config,
            env_names,
            token_store: None,
        }
    }

    /// Token store construction passed to every standard client.
    pub fn with_token_store(mut self, token_store: Option<Expr>) -> Self {
        self.token_store = token_store;
        self
    }

    fn target(&self) -> ClientTarget {
        match &self.config.webviewer_script_name {
            Some(script_name) => ClientTarget::WebViewer {
                script_name: script_name.clone(),
            },
            None => ClientTarget::Standard {
                token_store: self.token_store.clone(),
            },
        }
    }

    pub fn run<S, K>(&self, source: &mut S, sink: &mut K) -> Result<GenerateReport, GenerateError>
    where
        S: MetadataSource + ?Sized,
        K: ArtifactSink + ?Sized,
    {
        let root = self.config.path.as_path();
        let client_dir = root.join(CLIENT_DIR);
        let target = self.target();

        let mut report = GenerateReport::default();
        // sorted, so the index does not depend on config order
        let mut clients: BTreeSet<&str> = BTreeSet::new();

        ensure_dir(sink, root)?;

        for schema in &self.config.schemas {
            let settings = self.config.view_settings(schema);

            let metadata = match source.fetch_metadata(&schema.layout) {
                Ok(metadata) => metadata,
                Err(FetchError::NotFound(layout)) => {
                    tracing::warn!(layout = %layout, schema = %schema.schema_name, "layout not found, skipping");
                    report.skipped.push(layout);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let layout = normalize_layout(&metadata, settings.value_lists);
            let unit = GenerationUnit::new(
                schema.schema_name.clone(),
                schema.layout.clone(),
                layout,
                settings.backend,
                self.env_names.clone(),
            )
            .with_strict_numbers(settings.strict_numbers)
            .with_target(target.clone());

            let path = root.join(format!("{}.ts", schema.schema_name));
            write(sink, &path, &build_schema_module(&unit), &mut report)?;

            if settings.generate_client {
                if clients.is_empty() {
                    ensure_dir(sink, &client_dir)?;
                }
                let path = client_dir.join(format!("{}.ts", schema.schema_name));
                write(sink, &path, &build_client_module(&unit), &mut report)?;
                clients.insert(schema.schema_name.as_str());
            } else {
                tracing::debug!(schema = %schema.schema_name, "client generation disabled");
            }
        }

        if clients.is_empty() {
            return Ok(report);
        }

        let index = build_index_module(clients.iter().copied());
        write(sink, &client_dir.join("index.ts"), &index, &mut report)?;

        report.clients = clients.into_iter().map(String::from).collect();
        Ok(report)
    }
}

fn ensure_dir<K: ArtifactSink + ?Sized>(sink: &mut K, dir: &Path) -> Result<(), GenerateError> {
    sink.ensure_dir(dir).map_err(|source| GenerateError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

fn write<K: ArtifactSink + ?Sized>(
    sink: &mut K,
    path: &Path,
    document: &Document,
    report: &mut GenerateReport,
) -> Result<(), GenerateError> {
    sink.write_file(path, &TYPESCRIPT_WRITER.write(document))
        .map_err(|source| GenerateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), "wrote");
    report.written.push(path.to_path_buf());
    Ok(())
}
