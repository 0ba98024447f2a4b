//! Generate command - fetch layout metadata and write schema and client modules.

use crate::config::{DEFAULT_CONFIG_FILE, GenerateConfig};
use crate::env::{MissingEnv, resolve_from_process};
use crate::pipeline::{GenerateReport, Pipeline};
use crate::sink::FsSink;
use anyhow::Context;
use clap::Args;
use layoutgen_dataapi::{ClientConfig, DataApiClient};
use layoutgen_syntax::{Expr, reflect_token_store};
use nu_ansi_term::Color;
use std::path::PathBuf;

/// Generate command arguments
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Env file loaded before resolving credentials (default: .env if present)
    #[arg(long)]
    pub env_path: Option<PathBuf>,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            env_path: None,
        }
    }
}

/// Run the generate command
pub fn run(args: GenerateArgs) -> i32 {
    match generate(&args) {
        Ok(report) => {
            print_summary(&report);
            0
        }
        Err(e) => {
            if let Some(missing) = e.downcast_ref::<MissingEnv>() {
                eprintln!(
                    "{} missing required environment variables:",
                    Color::Red.bold().paint("ERROR:")
                );
                for name in &missing.missing {
                    eprintln!("  {}", name);
                }
            } else {
                eprintln!("{} {:#}", Color::Red.bold().paint("error:"), e);
            }
            1
        }
    }
}

fn generate(args: &GenerateArgs) -> anyhow::Result<GenerateReport> {
    load_env_file(args.env_path.as_deref())?;

    let config = GenerateConfig::load(&args.config)?;
    let env = resolve_from_process(&config.env_names)?;
    let store = token_store(&config);

    let mut client = DataApiClient::new(ClientConfig {
        server: env.server,
        db: env.db,
        auth: env.auth,
    })
    .context("invalid connection settings")?;
    tracing::debug!(base_url = client.base_url(), "connecting");

    let report = Pipeline::new(&config, env.env_names)
        .with_token_store(store)
        .run(&mut client, &mut FsSink)?;

    if let Err(e) = client.logout() {
        tracing::warn!(error = %e, "logout failed");
    }
    Ok(report)
}

fn load_env_file(path: Option<&std::path::Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
        }
        None => match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded env file"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("failed to load .env"),
        },
    }
    Ok(())
}

/// Reflect `config.tokenStore` out of the configured TypeScript file.
fn token_store(config: &GenerateConfig) -> Option<Expr> {
    let path = config.token_store_config.as_deref()?;
    if config.webviewer_script_name.is_some() {
        tracing::debug!(path = %path.display(), "web viewer clients carry no token store");
        return None;
    }
    let store = reflect_token_store(path);
    match &store {
        Some(_) => tracing::info!(path = %path.display(), "reusing tokenStore"),
        None => tracing::info!(path = %path.display(), "no tokenStore found, clients use the default"),
    }
    store
}

fn print_summary(report: &GenerateReport) {
    println!(
        "Generated {} file(s), {} client(s)",
        report.written.len(),
        report.clients.len()
    );
    for layout in &report.skipped {
        println!(
            "  {} layout {:?} not found",
            Color::Yellow.paint("skipped"),
            layout
        );
    }
}
