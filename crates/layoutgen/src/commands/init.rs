//! Write a starter config file.

use crate::config::{DEFAULT_CONFIG_FILE, STARTER_CONFIG};
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Where to write the config
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Run init command.
pub fn run(args: InitArgs) -> i32 {
    if args.config.exists() && !args.force {
        eprintln!(
            "{} already exists (use --force to overwrite)",
            args.config.display()
        );
        return 1;
    }

    if let Err(e) = fs::write(&args.config, STARTER_CONFIG) {
        eprintln!("Failed to write {}: {}", args.config.display(), e);
        return 1;
    }
    println!("Created {}", args.config.display());
    0
}
