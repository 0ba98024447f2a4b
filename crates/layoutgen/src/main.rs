use clap::{ArgAction, Parser, Subcommand};
use layoutgen::commands::{generate, init};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "layoutgen",
    about = "Generate TypeScript types, Zod validators and Data API clients from FileMaker layouts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Generate schema and client modules for every configured layout
    Generate(generate::GenerateArgs),
    /// Write a starter layoutgen.toml
    Init(init::InitArgs),
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "info".to_string(),
            1 => "info,layoutgen=debug,layoutgen_dataapi=debug".to_string(),
            _ => "debug,layoutgen=trace,layoutgen_dataapi=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose > 0)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Some(Command::Generate(args)) => generate::run(args),
        Some(Command::Init(args)) => init::run(args),
        None => generate::run(generate::GenerateArgs::default()),
    };
    std::process::exit(code);
}
