use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod render;

use commands::size::SizeArgs;

#[derive(Parser)]
#[command(name = "lsz")]
#[command(about = "Multi-entry lot sizer: max lots per entry within a risk budget", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size an entry ladder against balance * risk, fees included
    Size(SizeArgs),

    /// Compute layered profile hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> account -> instrument ...)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Size(args) => commands::size::run(args)?,

        Commands::ConfigHash { paths } => {
            let loaded = lsz_config::load_layered_yaml(&paths)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays a clean report (table or JSON).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
