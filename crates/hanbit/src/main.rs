//! Hanbit CLI - Korean prompt enhancement for AI image generation models.
//!
//! Hanbit takes a Korean subject description and produces an enhanced
//! English or Chinese image-generation prompt via an LLM provider, with a
//! deterministic fallback when the provider is unreachable.
//!
//! # Usage
//!
//! ```bash
//! # Enhance a single-subject prompt
//! hanbit enhance "한복을 입은 여성" --style "film noir" --variations 3
//!
//! # Two-subject composed scene
//! hanbit enhance "달빛 아래의 고양이" --subject2 "갑옷을 입은 기사" \
//!     --composition "Subject 1 is the main focus."
//!
//! # View configuration
//! hanbit config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Hanbit - Korean prompt enhancement for AI image generation models.
#[derive(Parser, Debug)]
#[command(name = "hanbit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Enhance a Korean prompt into an image-generation prompt batch
    Enhance(cli::enhance::EnhanceArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match hanbit_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `hanbit config path`."
            );
            hanbit_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Hanbit v{}", hanbit_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Enhance(args) => cli::enhance::execute(args, &config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
