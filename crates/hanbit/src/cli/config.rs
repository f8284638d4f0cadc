//! The `hanbit config` command: inspect and initialize configuration.
//!
//! `show` never echoes key material: literal `api_key` values are masked,
//! and credential state is reported as resolved/absent per provider.

use clap::{Args, Subcommand};
use hanbit_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration with credential status (keys masked)
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            println!("{}", render_show(&config)?);
        }

        ConfigCommand::Path => {
            let path = Config::default_path();
            let state = if path.exists() { "" } else { " (not created yet)" };
            println!("{}{state}", path.display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            // Default file carries ${ENV_VAR} references, never literal keys
            let config = Config::default();
            std::fs::write(&path, config.to_toml()?)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Render the `show` output: masked TOML plus per-provider credential state.
fn render_show(config: &Config) -> anyhow::Result<String> {
    let mut masked = config.clone();
    if let Some(gemini) = masked.llm.gemini.as_mut() {
        gemini.api_key = mask_key(&gemini.api_key);
    }
    if let Some(openai) = masked.llm.openai.as_mut() {
        openai.api_key = mask_key(&openai.api_key);
    }
    if let Some(anthropic) = masked.llm.anthropic.as_mut() {
        anthropic.api_key = mask_key(&anthropic.api_key);
    }

    let mut out = masked.to_toml()?;
    let creds = config.credentials();
    out.push_str("\n# credentials\n");
    for (provider, resolved) in [
        ("gemini", creds.gemini.is_some()),
        ("openai", creds.openai.is_some()),
        ("anthropic", creds.anthropic.is_some()),
    ] {
        let state = if resolved { "key resolved" } else { "no key" };
        out.push_str(&format!("# {provider}: {state}\n"));
    }
    Ok(out)
}

/// Mask literal API keys. `${ENV_VAR}` references name a variable, not a
/// secret, so they pass through unchanged.
fn mask_key(value: &str) -> String {
    if (value.starts_with("${") && value.ends_with('}')) || value.is_empty() {
        value.to_string()
    } else {
        "<redacted>".to_string()
    }
}
