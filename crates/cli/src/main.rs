//! SafeWatch CLI entry point.
//!
//! This binary is the composition root. It:
//!
//! 1. Loads layered settings (defaults, settings file, `SAFEWATCH_*` env,
//!    then flags).
//! 2. Installs the `tracing-subscriber` pipeline that every crate logs through.
//! 3. Builds one [`ResourceClient`] with the chosen notifier and runs a single
//!    subcommand against it.
//!
//! Command results go to stdout as the JSON envelope; notifications and logs
//! go to stderr. The process exits non-zero when the call failed.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use api_client::{BaseAddress, ClientConfig, ResourceClient, TracingNotifier};
use domain::Notifier;

mod commands;
mod observability;
mod settings;
mod toast;

use commands::{Command, ConfigAction};
use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "safewatch", version, about = "Command-line client for the SafeWatch backend")]
struct Cli {
    /// Settings file (defaults to `<config dir>/safewatch/config.json`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend address for this invocation only.
    #[arg(long, global = true)]
    base_address: Option<BaseAddress>,

    /// Increase log verbosity (`-v` debug, `-vv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Send notifications to the log instead of printing them to stderr.
    #[arg(long, global = true)]
    no_toast: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let settings_path = match cli.config {
        Some(path) => path,
        None => settings::default_path().context("no configuration directory on this platform")?,
    };
    let mut settings = Settings::load(&settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;
    if let Some(address) = cli.base_address {
        settings.base_address = address;
    }

    observability::init(settings.log_format, &settings.log_level, cli.verbose);
    tracing::debug!(
        settings_path = %settings_path.display(),
        base_address = %settings.base_address,
        "settings loaded"
    );

    if let Command::Config { action } = cli.command {
        return run_config(action, &settings, &settings_path);
    }

    let notifier: Arc<dyn Notifier> = if cli.no_toast {
        Arc::new(TracingNotifier)
    } else {
        Arc::new(toast::StderrToast)
    };
    let client = ResourceClient::new(ClientConfig::new(settings.base_address.clone()), notifier)?;

    commands::run_remote(&client, cli.command).await
}

fn run_config(
    action: ConfigAction,
    settings: &Settings,
    settings_path: &std::path::Path,
) -> anyhow::Result<bool> {
    match action {
        ConfigAction::Show => {
            println!("# {}", settings_path.display());
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        ConfigAction::SetBaseAddress { address } => {
            let address = BaseAddress::parse(&address)?;
            settings::persist_base_address(settings_path, &address)?;
            println!("{address}");
        }
    }
    Ok(true)
}
