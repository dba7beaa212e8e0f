use std::process::ExitCode;

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

use postame::cli::Flags;
use postame::controllers::{self, Context};
use postame::models::{Config, SessionStore};
use postame::PostameError;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_context() -> anyhow::Result<Context> {
    let config_path = Config::default_path().context("Failed to locate config file")?;
    let config = Config::load().context("Failed to load configuration")?;
    if config.api_key.is_none() {
        tracing::info!("no API key configured; run `postame api-key` after logging in");
    }

    let store = SessionStore::default_location().context("Failed to locate session store")?;

    Ok(Context {
        config,
        config_path: Some(config_path),
        store,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let flags = Flags::from_args();

    let mut ctx = match build_context() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match controllers::run(flags.command, &mut ctx).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if matches!(e, PostameError::NotLoggedIn) {
                eprintln!("Error: {} Run `postame login` first.", e.user_message());
            } else {
                eprintln!("Error: {}", e.user_message());
            }
            ExitCode::FAILURE
        }
    }
}
