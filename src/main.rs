//! `techledger` CLI entrypoint: lists, searches, and shows articles.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use techledger::{ApiError, Catalog, HttpApiClient, LedgerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _written = writeln!(io::stderr().lock(), "{error}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let _ignored = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

async fn run() -> Result<(), ApiError> {
    let config = load_config()?;
    config.validate()?;

    if let Some(path) = config.catalog.as_deref() {
        let catalog = Catalog::load(Path::new(path))?;
        return cli::run(&config, catalog).await;
    }

    let client = HttpApiClient::new(&config.api_client_config())?;
    cli::run(&config, client).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<LedgerConfig, ApiError> {
    LedgerConfig::load().map_err(|error| ApiError::Configuration {
        message: error.to_string(),
    })
}
