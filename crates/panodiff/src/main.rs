mod cli;
mod error;

use clap::Parser;
use secrecy::SecretString;
use tracing::info;
use tracing_subscriber::EnvFilter;

use panodiff_api::{PanoramaClient, TlsMode, TransportConfig};
use panodiff_core::{Scope, diff_scoped_config};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    info!("starting Panorama configuration diff");

    // Validated before any network call.
    let api_key = cli.api_key.ok_or(CliError::MissingApiKey)?;
    let scope = Scope::from_flags(
        cli.device_group.as_deref(),
        cli.template.as_deref(),
        cli.template_stack.as_deref(),
    )
    .ok_or(CliError::NoSelector)?;

    let transport = TransportConfig {
        tls: tls_mode(cli.insecure, cli.ca_cert),
        timeout: std::time::Duration::from_secs(cli.timeout),
    };
    let client = PanoramaClient::from_api_key(&cli.url, &SecretString::from(api_key), &transport)?;

    let result = diff_scoped_config(&client, &scope).await?;

    if result.is_empty() {
        info!("no differences found");
    } else {
        info!("diff generated successfully");
        print!("{}", result.text());
    }

    Ok(())
}

fn tls_mode(insecure: bool, ca_cert: Option<std::path::PathBuf>) -> TlsMode {
    if insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(path) = ca_cert {
        TlsMode::CustomCa(path)
    } else {
        TlsMode::System
    }
}
