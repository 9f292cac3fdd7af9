//! Clap derive structure for the `panodiff` CLI.

use std::path::PathBuf;

use clap::Parser;

/// panodiff -- Panorama configuration diff tool
#[derive(Debug, Parser)]
#[command(
    name = "panodiff",
    version,
    about = "Diff the candidate and running configuration of a Panorama appliance",
    long_about = "Fetches the candidate and running configuration from a Panorama\n\
        appliance over its XML API, narrows both to one device-group, template,\n\
        or template-stack, and prints a unified diff (running -> candidate)."
)]
pub struct Cli {
    /// Panorama host or base URL
    #[arg(long, env = "PANO_URL")]
    pub url: String,

    /// API key for authentication (required)
    #[arg(long, env = "PANO_API_KEY", hide_env = true)]
    pub api_key: Option<String>,

    /// Device group to filter the configuration
    #[arg(long)]
    pub device_group: Option<String>,

    /// Template to filter the configuration
    #[arg(long)]
    pub template: Option<String>,

    /// Template stack to filter the configuration
    #[arg(long)]
    pub template_stack: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PANO_INSECURE")]
    pub insecure: bool,

    /// Custom CA certificate (PEM) for TLS verification
    #[arg(long, value_name = "PEM")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,
}
