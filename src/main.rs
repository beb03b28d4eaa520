mod api;
mod config;
mod ddns;
mod error;
mod ip;
#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use api::SubregClient;
use ddns::{display_name, Ddns};
use ip::HttpIpResolver;
use log::info;
use std::{process::ExitCode, time::Duration};

async fn run() -> Result<()> {
    let path = config::config_path(
        std::env::args().nth(1),
        std::env::var(config::CONFIG_ENV_VAR).ok(),
    );
    let config = config::load_config(path)?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let ddns = Ddns::new(
        SubregClient::new(http.clone(), config.api_url.as_str()),
        HttpIpResolver::new(http, config.ip_service_url.as_str()),
    );

    let name = display_name(&config.subreg.domain, &config.subreg.subdomain);
    let outcome = ddns.update_record(&config.subreg).await?;
    info!("{}: {}", name, outcome);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
