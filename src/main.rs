//! Product finder command line entry point.
//!
//! ```bash
//! product-finder [URL] [startTime] [endTime] [numberOfTravellers]
//! RUST_LOG=debug product-finder "" 2017-11-20T09:30 2017-11-23T19:30 3
//! ```
//!
//! The report is printed to stdout as pretty JSON; logs go to stderr.

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use tracing::error;
use tracing_subscriber::EnvFilter;

use product_finder::config::USAGE;
use product_finder::report::to_pretty_json;
use product_finder::{ClientConfig, FinderConfig, HttpAvailabilityClient, ProductFinder};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Vec<String>) -> anyhow::Result<String> {
    let config = FinderConfig::from_args(args, Local::now().naive_local())
        .context("invalid arguments")?
        .with_client(ClientConfig::from_env().context("invalid environment")?);

    let client = HttpAvailabilityClient::new(&config.client).context("building HTTP client")?;
    let report = ProductFinder::new(client)
        .run(&config)
        .await
        .with_context(|| format!("searching products from {}", config.source_url))?;

    Ok(to_pretty_json(&report)?)
}
