//! Runs one event file through the router with debug mode forced on and
//! prints the message that would have been posted.
//!
//! Usage: `cf-notify-local <event.json>`, e.g.
//! `cf-notify-local tests/fixtures/scheduled_event.json`.

use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;

use cf_notify::clients::AwsCloudClient;
use cf_notify::core::channels::load_channel_overrides;
use cf_notify::core::config::AppConfig;
use cf_notify::notify::Router;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        let prog = args.first().map_or("cf-notify-local", String::as_str);
        eprintln!("usage: {prog} <event.json>");
        eprintln!("ex: {prog} tests/fixtures/scheduled_event.json");
        std::process::exit(1);
    }

    cf_notify::setup_logging();

    let raw = std::fs::read_to_string(&args[1])
        .with_context(|| format!("Failed to read event file {}", args[1]))?;
    let event: Value = serde_json::from_str(&raw).context("Event file is not valid JSON")?;

    let config = AppConfig {
        debug: true,
        ..AppConfig::from_env()
    };
    let overrides = load_channel_overrides(&config).await?;

    let mut router = Router::new(config, Arc::new(AwsCloudClient::from_env().await));
    if let Some(overrides) = overrides {
        router = router.with_channel_overrides(overrides);
    }

    match router.dispatch(&event).await? {
        Some(message) => println!("{}", serde_json::to_string_pretty(&message)?),
        None => println!("{{}}"),
    }

    Ok(())
}
