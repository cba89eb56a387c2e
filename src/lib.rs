//! cf-notify - posts CloudFormation stack events to Slack.
//!
//! A single Lambda function with two triggers:
//! 1. SNS deliveries of CloudFormation stack notifications, summarized into a
//!    color-coded Slack message with a console link and, for some statuses, a
//!    breakdown of the stack's resources
//! 2. A scheduled EventBridge rule that audits which stacks have no
//!    notification targets configured
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - the CloudFormation and IAM SDKs for stack, resource and user lookups
//! - SSM Parameter Store for the optional per-stack channel table
//! - a Slack incoming webhook for delivery
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use cf_notify::clients::AwsCloudClient;
//! use cf_notify::core::config::AppConfig;
//! use cf_notify::notify::Router;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     cf_notify::setup_logging();
//!
//!     let config = AppConfig {
//!         debug: true,
//!         default_channel: Some("#infra".to_string()),
//!         ..AppConfig::default()
//!     };
//!     let router = Router::new(config, Arc::new(AwsCloudClient::from_env().await));
//!
//!     let event = serde_json::json!({ "source": "aws.events" });
//!     if let Some(message) = router.dispatch(&event).await? {
//!         println!("{}", serde_json::to_string_pretty(&message)?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod clients;
pub mod core;
pub mod errors;
pub mod notification_parser;
pub mod notify;
pub mod utils;

pub use errors::NotifyError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Output is shaped for `CloudWatch` Logs. The level comes from `RUST_LOG`
/// and defaults to `info`. Calling this more than once is harmless.
///
/// ```
/// cf_notify::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
