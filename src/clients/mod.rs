//! Client modules for external API interactions

pub mod cloud_client;
pub mod webhook_client;

pub use cloud_client::{AwsCloudClient, CloudApi};
pub use webhook_client::{ChatTransport, WebhookClient};
