use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::error;

use super::router::Router;
use crate::clients::AwsCloudClient;
use crate::core::channels::load_channel_overrides;
use crate::core::config::AppConfig;

/// Lambda handler. Routes the event, delivers the message and returns it.
///
/// Returns `{}` when nothing was sent.
///
/// # Errors
///
/// Any failure is logged and surfaced to the Lambda runtime so the invocation
/// is reported as failed.
#[tracing::instrument(level = "info", skip(event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = AppConfig::from_env();

    let overrides = load_channel_overrides(&config).await.map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    let cloud = AwsCloudClient::from_env().await;
    let mut router = Router::new(config, Arc::new(cloud));
    if let Some(overrides) = overrides {
        router = router.with_channel_overrides(overrides);
    }

    match router.dispatch(&event.payload).await {
        Ok(Some(message)) => Ok(serde_json::to_value(&message)?),
        Ok(None) => Ok(json!({})),
        Err(e) => {
            error!("Invocation failed: {}", e);
            Err(Error::from(e))
        }
    }
}

pub use self::function_handler as handler;
