use aws_sdk_ssm::Client as SsmClient;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::config::AppConfig;
use crate::errors::NotifyError;

/// Per-stack channel lookup.
pub trait ChannelOverrides: Send + Sync {
    fn channel_for(&self, stack_name: &str) -> Option<String>;
}

/// Override table held in memory, keyed by stack name.
#[derive(Debug, Clone, Default)]
pub struct StaticChannelOverrides {
    channels: HashMap<String, String>,
}

impl StaticChannelOverrides {
    #[must_use]
    pub fn new(channels: HashMap<String, String>) -> Self {
        Self { channels }
    }

    /// Parse a JSON object of `{"stack-name": "#channel"}`.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a JSON object of strings.
    pub fn from_json(raw: &str) -> Result<Self, NotifyError> {
        let channels: HashMap<String, String> = serde_json::from_str(raw)
            .map_err(|e| NotifyError::ConfigError(format!("channel overrides: {e}")))?;
        Ok(Self::new(channels))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl ChannelOverrides for StaticChannelOverrides {
    fn channel_for(&self, stack_name: &str) -> Option<String> {
        self.channels.get(stack_name).cloned()
    }
}

/// Resolve the override table configured for this invocation, if any.
///
/// The inline `CHANNEL_OVERRIDES` value wins over `CHANNEL_OVERRIDES_PARAM`.
/// A missing SSM parameter is treated as "no overrides".
///
/// # Errors
///
/// Returns an error if the table is not valid JSON or SSM fails for any
/// reason other than the parameter not existing.
pub async fn load_channel_overrides(
    config: &AppConfig,
) -> Result<Option<Arc<dyn ChannelOverrides>>, NotifyError> {
    if let Some(raw) = config.channel_overrides.as_deref() {
        let table = StaticChannelOverrides::from_json(raw)?;
        info!(entries = table.len(), "Loaded inline channel overrides");
        return Ok(Some(Arc::new(table)));
    }

    let Some(name) = config.channel_overrides_param.as_deref() else {
        return Ok(None);
    };

    let shared = aws_config::from_env().load().await;
    let client = SsmClient::new(&shared);

    match client
        .get_parameter()
        .name(name)
        .with_decryption(true)
        .send()
        .await
    {
        Ok(resp) => {
            let Some(param) = resp.parameter else {
                return Ok(None);
            };
            let Some(value) = param.value() else {
                return Ok(None);
            };
            let table = StaticChannelOverrides::from_json(value)?;
            info!(parameter = %name, entries = table.len(), "Loaded channel overrides from SSM");
            Ok(Some(Arc::new(table)))
        }
        Err(e) => {
            let msg = format!("{e:?}");
            if msg.contains("ParameterNotFound") {
                info!(parameter = %name, "Channel override parameter not found");
                Ok(None)
            } else {
                Err(NotifyError::AwsError(format!("ssm get_parameter: {e}")))
            }
        }
    }
}
