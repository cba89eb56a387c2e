//! Top-level routing of inbound Lambda events.
//!
//! Two shapes arrive at the function:
//! - a scheduled EventBridge trigger (`"source": "aws.events"`), which runs the
//!   notification audit, and
//! - an SNS delivery of a CloudFormation notification, which is turned into a
//!   stack update message.
//!
//! Whatever the branch produces is merged with the default channel, icon and
//! username before it is delivered.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::audit::audit_stacks_without_notifications;
use super::compose::MessageComposer;
use crate::clients::{ChatTransport, CloudApi, WebhookClient};
use crate::core::channels::ChannelOverrides;
use crate::core::config::AppConfig;
use crate::core::models::ChatMessage;
use crate::errors::NotifyError;
use crate::notification_parser::parse_notification;

pub const SCHEDULED_EVENT_SOURCE: &str = "aws.events";
pub const ICON_EMOJI: &str = ":cloud:";
pub const USERNAME: &str = "cf-bot";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    ScheduledAudit,
    /// Raw SNS message body of a stack notification.
    StackNotification(String),
}

impl InboundEvent {
    /// # Errors
    ///
    /// Returns `MalformedEvent` if the payload is neither a scheduled trigger
    /// nor carries `Records[0].Sns.Message`.
    pub fn classify(payload: &Value) -> Result<Self, NotifyError> {
        if payload.get("source").and_then(Value::as_str) == Some(SCHEDULED_EVENT_SOURCE) {
            return Ok(Self::ScheduledAudit);
        }

        payload
            .get("Records")
            .and_then(Value::as_array)
            .and_then(|records| records.first())
            .and_then(|record| record.get("Sns"))
            .and_then(|sns| sns.get("Message"))
            .and_then(Value::as_str)
            .map(|body| Self::StackNotification(body.to_string()))
            .ok_or_else(|| {
                NotifyError::MalformedEvent("missing Records[0].Sns.Message".to_string())
            })
    }
}

pub struct Router {
    config: AppConfig,
    cloud: Arc<dyn CloudApi>,
    transport: Option<Arc<dyn ChatTransport>>,
    overrides: Option<Arc<dyn ChannelOverrides>>,
}

impl Router {
    /// Router delivering to the configured webhook, if one is set.
    #[must_use]
    pub fn new(config: AppConfig, cloud: Arc<dyn CloudApi>) -> Self {
        let transport = config
            .webhook_url
            .as_deref()
            .map(|url| Arc::new(WebhookClient::new(url)) as Arc<dyn ChatTransport>);

        Self {
            config,
            cloud,
            transport,
            overrides: None,
        }
    }

    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn ChatTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn with_channel_overrides(mut self, overrides: Arc<dyn ChannelOverrides>) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Build the message for `payload` and deliver it.
    ///
    /// In debug mode the message is logged and returned but never sent.
    /// Returns `Ok(None)` when there is nothing to send.
    ///
    /// # Errors
    ///
    /// Any parse, lookup or delivery failure fails the whole invocation.
    pub async fn dispatch(&self, payload: &Value) -> Result<Option<ChatMessage>, NotifyError> {
        if self.config.debug {
            info!(event = %payload, "Received event");
        }

        let Some(message) = self.build_message(payload).await? else {
            info!("Nothing to report");
            return Ok(None);
        };

        if self.config.debug {
            let rendered = serde_json::to_string(&message)?;
            info!(payload = %rendered, "Debug mode: message not delivered");
            return Ok(Some(message));
        }

        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| NotifyError::ConfigError("WEBHOOK is not set".to_string()))?;
        transport.send(&message).await?;

        Ok(Some(message))
    }

    /// Build the merged message for `payload` without delivering it.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is malformed or a cloud lookup fails.
    pub async fn build_message(&self, payload: &Value) -> Result<Option<ChatMessage>, NotifyError> {
        match InboundEvent::classify(payload)? {
            InboundEvent::ScheduledAudit => {
                info!("Scheduled audit of stack notification wiring");
                match audit_stacks_without_notifications(self.cloud.as_ref()).await? {
                    Some(partial) => Ok(Some(self.with_defaults(partial))),
                    None if self.config.send_empty_audit => {
                        Ok(Some(self.with_defaults(ChatMessage::default())))
                    }
                    None => Ok(None),
                }
            }
            InboundEvent::StackNotification(body) => {
                let Some(event) = parse_notification(&body)? else {
                    debug!("Ignoring notification for a resource inside the stack");
                    return Ok(None);
                };

                let composer = MessageComposer::new(
                    self.cloud.as_ref(),
                    self.overrides.as_deref(),
                    self.config.default_channel.as_deref(),
                );
                let partial = composer.compose_stack_message(&event).await?;
                Ok(Some(self.with_defaults(partial)))
            }
        }
    }

    fn with_defaults(&self, partial: ChatMessage) -> ChatMessage {
        ChatMessage {
            channel: partial
                .channel
                .or_else(|| self.config.default_channel.clone()),
            icon_emoji: ICON_EMOJI.to_string(),
            username: USERNAME.to_string(),
            text: partial.text,
            attachments: partial.attachments,
        }
    }
}
