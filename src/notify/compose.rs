use tracing::{debug, info};

use crate::clients::CloudApi;
use crate::core::channels::ChannelOverrides;
use crate::core::models::{
    Attachment, AttachmentField, ChatMessage, ResourceTally, StackEvent, StackResource,
};
use crate::core::status::{color_for, wants_resource_breakdown};
use crate::errors::NotifyError;
use crate::utils::links::build_console_url;

/// Builds the chat message for a single stack status change.
pub struct MessageComposer<'a> {
    cloud: &'a dyn CloudApi,
    overrides: Option<&'a dyn ChannelOverrides>,
    default_channel: Option<&'a str>,
}

impl<'a> MessageComposer<'a> {
    #[must_use]
    pub fn new(
        cloud: &'a dyn CloudApi,
        overrides: Option<&'a dyn ChannelOverrides>,
        default_channel: Option<&'a str>,
    ) -> Self {
        Self {
            cloud,
            overrides,
            default_channel,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the stack id carries no region or a cloud lookup fails.
    pub async fn compose_stack_message(&self, event: &StackEvent) -> Result<ChatMessage, NotifyError> {
        let stack_url = build_console_url(&event.stack_id)?;

        let mut attachments = vec![self.stack_update_attachment(event).await?];

        if wants_resource_breakdown(&event.resource_status) {
            let resources = self.cloud.list_stack_resources(&event.stack_name).await?;
            debug!(
                stack = %event.stack_name,
                resources = resources.len(),
                "Fetched resources for breakdown"
            );
            attachments.push(stack_summary_attachment(&resources));
        }

        let text = format!(
            "Stack: *{}* has entered status: *{}* <{}|(view in web console)>",
            event.stack_name, event.resource_status, stack_url
        );

        let channel = self.resolve_channel(&event.stack_name);
        info!(
            stack = %event.stack_name,
            status = %event.resource_status,
            channel = ?channel,
            "Composed stack update message"
        );

        Ok(ChatMessage {
            channel,
            text: Some(text),
            attachments,
            ..ChatMessage::default()
        })
    }

    /// Per-stack override, then the default channel.
    #[must_use]
    pub fn resolve_channel(&self, stack_name: &str) -> Option<String> {
        self.overrides
            .and_then(|o| o.channel_for(stack_name))
            .or_else(|| self.default_channel.map(ToString::to_string))
    }

    async fn stack_update_attachment(&self, event: &StackEvent) -> Result<Attachment, NotifyError> {
        let user = resolve_principal_name(self.cloud, &event.principal_id).await?;

        Ok(Attachment {
            color: Some(color_for(&event.resource_status).to_string()),
            fields: vec![
                AttachmentField::new("ARN", &event.stack_id),
                AttachmentField::new("User", user).short(),
                AttachmentField::new("Timestamp", &event.timestamp).short(),
            ],
            ..Attachment::default()
        })
    }
}

/// Display name of the IAM user with the given id, or `unknown (<id>)`.
///
/// # Errors
///
/// Returns an error if the identity listing fails.
pub async fn resolve_principal_name(
    cloud: &dyn CloudApi,
    principal_id: &str,
) -> Result<String, NotifyError> {
    let identities = cloud.list_identities().await?;
    Ok(identities
        .into_iter()
        .find(|identity| identity.id == principal_id)
        .map_or_else(|| format!("unknown ({principal_id})"), |identity| identity.name))
}

#[must_use]
pub fn summarize(resources: &[StackResource]) -> ResourceTally {
    let mut tally = ResourceTally::new();
    for res in resources {
        *tally.entry(res.resource_type.clone()).or_insert(0) += 1;
    }
    tally
}

/// Breakdown of a stack's resources by type.
#[must_use]
pub fn stack_summary_attachment(resources: &[StackResource]) -> Attachment {
    let title = format!("Breakdown of all {} resources", resources.len());

    let fields = summarize(resources)
        .into_iter()
        .map(|(kind, count)| {
            AttachmentField::new(format!("Type {kind}"), format!("Total {count}")).short()
        })
        .collect();

    Attachment {
        color: None,
        fields,
        title: Some(title.clone()),
        fallback: Some(title),
    }
}
