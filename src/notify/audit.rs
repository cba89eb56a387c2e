use tracing::info;

use crate::clients::CloudApi;
use crate::core::models::{ChatMessage, StackSummary};
use crate::errors::NotifyError;

/// Stacks with an empty notification target list.
#[must_use]
pub fn unmonitored_stacks(stacks: &[StackSummary]) -> Vec<&StackSummary> {
    stacks
        .iter()
        .filter(|s| s.notification_arns.is_empty())
        .collect()
}

#[must_use]
pub fn audit_text(stacks: &[&StackSummary]) -> String {
    let names: Vec<String> = stacks.iter().map(|s| format!("\"{}\"", s.name)).collect();
    format!(
        "The following stacks are not configured for notifications: {}",
        names.join(", ")
    )
}

/// Report stacks that have no notification wiring.
///
/// Returns `Ok(None)` when every stack has at least one target.
///
/// # Errors
///
/// Returns an error if the stack listing fails.
pub async fn audit_stacks_without_notifications(
    cloud: &dyn CloudApi,
) -> Result<Option<ChatMessage>, NotifyError> {
    let stacks = cloud.list_stacks().await?;
    let missing = unmonitored_stacks(&stacks);

    info!(
        total = stacks.len(),
        unmonitored = missing.len(),
        "Audited stack notification wiring"
    );

    if missing.is_empty() {
        return Ok(None);
    }

    Ok(Some(ChatMessage {
        text: Some(audit_text(&missing)),
        ..ChatMessage::default()
    }))
}
