use std::collections::HashMap;

use crate::core::models::{STACK_RESOURCE_TYPE, StackEvent};
use crate::errors::NotifyError;

/// Splits a CloudFormation SNS message body into its `Key=Value` pairs.
///
/// The body is a shell-quoted token list, one token per line in practice:
///
/// ```
/// use cf_notify::notification_parser::parse_tokens;
///
/// let body = "StackName='web' ResourceStatus='UPDATE_COMPLETE'\nLogicalResourceId='web'";
/// let tokens = parse_tokens(body).unwrap();
/// assert_eq!(tokens["StackName"], "web");
/// assert_eq!(tokens["ResourceStatus"], "UPDATE_COMPLETE");
/// ```
///
/// # Errors
///
/// Returns `MalformedEvent` if the quoting is unbalanced or a token has no `=`.
pub fn parse_tokens(body: &str) -> Result<HashMap<String, String>, NotifyError> {
    let tokens = shlex::split(body)
        .ok_or_else(|| NotifyError::MalformedEvent("unbalanced quoting in message".to_string()))?;

    tokens
        .into_iter()
        .map(|token| {
            token
                .split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| NotifyError::MalformedEvent(format!("token without '=': {token}")))
        })
        .collect()
}

/// Parses a message body into a [`StackEvent`].
///
/// Returns `Ok(None)` when the notification concerns a resource inside the
/// stack rather than the stack itself.
///
/// # Errors
///
/// Returns `MalformedEvent` if the body cannot be tokenized or a required key
/// is missing.
pub fn parse_notification(body: &str) -> Result<Option<StackEvent>, NotifyError> {
    let mut fields = parse_tokens(body)?;

    let resource_type = take(&mut fields, "ResourceType")?;
    if resource_type != STACK_RESOURCE_TYPE {
        return Ok(None);
    }

    Ok(Some(StackEvent {
        stack_id: take(&mut fields, "StackId")?,
        stack_name: take(&mut fields, "StackName")?,
        resource_type,
        resource_status: take(&mut fields, "ResourceStatus")?,
        principal_id: take(&mut fields, "PrincipalId")?,
        timestamp: take(&mut fields, "Timestamp")?,
    }))
}

fn take(fields: &mut HashMap<String, String>, key: &str) -> Result<String, NotifyError> {
    fields
        .remove(key)
        .ok_or_else(|| NotifyError::MalformedEvent(format!("missing key {key}")))
}
