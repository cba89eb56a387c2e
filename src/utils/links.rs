use regex::Regex;
use url::form_urlencoded;

use crate::errors::NotifyError;

static REGION_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^arn:aws[a-z-]*:cloudformation:(?P<region>[a-z]{2}-[a-z]{4,9}-[1-2])")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

/// Extract the region from a stack ARN such as
/// `arn:aws:cloudformation:us-east-1:123456789012:stack/web/abc`.
///
/// # Errors
///
/// Returns `MalformedIdentifier` if the ARN does not start with a
/// CloudFormation prefix followed by a region code.
pub fn stack_region(stack_id: &str) -> Result<&str, NotifyError> {
    REGION_RE
        .captures(stack_id)
        .and_then(|caps| caps.name("region"))
        .map(|m| m.as_str())
        .ok_or_else(|| NotifyError::MalformedIdentifier(stack_id.to_string()))
}

/// Deep link to the stack's events tab in the CloudFormation console.
///
/// # Errors
///
/// Returns `MalformedIdentifier` if no region can be read from `stack_id`.
pub fn build_console_url(stack_id: &str) -> Result<String, NotifyError> {
    let region = stack_region(stack_id)?;

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("filter", "active")
        .append_pair("tab", "events")
        .append_pair("stackId", stack_id)
        .finish();

    Ok(format!(
        "https://{region}.console.aws.amazon.com/cloudformation/home?region={region}#/stacks?{query}"
    ))
}
