//! Cloud API client module
//!
//! The three lookups the notifier performs against AWS, behind a trait so the
//! router and composer can run against a fake in tests.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudformation::Client as CloudFormationClient;
use aws_sdk_iam::Client as IamClient;
use tracing::debug;

use crate::core::models::{Identity, StackResource, StackSummary};
use crate::errors::NotifyError;

#[async_trait]
pub trait CloudApi: Send + Sync {
    /// All stacks in the account and region, across every page.
    async fn list_stacks(&self) -> Result<Vec<StackSummary>, NotifyError>;

    /// Resources belonging to the named stack.
    async fn list_stack_resources(&self, stack_name: &str)
    -> Result<Vec<StackResource>, NotifyError>;

    /// All IAM users, across every page.
    async fn list_identities(&self) -> Result<Vec<Identity>, NotifyError>;
}

/// [`CloudApi`] backed by the CloudFormation and IAM SDK clients.
#[derive(Debug, Clone)]
pub struct AwsCloudClient {
    cloudformation: CloudFormationClient,
    iam: IamClient,
}

impl AwsCloudClient {
    #[must_use]
    pub fn new(shared: &SdkConfig) -> Self {
        Self {
            cloudformation: CloudFormationClient::new(shared),
            iam: IamClient::new(shared),
        }
    }

    pub async fn from_env() -> Self {
        let shared = aws_config::from_env().load().await;
        Self::new(&shared)
    }
}

// Some SDK getters return `&str` for required members and `Option<&str>` for
// the rest; accept both.
fn owned<'a>(value: impl Into<Option<&'a str>>) -> String {
    value.into().unwrap_or_default().to_string()
}

#[async_trait]
impl CloudApi for AwsCloudClient {
    async fn list_stacks(&self) -> Result<Vec<StackSummary>, NotifyError> {
        let mut stacks = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let resp = self
                .cloudformation
                .describe_stacks()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| NotifyError::AwsError(format!("cloudformation describe_stacks: {e}")))?;

            stacks.extend(resp.stacks().iter().map(|stack| StackSummary {
                name: owned(stack.stack_name()),
                notification_arns: stack.notification_arns().to_vec(),
            }));

            match resp.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(count = stacks.len(), "Listed stacks");
        Ok(stacks)
    }

    async fn list_stack_resources(
        &self,
        stack_name: &str,
    ) -> Result<Vec<StackResource>, NotifyError> {
        let resp = self
            .cloudformation
            .describe_stack_resources()
            .stack_name(stack_name)
            .send()
            .await
            .map_err(|e| {
                NotifyError::AwsError(format!("cloudformation describe_stack_resources: {e}"))
            })?;

        Ok(resp
            .stack_resources()
            .iter()
            .map(|res| StackResource {
                resource_type: owned(res.resource_type()),
            })
            .collect())
    }

    async fn list_identities(&self) -> Result<Vec<Identity>, NotifyError> {
        let mut identities = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let resp = self
                .iam
                .list_users()
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| NotifyError::AwsError(format!("iam list_users: {e}")))?;

            identities.extend(resp.users().iter().map(|user| Identity {
                id: owned(user.user_id()),
                name: owned(user.user_name()),
            }));

            match resp.marker() {
                Some(m) if !m.is_empty() => marker = Some(m.to_string()),
                _ => break,
            }
        }

        debug!(count = identities.len(), "Listed IAM users");
        Ok(identities)
    }
}
