use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource type CloudFormation reports for the stack itself.
pub const STACK_RESOURCE_TYPE: &str = "AWS::CloudFormation::Stack";

/// A stack lifecycle notification, parsed from the SNS message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEvent {
    pub stack_id: String,
    pub stack_name: String,
    pub resource_type: String,
    pub resource_status: String,
    pub principal_id: String,
    pub timestamp: String,
}

impl StackEvent {
    #[must_use]
    pub fn is_stack_itself(&self) -> bool {
        self.resource_type == STACK_RESOURCE_TYPE
    }
}

/// Outgoing webhook payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default)]
    pub icon_emoji: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub fields: Vec<AttachmentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub short: bool,
}

impl AttachmentField {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: false,
        }
    }

    #[must_use]
    pub fn short(mut self) -> Self {
        self.short = true;
        self
    }
}

/// Resource count per resource type, ordered by type.
pub type ResourceTally = BTreeMap<String, usize>;

/// A stack as reported by the cloud API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSummary {
    pub name: String,
    pub notification_arns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackResource {
    pub resource_type: String,
}

/// An IAM identity that may have triggered a stack change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub name: String,
}
