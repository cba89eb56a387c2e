#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use cf_notify::NotifyError;
use cf_notify::clients::{ChatTransport, CloudApi};
use cf_notify::core::models::{ChatMessage, Identity, StackResource, StackSummary};

pub const STACK_ID: &str = "arn:aws:cloudformation:us-east-1:123456789012:stack/web-app/0f1e2d3c";

/// In-memory stand-in for CloudFormation and IAM.
#[derive(Default)]
pub struct FakeCloud {
    pub stacks: Vec<StackSummary>,
    pub resources: HashMap<String, Vec<StackResource>>,
    pub identities: Vec<Identity>,
    pub fail: bool,
    pub resource_calls: AtomicUsize,
    pub identity_calls: AtomicUsize,
}

impl FakeCloud {
    pub fn with_user(mut self, id: &str, name: &str) -> Self {
        self.identities.push(Identity {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_resources(mut self, stack: &str, kinds: &[&str]) -> Self {
        self.resources.insert(
            stack.to_string(),
            kinds
                .iter()
                .map(|k| StackResource {
                    resource_type: (*k).to_string(),
                })
                .collect(),
        );
        self
    }

    pub fn with_stack(mut self, name: &str, notification_arns: &[&str]) -> Self {
        self.stacks.push(StackSummary {
            name: name.to_string(),
            notification_arns: notification_arns.iter().map(|a| (*a).to_string()).collect(),
        });
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn resource_calls(&self) -> usize {
        self.resource_calls.load(Ordering::SeqCst)
    }

    fn check(&self, op: &str) -> Result<(), NotifyError> {
        if self.fail {
            Err(NotifyError::AwsError(format!("{op}: access denied")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CloudApi for FakeCloud {
    async fn list_stacks(&self) -> Result<Vec<StackSummary>, NotifyError> {
        self.check("describe_stacks")?;
        Ok(self.stacks.clone())
    }

    async fn list_stack_resources(
        &self,
        stack_name: &str,
    ) -> Result<Vec<StackResource>, NotifyError> {
        self.resource_calls.fetch_add(1, Ordering::SeqCst);
        self.check("describe_stack_resources")?;
        Ok(self.resources.get(stack_name).cloned().unwrap_or_default())
    }

    async fn list_identities(&self) -> Result<Vec<Identity>, NotifyError> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        self.check("list_users")?;
        Ok(self.identities.clone())
    }
}

/// Transport that keeps every message it is asked to send.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<ChatMessage>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<ChatMessage> {
        self.sent.lock().expect("transport lock").clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send(&self, message: &ChatMessage) -> Result<(), NotifyError> {
        self.sent.lock().expect("transport lock").push(message.clone());
        Ok(())
    }
}

/// Wrap a raw notification body in the SNS record shape Lambda receives.
pub fn sns_event(body: &str) -> Value {
    serde_json::json!({
        "Records": [ { "Sns": { "Message": body } } ]
    })
}

pub fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let raw = std::fs::read_to_string(&path).expect("fixture exists");
    serde_json::from_str(&raw).expect("fixture is valid JSON")
}
