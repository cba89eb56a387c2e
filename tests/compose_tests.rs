mod common;

use common::{FakeCloud, STACK_ID};
use std::collections::HashMap;

use cf_notify::NotifyError;
use cf_notify::core::channels::{ChannelOverrides, StaticChannelOverrides};
use cf_notify::core::models::{AttachmentField, StackEvent, StackResource};
use cf_notify::notify::compose::{MessageComposer, resolve_principal_name, summarize};

fn stack_event(status: &str) -> StackEvent {
    StackEvent {
        stack_id: STACK_ID.to_string(),
        stack_name: "web-app".to_string(),
        resource_type: "AWS::CloudFormation::Stack".to_string(),
        resource_status: status.to_string(),
        principal_id: "AIDA1".to_string(),
        timestamp: "2016-08-12T12:00:00.000Z".to_string(),
    }
}

#[tokio::test]
async fn test_create_complete_has_primary_and_breakdown() {
    let cloud = FakeCloud::default()
        .with_user("AIDA1", "alice")
        .with_resources("web-app", &["AWS::S3::Bucket", "AWS::IAM::Role", "AWS::S3::Bucket"]);
    let composer = MessageComposer::new(&cloud, None, None);

    let message = composer
        .compose_stack_message(&stack_event("CREATE_COMPLETE"))
        .await
        .expect("composes");

    let text = message.text.expect("text");
    assert!(text.starts_with("Stack: *web-app* has entered status: *CREATE_COMPLETE* <https://us-east-1.console"));
    assert!(text.ends_with("|(view in web console)>"));

    assert_eq!(message.attachments.len(), 2);
    let primary = &message.attachments[0];
    assert_eq!(primary.color.as_deref(), Some("good"));
    assert_eq!(
        primary.fields,
        vec![
            AttachmentField::new("ARN", STACK_ID),
            AttachmentField::new("User", "alice").short(),
            AttachmentField::new("Timestamp", "2016-08-12T12:00:00.000Z").short(),
        ]
    );

    let breakdown = &message.attachments[1];
    assert_eq!(breakdown.title.as_deref(), Some("Breakdown of all 3 resources"));
    assert_eq!(breakdown.fields[0].title, "Type AWS::IAM::Role");
    assert_eq!(breakdown.fields[1].value, "Total 2");
    assert_eq!(cloud.resource_calls(), 1);
}

#[tokio::test]
async fn test_other_statuses_skip_breakdown() {
    let cloud = FakeCloud::default().with_user("AIDA1", "alice");
    let composer = MessageComposer::new(&cloud, None, None);

    let message = composer
        .compose_stack_message(&stack_event("UPDATE_ROLLBACK_FAILED"))
        .await
        .expect("composes");

    assert_eq!(message.attachments.len(), 1);
    assert_eq!(message.attachments[0].color.as_deref(), Some("danger"));
    assert_eq!(cloud.resource_calls(), 0);
}

#[tokio::test]
async fn test_delete_in_progress_with_no_resources() {
    let cloud = FakeCloud::default();
    let composer = MessageComposer::new(&cloud, None, None);

    let message = composer
        .compose_stack_message(&stack_event("DELETE_IN_PROGRESS"))
        .await
        .expect("composes");

    assert_eq!(message.attachments.len(), 2);
    assert_eq!(
        message.attachments[1].title.as_deref(),
        Some("Breakdown of all 0 resources")
    );
    assert!(message.attachments[1].fields.is_empty());
}

#[tokio::test]
async fn test_unknown_principal_placeholder() {
    let cloud = FakeCloud::default()
        .with_user("AIDA2", "bob")
        .with_user("AIDA3", "carol");

    let name = resolve_principal_name(&cloud, "AROA-role-session").await.expect("lookup");
    assert_eq!(name, "unknown (AROA-role-session)");
}

#[tokio::test]
async fn test_first_matching_principal_wins() {
    let cloud = FakeCloud::default()
        .with_user("AIDA1", "alice")
        .with_user("AIDA1", "alice-duplicate");

    let name = resolve_principal_name(&cloud, "AIDA1").await.expect("lookup");
    assert_eq!(name, "alice");
}

#[tokio::test]
async fn test_channel_resolution() {
    let cloud = FakeCloud::default();
    let overrides = StaticChannelOverrides::new(HashMap::from([(
        "web-app".to_string(),
        "#web-team".to_string(),
    )]));

    let with_override = MessageComposer::new(
        &cloud,
        Some(&overrides as &dyn ChannelOverrides),
        Some("#infra"),
    );
    assert_eq!(with_override.resolve_channel("web-app").as_deref(), Some("#web-team"));
    assert_eq!(with_override.resolve_channel("billing").as_deref(), Some("#infra"));

    let default_only = MessageComposer::new(&cloud, None, Some("#infra"));
    assert_eq!(default_only.resolve_channel("web-app").as_deref(), Some("#infra"));

    let neither = MessageComposer::new(&cloud, None, None);
    assert_eq!(neither.resolve_channel("web-app"), None);

    let message = with_override
        .compose_stack_message(&stack_event("UPDATE_COMPLETE"))
        .await
        .expect("composes");
    assert_eq!(message.channel.as_deref(), Some("#web-team"));
}

#[tokio::test]
async fn test_malformed_stack_id_fails_before_lookups() {
    let cloud = FakeCloud::default();
    let composer = MessageComposer::new(&cloud, None, None);
    let mut event = stack_event("CREATE_COMPLETE");
    event.stack_id = "X".to_string();

    let err = composer.compose_stack_message(&event).await.unwrap_err();
    assert!(matches!(err, NotifyError::MalformedIdentifier(_)));
    assert_eq!(cloud.resource_calls(), 0);
}

#[tokio::test]
async fn test_cloud_failure_propagates() {
    let cloud = FakeCloud::failing();
    let composer = MessageComposer::new(&cloud, None, None);

    let err = composer
        .compose_stack_message(&stack_event("UPDATE_COMPLETE"))
        .await
        .unwrap_err();
    assert!(matches!(err, NotifyError::AwsError(_)));
}

#[test]
fn test_summarize_is_order_independent() {
    let kinds = ["AWS::S3::Bucket", "AWS::Lambda::Function", "AWS::S3::Bucket", "AWS::IAM::Role"];
    let forward: Vec<StackResource> = kinds
        .iter()
        .map(|k| StackResource { resource_type: (*k).to_string() })
        .collect();
    let mut reversed = forward.clone();
    reversed.reverse();

    let tally = summarize(&forward);
    assert_eq!(tally, summarize(&reversed));
    assert_eq!(
        tally.iter().map(|(k, v)| (k.as_str(), *v)).collect::<Vec<_>>(),
        vec![
            ("AWS::IAM::Role", 1),
            ("AWS::Lambda::Function", 1),
            ("AWS::S3::Bucket", 2),
        ]
    );
    assert!(summarize(&[]).is_empty());
}
