//! Stack status to attachment color mapping.
//!
//! Status codes from
//! <http://docs.aws.amazon.com/AWSCloudFormation/latest/UserGuide/using-cfn-describing-stacks.html>.

/// Color used for status codes outside the known set.
pub const NEUTRAL_COLOR: &str = "#000000";

/// Statuses that warrant a resource breakdown attachment.
pub const DESCRIBE_STACK_STATUSES: [&str; 2] = ["CREATE_COMPLETE", "DELETE_IN_PROGRESS"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Danger,
    Unknown,
}

impl Severity {
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        match status {
            "CREATE_COMPLETE"
            | "CREATE_IN_PROGRESS"
            | "DELETE_COMPLETE"
            | "DELETE_IN_PROGRESS"
            | "UPDATE_COMPLETE"
            | "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS"
            | "UPDATE_IN_PROGRESS" => Self::Success,
            "ROLLBACK_COMPLETE"
            | "ROLLBACK_IN_PROGRESS"
            | "UPDATE_ROLLBACK_COMPLETE"
            | "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS"
            | "UPDATE_ROLLBACK_IN_PROGRESS" => Self::Warning,
            "CREATE_FAILED" | "DELETE_FAILED" | "ROLLBACK_FAILED" | "UPDATE_ROLLBACK_FAILED" => {
                Self::Danger
            }
            _ => Self::Unknown,
        }
    }

    /// Slack attachment color for this severity.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Success => "good",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Unknown => NEUTRAL_COLOR,
        }
    }
}

#[must_use]
pub fn color_for(status: &str) -> &'static str {
    Severity::from_status(status).color()
}

#[must_use]
pub fn wants_resource_breakdown(status: &str) -> bool {
    DESCRIBE_STACK_STATUSES.contains(&status)
}
