use std::env;

/// Process-wide settings, read once per invocation.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub webhook_url: Option<String>,
    pub default_channel: Option<String>,
    pub debug: bool,
    pub send_empty_audit: bool,
    /// Inline JSON object mapping stack names to channels.
    pub channel_overrides: Option<String>,
    /// SSM parameter holding the same JSON object.
    pub channel_overrides_param: Option<String>,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            webhook_url: get("WEBHOOK"),
            default_channel: get("CHANNEL"),
            debug: get("DEBUG").is_some_and(|v| is_truthy(&v)),
            send_empty_audit: get("SEND_EMPTY_AUDIT").is_some_and(|v| is_truthy(&v)),
            channel_overrides: get("CHANNEL_OVERRIDES"),
            channel_overrides_param: get("CHANNEL_OVERRIDES_PARAM"),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    let v = value.trim();
    !(v == "0" || v.eq_ignore_ascii_case("false"))
}
