//! Environment-variable configuration loader.
//!
//! The memory layer is configured entirely through `LETTA_*` environment
//! variables; missing or malformed values fall back to defaults with a
//! warning rather than failing startup.

use recall_types::config::{DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_MS, MemoryConfig};

/// Set to `"true"` to enable the memory layer.
pub const ENV_ENABLED: &str = "LETTA_ENABLED";
/// Base URL of the memory service.
pub const ENV_SERVER_URL: &str = "LETTA_SERVER_URL";
/// ID of the agent holding the memory.
pub const ENV_AGENT_ID: &str = "LETTA_AGENT_ID";
/// Query timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "LETTA_TIMEOUT_MS";

/// Load the memory configuration from process environment variables.
pub fn load_from_env() -> MemoryConfig {
    from_lookup(|key| std::env::var(key).ok())
}

/// Build a config from an arbitrary key lookup (the env in production,
/// a map in tests).
fn from_lookup(get: impl Fn(&str) -> Option<String>) -> MemoryConfig {
    let enabled = get(ENV_ENABLED).is_some_and(|v| v == "true");

    let server_url = get(ENV_SERVER_URL)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    let agent_id = get(ENV_AGENT_ID).unwrap_or_default();

    let timeout_ms = match get(ENV_TIMEOUT_MS) {
        None => DEFAULT_TIMEOUT_MS,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "invalid {ENV_TIMEOUT_MS}, using default");
            DEFAULT_TIMEOUT_MS
        }),
    };

    MemoryConfig {
        enabled,
        server_url,
        agent_id,
        timeout_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn empty_environment_yields_inactive_defaults() {
        let config = from_lookup(lookup(&[]));
        assert!(!config.enabled);
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.agent_id, "");
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn enabled_requires_exactly_true() {
        let config = from_lookup(lookup(&[(ENV_ENABLED, "true")]));
        assert!(config.enabled);

        for value in ["TRUE", "1", "yes", ""] {
            let config = from_lookup(lookup(&[(ENV_ENABLED, value)]));
            assert!(!config.enabled, "{value:?} should not enable");
        }
    }

    #[test]
    fn explicit_values_are_used() {
        let config = from_lookup(lookup(&[
            (ENV_ENABLED, "true"),
            (ENV_SERVER_URL, "http://letta:9000"),
            (ENV_AGENT_ID, "agent-42"),
            (ENV_TIMEOUT_MS, "1500"),
        ]));
        assert!(config.is_active());
        assert_eq!(config.server_url, "http://letta:9000");
        assert_eq!(config.agent_id, "agent-42");
        assert_eq!(config.timeout_ms, 1500);
    }

    #[test]
    fn malformed_timeout_falls_back_to_default() {
        let config = from_lookup(lookup(&[(ENV_TIMEOUT_MS, "soon")]));
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn empty_server_url_falls_back_to_default() {
        let config = from_lookup(lookup(&[(ENV_SERVER_URL, "")]));
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    }
}
