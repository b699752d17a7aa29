//! Runtime settings, read from environment variables with in-code defaults.

use serde::Deserialize;
use serde::Serialize;
use std::env;
use std::fmt;
use std::time::Duration;

/// Connection settings for the external query service.
///
/// Only ever constructed on the server; the credentials are not sent to the
/// browser.
#[derive(Clone, PartialEq, Eq)]
pub struct QueryServiceConfig {
    pub endpoint: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
    /// Extra attempts after a retryable failure.
    pub retries: u32,
}

impl QueryServiceConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:8093/query/service";
    pub const DEFAULT_USERNAME: &'static str = "Administrator";
    pub const DEFAULT_PASSWORD: &'static str = "password";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_RETRIES: u32 = 1;

    /// Creates a config from environment variables.
    ///
    /// # Environment Variables
    /// - `QUERY_SERVICE_URL`: full URL of the query service endpoint.
    /// - `QUERY_SERVICE_USER` / `QUERY_SERVICE_PASSWORD`: basic auth credentials.
    /// - `QUERY_TIMEOUT_SECS`: per-request timeout.
    /// - `QUERY_RETRIES`: extra attempts after a transport error or 5xx.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let endpoint = lookup("QUERY_SERVICE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_ENDPOINT.to_string());
        let username =
            lookup("QUERY_SERVICE_USER").unwrap_or_else(|| Self::DEFAULT_USERNAME.to_string());
        let password =
            lookup("QUERY_SERVICE_PASSWORD").unwrap_or_else(|| Self::DEFAULT_PASSWORD.to_string());
        let timeout_secs = lookup("QUERY_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECS);
        let retries = lookup("QUERY_RETRIES")
            .and_then(|s| s.parse().ok())
            .unwrap_or(Self::DEFAULT_RETRIES);

        Self {
            endpoint,
            username,
            password,
            timeout: Duration::from_secs(timeout_secs),
            retries,
        }
    }
}

impl Default for QueryServiceConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl fmt::Debug for QueryServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .finish()
    }
}

/// Static facts about the deployment shown in the header and hero section.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DashboardInfo {
    pub environment: String,
    pub connected_nodes: u32,
    pub validators: u32,
    /// Whether ids in the landing lists open the detail screen. When off,
    /// clicking an id only reveals it in full.
    pub link_latest: bool,
}

impl DashboardInfo {
    /// # Environment Variables
    /// - `DARKBLOCK_ENVIRONMENT`: label shown in the header, e.g. "DEVNET".
    /// - `DARKBLOCK_NODES`: number of connected nodes.
    /// - `DARKBLOCK_VALIDATORS`: number of validators.
    /// - `DARKBLOCK_LINK_LATEST`: `false` or `0` turns off navigation from the
    ///   landing lists.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            environment: lookup("DARKBLOCK_ENVIRONMENT")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "DEVNET".to_string()),
            connected_nodes: lookup("DARKBLOCK_NODES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            validators: lookup("DARKBLOCK_VALIDATORS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
            link_latest: lookup("DARKBLOCK_LINK_LATEST")
                .map(|s| !matches!(s.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(true),
        }
    }
}

impl Default for DashboardInfo {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = QueryServiceConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.endpoint, QueryServiceConfig::DEFAULT_ENDPOINT);
        assert_eq!(config.username, "Administrator");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retries, 1);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = QueryServiceConfig::from_lookup(lookup_from(&[
            ("QUERY_SERVICE_URL", "http://db:8093/query/service"),
            ("QUERY_TIMEOUT_SECS", "3"),
            ("QUERY_RETRIES", "0"),
        ]));
        assert_eq!(config.endpoint, "http://db:8093/query/service");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.retries, 0);
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = QueryServiceConfig::from_lookup(lookup_from(&[("QUERY_RETRIES", "lots")]));
        assert_eq!(config.retries, QueryServiceConfig::DEFAULT_RETRIES);
    }

    #[test]
    fn debug_output_hides_the_password() {
        let config = QueryServiceConfig::from_lookup(lookup_from(&[(
            "QUERY_SERVICE_PASSWORD",
            "hunter2",
        )]));
        let printed = format!("{config:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn dashboard_info_defaults() {
        let info = DashboardInfo::from_lookup(lookup_from(&[]));
        assert_eq!(info.environment, "DEVNET");
        assert_eq!(info.connected_nodes, 3);
        assert_eq!(info.validators, 1);
    }

    #[test]
    fn landing_links_are_on_unless_turned_off() {
        assert!(DashboardInfo::from_lookup(lookup_from(&[])).link_latest);
        assert!(
            DashboardInfo::from_lookup(lookup_from(&[("DARKBLOCK_LINK_LATEST", "true")]))
                .link_latest
        );
        assert!(
            !DashboardInfo::from_lookup(lookup_from(&[("DARKBLOCK_LINK_LATEST", "False")]))
                .link_latest
        );
        assert!(
            !DashboardInfo::from_lookup(lookup_from(&[("DARKBLOCK_LINK_LATEST", "0")]))
                .link_latest
        );
    }
}
