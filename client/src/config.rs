//! Client configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default ticketing backend, used until a tenant endpoint is resolved
pub const DEFAULT_API_URL: &str = "https://khc-backend.wowup.asia";

/// Default endpoint resolution service
pub const DEFAULT_RESOLVER_URL: &str = "https://checkin.khc.workers.dev";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL used when no tenant endpoint is stored
    pub api_url: String,
    /// Endpoint resolution service
    pub resolver_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Where the session is persisted
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            resolver_url: DEFAULT_RESOLVER_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            session_file: PathBuf::from("checkin-session.json"),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `CHECKIN_API_URL`: Default backend (default: `https://khc-backend.wowup.asia`)
    /// - `CHECKIN_RESOLVER_URL`: Resolver (default: `https://checkin.khc.workers.dev`)
    /// - `CHECKIN_REQUEST_TIMEOUT_SECS`: Request timeout (default: 10)
    /// - `CHECKIN_SESSION_FILE`: Session file (default: `checkin-session.json`)
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = env::var("CHECKIN_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.api_url);

        let resolver_url = env::var("CHECKIN_RESOLVER_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.resolver_url);

        let request_timeout = env::var("CHECKIN_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map_or(defaults.request_timeout, Duration::from_secs);

        let session_file = env::var("CHECKIN_SESSION_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.session_file, PathBuf::from);

        Self {
            api_url,
            resolver_url,
            request_timeout,
            session_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_hosts() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "https://khc-backend.wowup.asia");
        assert_eq!(config.resolver_url, "https://checkin.khc.workers.dev");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
