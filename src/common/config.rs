//! Client configuration
//! Resolved from the environment, then overridden by command line flags

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_SOCKET_PATH: &str = "/ws/";
const DEFAULT_NAMESPACE: &str = "/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const STORAGE_FILE: &str = ".shopdesk/storage.json";

#[derive(Debug, Clone)]
pub struct RealtimeConfig {
    /// `ws://` or `wss://` origin of the socket server
    pub socket_url: String,
    pub path: String,
    pub namespace: String,
}

impl RealtimeConfig {
    /// Engine.IO v4 websocket endpoint
    pub fn endpoint(&self) -> String {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        format!(
            "{}{}?EIO=4&transport=websocket",
            self.socket_url.trim_end_matches('/'),
            path
        )
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub realtime: RealtimeConfig,
    pub storage_path: PathBuf,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let api_url = env::var("SHOPDESK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let socket_url =
            env::var("SHOPDESK_SOCKET_URL").unwrap_or_else(|_| socket_origin_for(&api_url));

        let path = env::var("SHOPDESK_SOCKET_PATH").unwrap_or_else(|_| DEFAULT_SOCKET_PATH.to_string());

        let namespace =
            env::var("SHOPDESK_NAMESPACE").unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string());

        let storage_path = env::var("SHOPDESK_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_storage_path());

        let request_timeout = env::var("SHOPDESK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            realtime: RealtimeConfig {
                socket_url,
                path,
                namespace,
            },
            storage_path,
            request_timeout: Duration::from_secs(request_timeout),
        }
    }

    /// Config pointing at a single origin, used by tests and embedders
    pub fn for_origin(api_url: &str, storage_path: PathBuf) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            realtime: RealtimeConfig {
                socket_url: socket_origin_for(api_url),
                path: DEFAULT_SOCKET_PATH.to_string(),
                namespace: DEFAULT_NAMESPACE.to_string(),
            },
            storage_path,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the API origin; the socket origin follows unless set explicitly
    pub fn with_api_url(mut self, api_url: &str, socket_url: Option<&str>) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self.realtime.socket_url = socket_url
            .map(str::to_string)
            .unwrap_or_else(|| socket_origin_for(api_url));
        self
    }
}

/// Maps an `http(s)://` origin onto the matching `ws(s)://` origin
pub fn socket_origin_for(api_url: &str) -> String {
    let trimmed = api_url.trim_end_matches('/');
    if let Some(rest) = trimmed.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = trimmed.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        trimmed.to_string()
    }
}

fn default_storage_path() -> PathBuf {
    home::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STORAGE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_origin_follows_scheme() {
        assert_eq!(socket_origin_for("http://localhost:8000"), "ws://localhost:8000");
        assert_eq!(socket_origin_for("https://shop.example.com/"), "wss://shop.example.com");
    }

    #[test]
    fn test_realtime_endpoint() {
        let config = ClientConfig::for_origin("http://127.0.0.1:9000/", PathBuf::from("/tmp/x"));
        assert_eq!(config.api_url, "http://127.0.0.1:9000");
        assert_eq!(
            config.realtime.endpoint(),
            "ws://127.0.0.1:9000/ws/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_with_api_url_override() {
        let config = ClientConfig::for_origin("http://a:1", PathBuf::from("/tmp/x"))
            .with_api_url("https://b:2", None);
        assert_eq!(config.realtime.socket_url, "wss://b:2");

        let config = config.with_api_url("https://b:2", Some("ws://c:3"));
        assert_eq!(config.realtime.socket_url, "ws://c:3");
    }
}
