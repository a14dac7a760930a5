use log::warn;
use once_cell::sync::Lazy;
use serde::Deserialize;

/// Process-wide configuration, loaded once on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load);

fn default_backend_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Origin of the broadcast backend, without a trailing slash.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Upper bound on any single request to the backend.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: default_backend_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    fn load() -> Self {
        let path =
            std::env::var("BROADCAST_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_yaml::from_str(&raw).expect("Failed to parse config file"),
            Err(_) => {
                warn!("No config file at {}, using defaults", path);
                Config::default()
            }
        };

        if let Ok(url) = std::env::var("BROADCAST_BACKEND_URL") {
            config.backend_url = url;
        }

        while config.backend_url.ends_with('/') {
            config.backend_url.pop();
        }

        config
    }
}
