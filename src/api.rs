use std::time::Duration;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{BroadcastRequest, Guild, GuildList, GuildStats};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connect, DNS, timeout, or a malformed body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered the send with a non-2xx status and an error message.
    #[error("{0}")]
    Rejected(String),
}

/// Typed client for the three broadcast endpoints.
#[derive(Clone)]
pub struct BroadcastApi {
    http: reqwest::Client,
    base_url: String,
}

impl BroadcastApi {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        BroadcastApi { http, base_url }
    }

    /// `GET /api/broadcast/guilds`
    pub async fn list_guilds(&self) -> Result<Vec<Guild>, ApiError> {
        let url = format!("{}/api/broadcast/guilds", self.base_url);
        debug!("GET {}", url);

        let list: GuildList = self.http.get(&url).send().await?.json().await?;
        Ok(list.guilds)
    }

    /// `GET /api/broadcast/guild/{guild_id}/stats`
    pub async fn guild_stats(&self, guild_id: u64) -> Result<GuildStats, ApiError> {
        let url = format!("{}/api/broadcast/guild/{}/stats", self.base_url, guild_id);
        debug!("GET {}", url);

        let stats = self.http.get(&url).send().await?.json().await?;
        Ok(stats)
    }

    /// `POST /api/broadcast/send`. A 2xx body is not inspected; a non-2xx body
    /// is expected to carry `{"error": string}`.
    pub async fn send_broadcast(&self, request: &BroadcastRequest) -> Result<(), ApiError> {
        let url = format!("{}/api/broadcast/send", self.base_url);
        debug!(
            "POST {} (guild_id={}, target_group={:?})",
            url, request.guild_id, request.target_group
        );

        let response = self.http.post(&url).json(request).send().await?;
        if response.status().is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Rejected(rejection_message(&body)))
    }
}

/// Pull the backend's error string out of a rejection body, falling back to a
/// generic message when the body is not the expected shape.
fn rejection_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => "The backend rejected the broadcast".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_uses_backend_error_field() {
        let body = r#"{"error": "Bot is missing the Members intent"}"#;
        assert_eq!(rejection_message(body), "Bot is missing the Members intent");
    }

    #[test]
    fn rejection_message_falls_back_on_garbage() {
        assert_eq!(
            rejection_message("<html>502 Bad Gateway</html>"),
            "The backend rejected the broadcast"
        );
        assert_eq!(
            rejection_message(""),
            "The backend rejected the broadcast"
        );
    }

    #[test]
    fn rejection_message_ignores_extra_fields() {
        let body = r#"{"error": "rate limited", "retry_after": 30}"#;
        assert_eq!(rejection_message(body), "rate limited");
    }
}
