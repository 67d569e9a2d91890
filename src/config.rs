//! Environment-derived configuration

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Webhook listen port.
    pub port: u16,
    /// Base URL of the LUIS-style classify endpoint (app id is appended).
    pub nlu_url: String,
    pub nlu_app_id: String,
    pub nlu_key: String,
    /// Forecast datapoint endpoint.
    pub forecast_url: String,
    /// Historical statistics service base URL.
    pub history_url: String,
    /// Reply endpoint of the chat connector.
    pub reply_url: String,
    /// Timeout applied to every outbound HTTP call; single attempt, no retry.
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("CUMULUS_PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(3978),
            nlu_url: env_or(
                "CUMULUS_NLU_URL",
                "https://westus.api.cognitive.microsoft.com/luis/v2.0/apps",
            ),
            nlu_app_id: env_or("CUMULUS_NLU_APP_ID", ""),
            nlu_key: env_or("CUMULUS_NLU_KEY", ""),
            forecast_url: env_or("CUMULUS_FORECAST_URL", "http://forecast-api:5000/datapoint"),
            history_url: env_or("CUMULUS_HISTORY_URL", "http://data-api:5000"),
            reply_url: env_or("CUMULUS_REPLY_URL", "http://connector:3979/replies"),
            http_timeout: Duration::from_secs(
                std::env::var("CUMULUS_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|raw| raw.parse().ok())
                    .unwrap_or(120),
            ),
        }
    }

    pub fn nlu_configured(&self) -> bool {
        !self.nlu_app_id.is_empty() && !self.nlu_key.is_empty()
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
