//! Hosted LUIS-style NLU client

use super::{Classification, Entity, Intent, NluError, NluService};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;

/// Client for a LUIS v2-compatible classify endpoint:
/// `GET {base_url}/{app_id}?subscription-key=..&verbose=true&q=..`
pub struct LuisClient {
    http: Client,
    base_url: String,
    app_id: String,
    subscription_key: String,
}

impl LuisClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        subscription_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            app_id: app_id.into(),
            subscription_key: subscription_key.into(),
        }
    }
}

#[async_trait]
impl NluService for LuisClient {
    async fn classify(&self, text: &str) -> Result<Classification, NluError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), self.app_id);
        let start = Instant::now();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("subscription-key", self.subscription_key.as_str()),
                ("verbose", "true"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NluError::Status(status));
        }

        let body = response.text().await?;
        let wire: WireResponse = serde_json::from_str(&body)?;
        let classification = Classification::from(wire);

        tracing::info!(
            intent = ?classification.intent,
            entities = classification.entities.len(),
            duration_ms = %start.elapsed().as_millis(),
            "NLU classify completed"
        );

        Ok(classification)
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(rename = "topScoringIntent")]
    top_scoring_intent: WireIntent,
    #[serde(default)]
    entities: Vec<WireEntity>,
}

#[derive(Debug, Deserialize)]
struct WireIntent {
    intent: String,
}

#[derive(Debug, Deserialize)]
struct WireEntity {
    #[serde(rename = "type")]
    entity_type: String,
    entity: String,
}

impl From<WireResponse> for Classification {
    fn from(wire: WireResponse) -> Self {
        Classification {
            intent: Intent::parse(&wire.top_scoring_intent.intent),
            entities: wire
                .entities
                .into_iter()
                .map(|e| Entity::new(e.entity_type, e.entity))
                .collect(),
        }
    }
}
