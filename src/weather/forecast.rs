//! Forecast backend client

use super::{Forecast, ForecastService, Outcome};
use async_trait::async_trait;
use reqwest::Client;

/// Client for the datapoint-style forecast endpoint:
/// `GET {base_url}?location={name}`.
pub struct ForecastApi {
    http: Client,
    base_url: String,
}

impl ForecastApi {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ForecastService for ForecastApi {
    async fn query(&self, location: &str) -> Outcome<Forecast> {
        let response = match self
            .http
            .get(&self.base_url)
            .query(&[("location", location)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(location, error = %e, "forecast request failed");
                return Outcome::Failure { raw: e.to_string() };
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(location, error = %e, "forecast body unreadable");
                return Outcome::Failure { raw: e.to_string() };
            }
        };

        if !status.is_success() {
            tracing::warn!(location, %status, "forecast backend returned non-success");
            return Outcome::Failure { raw: body };
        }

        match serde_json::from_str::<Forecast>(&body) {
            Ok(forecast) => Outcome::Ok(forecast),
            Err(e) => {
                tracing::warn!(location, error = %e, "forecast body did not decode");
                Outcome::Failure { raw: body }
            }
        }
    }
}
