//! Historical-climate backend client

use super::{HistoryAggregate, HistoryRequest, HistoryService, Outcome};
use async_trait::async_trait;
use reqwest::Client;

/// Client for the historical statistics service:
/// `GET {base_url}/{variable}/{operation}/{endpoint}?lat=..&lon=..[&start_date=..&end_date=..]`.
pub struct HistoryApi {
    http: Client,
    base_url: String,
}

impl HistoryApi {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, request: &HistoryRequest) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            request.variable,
            request.operation,
            request.endpoint.as_str()
        )
    }
}

/// Date bounds are appended only when the range is concrete on both ends.
fn query_params(request: &HistoryRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("lat", request.latitude.to_string()),
        ("lon", request.longitude.to_string()),
    ];
    if let (Some(start), Some(end)) = (request.range.start, request.range.end) {
        params.push(("start_date", start.format("%Y-%m-%d").to_string()));
        params.push(("end_date", end.format("%Y-%m-%d").to_string()));
    }
    params
}

#[async_trait]
impl HistoryService for HistoryApi {
    async fn aggregate(&self, request: &HistoryRequest) -> Outcome<HistoryAggregate> {
        let url = self.url_for(request);

        let response = match self.http.get(&url).query(&query_params(request)).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%url, error = %e, "history request failed");
                return Outcome::Failure { raw: e.to_string() };
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%url, error = %e, "history body unreadable");
                return Outcome::Failure { raw: e.to_string() };
            }
        };

        if !status.is_success() {
            tracing::warn!(%url, %status, "history backend returned non-success");
            return Outcome::Failure { raw: body };
        }

        match serde_json::from_str::<HistoryAggregate>(&body) {
            Ok(aggregate) => Outcome::Ok(aggregate),
            Err(e) => {
                tracing::warn!(%url, error = %e, "history body did not decode");
                Outcome::Failure { raw: body }
            }
        }
    }
}
