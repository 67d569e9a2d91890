//! Forecast and historical-climate backend abstraction
//!
//! Both backends resolve to an [`Outcome`]: either the decoded document or
//! the raw response body. The split is decided exactly once, here at the
//! client boundary - downstream code matches on the sum type and never
//! re-inspects payload shapes.

mod forecast;
mod history;
mod types;

pub use forecast::ForecastApi;
pub use history::HistoryApi;
pub use types::{
    Forecast, ForecastBody, Geometry, HistoryAggregate, HistoryEndpoint, HistoryRequest,
    Measurement, Outcome, Properties, Site, TextSummary,
};

use async_trait::async_trait;

/// Current-conditions forecast backend.
#[async_trait]
pub trait ForecastService: Send + Sync {
    async fn query(&self, location: &str) -> Outcome<Forecast>;
}

/// Historical-climate statistics backend.
#[async_trait]
pub trait HistoryService: Send + Sync {
    async fn aggregate(&self, request: &HistoryRequest) -> Outcome<HistoryAggregate>;
}
