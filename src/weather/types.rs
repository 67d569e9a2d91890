//! Backend document types

use crate::dialog::interpret::{Operation, Variable};
use crate::dialog::timeframe::DateRange;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A backend call either yields a decoded document or the raw body of
/// whatever came back. Timeouts and transport errors land in `Failure` too;
/// no backend call is ever retried.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ok(T),
    Failure { raw: String },
}

// ============================================================================
// Forecast document
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub geometry: Geometry,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// `[lat, lon]` on the wire.
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub site: Site,
    pub forecast: ForecastBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBody {
    /// Current readings keyed by variable name.
    #[serde(default)]
    pub current: HashMap<String, Measurement>,
    pub text: TextSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub units: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSummary {
    pub local: String,
}

impl Forecast {
    /// `(lat, lon)` of the forecast site, when the document carries both.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self.geometry.coordinates.as_slice() {
            [lat, lon, ..] => Some((*lat, *lon)),
            _ => None,
        }
    }

    pub fn site_name(&self) -> &str {
        &self.properties.site.name
    }

    pub fn current(&self, variable: Variable) -> Option<&Measurement> {
        self.properties.forecast.current.get(variable.as_str())
    }

    pub fn local_text(&self) -> &str {
        &self.properties.forecast.text.local
    }
}

// ============================================================================
// Historical aggregate document
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryAggregate {
    /// Aggregate value, stringly on the wire.
    pub value: String,
    pub start_date: String,
    pub end_date: String,
    /// Peak date span; absent on older climatology deployments.
    #[serde(rename = "time_answer_start", default)]
    pub peak_start: Option<String>,
    #[serde(rename = "time_answer_end", default)]
    pub peak_end: Option<String>,
    #[serde(rename = "graph")]
    pub chart_url: String,
}

impl HistoryAggregate {
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.trim().parse().ok()
    }
}

// ============================================================================
// Historical query
// ============================================================================

/// Which historical endpoint to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryEndpoint {
    /// Full-baseline statistics; explicit bounds narrow the day-of-year
    /// window but every covered year contributes.
    Climatology,
    /// Statistics over exactly the bounded period.
    Range,
}

impl HistoryEndpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryEndpoint::Climatology => "climatology",
            HistoryEndpoint::Range => "range",
        }
    }
}

/// Everything the historical backend needs for one aggregate call.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRequest {
    pub endpoint: HistoryEndpoint,
    pub variable: Variable,
    pub operation: Operation,
    pub latitude: f64,
    pub longitude: f64,
    pub range: DateRange,
}
