//! Mock implementations for testing
//!
//! Recording fakes for every collaborator seam; they queue scripted answers
//! and capture the calls made against them.

use super::traits::{MessageSink, ConversationStore};
use crate::dialog::Card;
use crate::nlu::{Classification, Entity, Intent, NluError, NluService};
use crate::weather::{
    Forecast, ForecastBody, ForecastService, Geometry, HistoryAggregate, HistoryRequest,
    HistoryService, Measurement, Outcome, Properties, Site, TextSummary,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

// ============================================================================
// Scripted NLU
// ============================================================================

/// NLU fake that returns queued classifications.
#[derive(Default)]
pub struct ScriptedNlu {
    responses: Mutex<VecDeque<Result<Classification, NluError>>>,
}

impl ScriptedNlu {
    pub fn push_classification(&self, intent: Intent, entities: Vec<Entity>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(Classification { intent, entities }));
    }

    pub fn push_unavailable(&self) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(NluError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            )));
    }
}

#[async_trait]
impl NluService for ScriptedNlu {
    async fn classify(&self, _text: &str) -> Result<Classification, NluError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted NLU response left")
    }
}

// ============================================================================
// Recording forecast backend
// ============================================================================

/// Forecast fake recording queried locations.
#[derive(Default)]
pub struct RecordingForecast {
    outcomes: Mutex<VecDeque<Outcome<Forecast>>>,
    queries: Mutex<Vec<String>>,
}

impl RecordingForecast {
    pub fn push_ok(&self, local_text: &str, temperature: f64) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Outcome::Ok(fixture_forecast(local_text, temperature)));
    }

    pub fn push_failure(&self, raw: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Outcome::Failure {
                raw: raw.to_string(),
            });
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ForecastService for RecordingForecast {
    async fn query(&self, location: &str) -> Outcome<Forecast> {
        self.queries.lock().unwrap().push(location.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted forecast outcome left")
    }
}

/// An Exeter forecast document with the given current temperature.
pub fn fixture_forecast(local_text: &str, temperature: f64) -> Forecast {
    let mut current = HashMap::new();
    current.insert(
        "temperature".to_string(),
        Measurement {
            value: temperature,
            units: "C".to_string(),
        },
    );
    Forecast {
        geometry: Geometry {
            coordinates: vec![50.7, -3.5],
        },
        properties: Properties {
            site: Site {
                name: "Exeter".to_string(),
            },
            forecast: ForecastBody {
                current,
                text: TextSummary {
                    local: local_text.to_string(),
                },
            },
        },
    }
}

// ============================================================================
// Recording history backend
// ============================================================================

/// History fake capturing every request - the call-capture fixture for
/// asserting which endpoint a flow chose.
#[derive(Default)]
pub struct RecordingHistory {
    outcomes: Mutex<VecDeque<Outcome<HistoryAggregate>>>,
    requests: Mutex<Vec<HistoryRequest>>,
}

impl RecordingHistory {
    pub fn push_ok(&self, value: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Outcome::Ok(HistoryAggregate {
                value: value.to_string(),
                start_date: "2022-03-04".to_string(),
                end_date: "2022-03-11".to_string(),
                peak_start: Some("2022-03-07".to_string()),
                peak_end: Some("2022-03-07".to_string()),
                chart_url: "https://charts.example/abc.png".to_string(),
            }));
    }

    pub fn push_failure(&self, raw: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Outcome::Failure {
                raw: raw.to_string(),
            });
    }

    pub fn requests(&self) -> Vec<HistoryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistoryService for RecordingHistory {
    async fn aggregate(&self, request: &HistoryRequest) -> Outcome<HistoryAggregate> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted history outcome left")
    }
}

// ============================================================================
// Recording sink
// ============================================================================

/// Sink fake capturing everything said to the user.
#[derive(Default)]
pub struct RecordingSink {
    texts: Mutex<Vec<String>>,
    cards: Mutex<Vec<Card>>,
}

impl RecordingSink {
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }

    pub fn cards(&self) -> Vec<Card> {
        self.cards.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send_text(&self, _conversation_id: &str, text: &str) -> Result<(), String> {
        self.texts.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn send_card(&self, _conversation_id: &str, card: &Card) -> Result<(), String> {
        self.cards.lock().unwrap().push(card.clone());
        Ok(())
    }
}

// ============================================================================
// Failing store
// ============================================================================

/// Store fake whose saves always fail, for exercising persist-error logging.
pub struct FailingStore;

#[async_trait]
impl ConversationStore for FailingStore {
    async fn load(&self, _conversation_id: &str) -> Result<crate::dialog::ConvState, String> {
        Err("store offline".to_string())
    }

    async fn save(
        &self,
        _conversation_id: &str,
        _state: &crate::dialog::ConvState,
    ) -> Result<(), String> {
        Err("store offline".to_string())
    }
}
