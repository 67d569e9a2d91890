//! Events that advance a conversation

use crate::nlu::{Entity, Intent};
use crate::weather::{Forecast, HistoryAggregate, Outcome};

/// Everything that can happen to a conversation: the user speaks, or one of
/// the collaborators answers.
#[derive(Debug, Clone)]
pub enum Event {
    /// Inbound utterance for this conversation.
    UserMessage { text: String },

    /// NLU answered with the top intent and its entities.
    NluClassified {
        intent: Intent,
        entities: Vec<Entity>,
    },

    /// NLU could not be reached this turn; equivalent to an unmatched intent.
    NluUnavailable { message: String },

    /// Forecast backend answered.
    ForecastFetched { outcome: Outcome<Forecast> },

    /// Historical backend answered.
    HistoryFetched { outcome: Outcome<HistoryAggregate> },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::UserMessage { .. } => "user_message",
            Event::NluClassified { .. } => "nlu_classified",
            Event::NluUnavailable { .. } => "nlu_unavailable",
            Event::ForecastFetched { .. } => "forecast_fetched",
            Event::HistoryFetched { .. } => "history_fetched",
        }
    }
}
