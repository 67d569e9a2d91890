//! Conversation state types

use crate::dialog::interpret::{Comparator, Operation, Variable};
use crate::nlu::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The fixed slot record a conversation fills over its turns.
///
/// Once set, a slot is only ever overwritten by a newer entity of the same
/// type; nothing clears one mid-conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slots {
    pub location: Option<String>,
    pub condition: Option<String>,
    pub timebounding: Option<String>,
    pub timemodifier: Option<String>,
}

impl Slots {
    /// Merge a turn's entities. Last occurrence of a type wins; entity types
    /// outside the slot record are dropped.
    pub fn merge(&mut self, entities: &[Entity]) {
        for entity in entities {
            let slot = match entity.entity_type.as_str() {
                "location" => &mut self.location,
                "condition" => &mut self.condition,
                "timebounding" => &mut self.timebounding,
                "timemodifier" => &mut self.timemodifier,
                other => {
                    tracing::debug!(entity_type = other, "dropping unknown entity type");
                    continue;
                }
            };
            *slot = Some(entity.value.clone());
        }
    }
}

/// Which slot-filling flow a suspended or in-flight query belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryFlow {
    GetForecast,
    CompareToPast,
    FindOptimal,
}

/// Parameters saved across the historical-backend suspension point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryFlow {
    Compare {
        variable: Variable,
        operation: Operation,
        comparator: Comparator,
        site: String,
        today_value: f64,
        units: String,
    },
    Optimal {
        variable: Variable,
        operation: Operation,
        site: String,
    },
}

/// Where the dialog currently is. Every suspension point in a flow is a
/// named state carrying exactly the arguments the resumption needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogState {
    /// Ready for the next utterance.
    #[default]
    Idle,

    /// NLU classify in flight.
    Classifying,

    /// Asked "Where?"; the next utterance is consumed as the location slot.
    AwaitingLocation { resume: QueryFlow },

    /// Forecast backend call in flight.
    FetchingForecast { flow: QueryFlow },

    /// Historical backend call in flight.
    FetchingHistory { flow: HistoryFlow },
}

impl DialogState {
    pub fn name(&self) -> &'static str {
        match self {
            DialogState::Idle => "idle",
            DialogState::Classifying => "classifying",
            DialogState::AwaitingLocation { .. } => "awaiting_location",
            DialogState::FetchingForecast { .. } => "fetching_forecast",
            DialogState::FetchingHistory { .. } => "fetching_history",
        }
    }
}

/// Everything the system remembers about one conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvState {
    pub slots: Slots,
    pub greeted: bool,
    pub dialog: DialogState,
}

/// Per-turn context. `today` is injected so transitions stay pure and
/// reproducible under test.
#[derive(Debug, Clone)]
pub struct TurnContext {
    pub conversation_id: String,
    pub today: NaiveDate,
}

impl TurnContext {
    pub fn new(conversation_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            today,
        }
    }
}
