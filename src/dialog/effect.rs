//! Effects produced by dialog transitions
//!
//! Transitions stay pure by describing I/O instead of doing it; the runtime
//! executes each effect in order and feeds any produced event back in.

use crate::dialog::interpret::{Operation, Variable};
use crate::weather::HistoryRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Persist the conversation state as of this transition.
    PersistState,

    /// Run NLU over the utterance; produces a classify/unavailable event.
    Classify { text: String },

    /// Query the forecast backend; produces a forecast event.
    FetchForecast { location: String },

    /// Query the historical backend; produces a history event.
    FetchHistory { request: HistoryRequest },

    /// Say something to the user.
    Send { reply: Reply },

    /// Show a visual card.
    SendCard { card: Card },
}

impl Effect {
    pub fn send(reply: Reply) -> Self {
        Effect::Send { reply }
    }
}

/// A card shown alongside a textual answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub image_url: String,
    pub link_url: String,
}

/// What to say, semantically. Wording (and any random phrase-pool pick)
/// happens at render time so transitions stay deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Greeting,
    Info,
    Examples,
    Thanks,
    Goodbye,
    Unknown,
    Thinking,
    Waiting,
    AskLocation,
    /// Generic "something went wrong" phrase.
    Trouble,

    /// Textual forecast summary, verbatim from the backend.
    Forecast { text: String },

    /// Raw failure payload, surfaced verbatim.
    Raw { body: String },

    /// An entity could not be interpreted; `detail` names what was missing.
    DidNotUnderstand { detail: String },

    /// Compare-to-past verdict sentence.
    Comparison {
        affirmative: bool,
        variable: Variable,
        site: String,
        today_value: f64,
        units: String,
        start: String,
        end: String,
        average: String,
    },

    /// Find-optimal peak sentence.
    Peak {
        variable: Variable,
        operation: Operation,
        site: String,
        value: String,
        start: String,
        end: String,
        peak_start: Option<String>,
        peak_end: Option<String>,
    },
}
