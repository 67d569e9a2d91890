//! Classification result types

use serde::{Deserialize, Serialize};

/// Classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Help,
    Thanks,
    Goodbye,
    GetForecast,
    CompareToPast,
    FindOptimal,
    /// `None` intent or anything this service does not know about.
    Unrecognized,
}

impl Intent {
    /// Map the wire-level intent name. Unknown names collapse to
    /// [`Intent::Unrecognized`] rather than failing the turn.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "greeting" => Intent::Greeting,
            "help" => Intent::Help,
            "thanks" => Intent::Thanks,
            "goodbye" => Intent::Goodbye,
            "getForecast" => Intent::GetForecast,
            "compareToPast" => Intent::CompareToPast,
            "findOptimal" => Intent::FindOptimal,
            _ => Intent::Unrecognized,
        }
    }
}

/// A typed value extracted from an utterance, used to fill a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_type: String,
    pub value: String,
}

impl Entity {
    pub fn new(entity_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            value: value.into(),
        }
    }
}

/// One NLU answer: the top intent and whatever entities came with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub entities: Vec<Entity>,
}
