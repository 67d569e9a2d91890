//! Trait abstractions for runtime I/O
//!
//! The dialog core only ever sees these seams; production adapters live with
//! their clients, mock implementations in `runtime::testing`.

use crate::dialog::{Card, ConvState};
use crate::nlu::NluService;
use crate::weather::{ForecastService, HistoryService};
use async_trait::async_trait;
use std::sync::Arc;

/// Outbound presentation channel back to the chat surface.
///
/// Send failures are reported but never fail a turn.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send_text(&self, conversation_id: &str, text: &str) -> Result<(), String>;

    async fn send_card(&self, conversation_id: &str, card: &Card) -> Result<(), String>;
}

/// Storage for conversation state, keyed by conversation id.
///
/// Each conversation's turns flow through a single worker, so the store only
/// needs per-operation atomicity, not cross-call transactions.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Current state, default-empty on first access.
    async fn load(&self, conversation_id: &str) -> Result<ConvState, String>;

    async fn save(&self, conversation_id: &str, state: &ConvState) -> Result<(), String>;
}

/// Shared handles to every collaborator a conversation needs.
#[derive(Clone)]
pub struct Collaborators {
    pub nlu: Arc<dyn NluService>,
    pub forecast: Arc<dyn ForecastService>,
    pub history: Arc<dyn HistoryService>,
    pub sink: Arc<dyn MessageSink>,
    pub store: Arc<dyn ConversationStore>,
}
