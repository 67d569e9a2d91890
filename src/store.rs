//! In-memory conversation store
//!
//! Conversation state lives for the process lifetime and is never evicted.
//! The [`ConversationStore`] trait is the seam for an external store; the
//! per-conversation worker already serializes writes per id.

use crate::dialog::ConvState;
use crate::runtime::ConversationStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    states: Mutex<HashMap<String, ConvState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn load(&self, conversation_id: &str) -> Result<ConvState, String> {
        Ok(self
            .states
            .lock()
            .await
            .get(conversation_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, conversation_id: &str, state: &ConvState) -> Result<(), String> {
        self.states
            .lock()
            .await
            .insert(conversation_id.to_string(), state.clone());
        Ok(())
    }
}
