//! Runtime for executing conversations
//!
//! Conversations are actors: one worker task per conversation id, fed by a
//! bounded queue. The queue is the ordering guarantee - turns for one id are
//! processed strictly in arrival order, distinct ids interleave freely.

mod connector;
mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use connector::HttpConnector;
pub use executor::ConversationWorker;
pub use traits::{Collaborators, ConversationStore, MessageSink};

use crate::dialog::ConvState;
use std::collections::HashMap;
use tokio::sync::{mpsc, RwLock};

/// Manager for all conversation workers.
pub struct RuntimeManager {
    collab: Collaborators,
    workers: RwLock<HashMap<String, mpsc::Sender<String>>>,
}

impl RuntimeManager {
    pub fn new(collab: Collaborators) -> Self {
        Self {
            collab,
            workers: RwLock::new(HashMap::new()),
        }
    }

    /// Queue one inbound turn, spawning the conversation's worker on first
    /// contact.
    pub async fn dispatch(&self, conversation_id: &str, text: String) {
        let turn_tx = self.worker_for(conversation_id).await;
        if turn_tx.send(text).await.is_err() {
            tracing::error!(
                conversation_id = %conversation_id,
                "conversation worker gone; dropping turn"
            );
            self.workers.write().await.remove(conversation_id);
        }
    }

    async fn worker_for(&self, conversation_id: &str) -> mpsc::Sender<String> {
        {
            let workers = self.workers.read().await;
            if let Some(turn_tx) = workers.get(conversation_id) {
                return turn_tx.clone();
            }
        }

        let mut workers = self.workers.write().await;
        // Another dispatch may have won the race for the write lock.
        if let Some(turn_tx) = workers.get(conversation_id) {
            return turn_tx.clone();
        }

        let state = match self.collab.store.load(conversation_id).await {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(
                    conversation_id = %conversation_id,
                    error = %e,
                    "state load failed; starting empty"
                );
                ConvState::default()
            }
        };

        let (turn_tx, turn_rx) = mpsc::channel(32);
        let worker =
            ConversationWorker::new(conversation_id, state, self.collab.clone(), turn_rx);
        tokio::spawn(worker.run());

        workers.insert(conversation_id.to_string(), turn_tx.clone());
        turn_tx
    }
}
