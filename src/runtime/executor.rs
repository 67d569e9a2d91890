//! Conversation turn executor
//!
//! One worker per conversation id. The worker owns the conversation state
//! and drains its turn queue in arrival order; effects run inline, so a new
//! turn never interleaves with a previous turn's backend calls.

use super::traits::Collaborators;
use crate::dialog::{transition, ConvState, Effect, Event, TurnContext};
use crate::phrases;
use tokio::sync::mpsc;

pub struct ConversationWorker {
    conversation_id: String,
    state: ConvState,
    collab: Collaborators,
    turn_rx: mpsc::Receiver<String>,
}

impl ConversationWorker {
    pub fn new(
        conversation_id: impl Into<String>,
        state: ConvState,
        collab: Collaborators,
        turn_rx: mpsc::Receiver<String>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            state,
            collab,
            turn_rx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(conversation_id = %self.conversation_id, "conversation worker started");

        while let Some(text) = self.turn_rx.recv().await {
            self.process_turn(text).await;
        }

        tracing::info!(conversation_id = %self.conversation_id, "conversation worker stopped");
    }

    /// Drive one inbound utterance to quiescence: transition, execute the
    /// effects, and feed any collaborator answers back in until no event
    /// remains.
    pub(crate) async fn process_turn(&mut self, text: String) {
        let ctx = TurnContext::new(
            self.conversation_id.clone(),
            chrono::Local::now().date_naive(),
        );

        let mut pending = vec![Event::UserMessage { text }];

        while let Some(event) = pending.pop() {
            let result = match transition(&self.state, &ctx, event) {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(
                        conversation_id = %self.conversation_id,
                        error = %e,
                        "event dropped"
                    );
                    continue;
                }
            };

            self.state = result.new_state;

            for effect in result.effects {
                if let Some(generated) = self.execute_effect(effect).await {
                    pending.push(generated);
                }
            }
        }
    }

    async fn execute_effect(&self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::PersistState => {
                if let Err(e) = self
                    .collab
                    .store
                    .save(&self.conversation_id, &self.state)
                    .await
                {
                    tracing::error!(
                        conversation_id = %self.conversation_id,
                        error = %e,
                        "state persist failed"
                    );
                }
                None
            }

            Effect::Classify { text } => match self.collab.nlu.classify(&text).await {
                Ok(classification) => Some(Event::NluClassified {
                    intent: classification.intent,
                    entities: classification.entities,
                }),
                Err(e) => {
                    tracing::warn!(
                        conversation_id = %self.conversation_id,
                        error = %e,
                        "NLU unavailable"
                    );
                    Some(Event::NluUnavailable {
                        message: e.to_string(),
                    })
                }
            },

            Effect::FetchForecast { location } => Some(Event::ForecastFetched {
                outcome: self.collab.forecast.query(&location).await,
            }),

            Effect::FetchHistory { request } => Some(Event::HistoryFetched {
                outcome: self.collab.history.aggregate(&request).await,
            }),

            Effect::Send { reply } => {
                let text = phrases::render(&reply);
                if let Err(e) = self.collab.sink.send_text(&self.conversation_id, &text).await {
                    tracing::warn!(
                        conversation_id = %self.conversation_id,
                        error = %e,
                        "text send failed"
                    );
                }
                None
            }

            Effect::SendCard { card } => {
                if let Err(e) = self.collab.sink.send_card(&self.conversation_id, &card).await {
                    tracing::warn!(
                        conversation_id = %self.conversation_id,
                        error = %e,
                        "card send failed"
                    );
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlu::{Entity, Intent};
    use crate::runtime::testing::{
        FailingStore, RecordingForecast, RecordingHistory, RecordingSink, ScriptedNlu,
    };
    use crate::runtime::traits::ConversationStore;
    use crate::store::MemoryStore;
    use crate::weather::HistoryEndpoint;
    use std::sync::Arc;

    struct Harness {
        worker: ConversationWorker,
        nlu: Arc<ScriptedNlu>,
        forecast: Arc<RecordingForecast>,
        history: Arc<RecordingHistory>,
        sink: Arc<RecordingSink>,
        store: Arc<MemoryStore>,
    }

    fn harness() -> Harness {
        let nlu = Arc::new(ScriptedNlu::default());
        let forecast = Arc::new(RecordingForecast::default());
        let history = Arc::new(RecordingHistory::default());
        let sink = Arc::new(RecordingSink::default());
        let store = Arc::new(MemoryStore::new());

        let collab = Collaborators {
            nlu: nlu.clone(),
            forecast: forecast.clone(),
            history: history.clone(),
            sink: sink.clone(),
            store: store.clone(),
        };

        let (_turn_tx, turn_rx) = mpsc::channel(8);
        Harness {
            worker: ConversationWorker::new("conv-1", ConvState::default(), collab, turn_rx),
            nlu,
            forecast,
            history,
            sink,
            store,
        }
    }

    #[tokio::test]
    async fn forecast_flow_suspends_for_location_and_resumes() {
        let mut h = harness();
        h.nlu.push_classification(Intent::GetForecast, vec![]);
        h.forecast.push_ok("Sunny spells.", 17.0);

        h.worker.process_turn("what's the forecast".to_string()).await;
        assert_eq!(h.sink.texts(), vec![phrases::ASK_LOCATION.to_string()]);

        // The reply to "Where?" resumes the flow without another classify.
        h.worker.process_turn("London".to_string()).await;
        assert_eq!(h.forecast.queries(), vec!["London".to_string()]);
        assert_eq!(
            h.sink.texts().last().map(String::as_str),
            Some("Sunny spells.")
        );

        let saved = h.store.load("conv-1").await.unwrap();
        assert_eq!(saved.slots.location.as_deref(), Some("London"));
    }

    #[tokio::test]
    async fn optimal_flow_with_is_hits_the_climatology_endpoint() {
        let mut h = harness();
        h.nlu.push_classification(
            Intent::FindOptimal,
            vec![
                Entity::new("location", "exeter"),
                Entity::new("condition", "hottest"),
                Entity::new("timemodifier", "is"),
            ],
        );
        h.forecast.push_ok("Sunny spells.", 17.0);
        h.history.push_ok("21.3");

        h.worker.process_turn("when is it hottest".to_string()).await;

        let requests = h.history.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].endpoint, HistoryEndpoint::Climatology);
        assert!(requests[0].range.is_unbounded());
        assert!(h
            .sink
            .texts()
            .last()
            .is_some_and(|text| text.starts_with("The peak max temperature")));
        assert_eq!(h.sink.cards().len(), 1);
    }

    #[tokio::test]
    async fn optimal_flow_without_is_hits_the_range_endpoint() {
        let mut h = harness();
        h.nlu.push_classification(
            Intent::FindOptimal,
            vec![
                Entity::new("location", "exeter"),
                Entity::new("condition", "hottest"),
                Entity::new("timemodifier", "was"),
            ],
        );
        h.forecast.push_ok("Sunny spells.", 17.0);
        h.history.push_ok("21.3");

        h.worker.process_turn("when was it hottest".to_string()).await;

        let requests = h.history.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].endpoint, HistoryEndpoint::Range);
    }

    #[tokio::test]
    async fn optimal_history_failure_sends_the_generic_error_phrase() {
        let mut h = harness();
        h.nlu.push_classification(
            Intent::FindOptimal,
            vec![
                Entity::new("location", "exeter"),
                Entity::new("condition", "hottest"),
            ],
        );
        h.forecast.push_ok("Sunny spells.", 17.0);
        h.history.push_failure("503 Service Unavailable");

        h.worker.process_turn("when was it hottest".to_string()).await;
        assert_eq!(
            h.sink.texts().last().map(String::as_str),
            Some(phrases::ERROR)
        );
    }

    #[tokio::test]
    async fn nlu_outage_reads_like_an_unmatched_intent() {
        let mut h = harness();
        h.nlu.push_unavailable();

        h.worker.process_turn("gibberish".to_string()).await;
        assert_eq!(h.sink.texts(), vec![phrases::UNKNOWN.to_string()]);
        assert!(h.forecast.queries().is_empty());
    }

    #[tokio::test]
    async fn forecast_failure_payload_reaches_the_user_verbatim() {
        let mut h = harness();
        h.nlu.push_classification(
            Intent::GetForecast,
            vec![Entity::new("location", "atlantis")],
        );
        h.forecast.push_failure("no such site: atlantis");

        h.worker
            .process_turn("forecast for atlantis".to_string())
            .await;
        assert_eq!(
            h.sink.texts().last().map(String::as_str),
            Some("no such site: atlantis")
        );
    }

    #[tokio::test]
    async fn persist_failures_do_not_break_the_turn() {
        let nlu = Arc::new(ScriptedNlu::default());
        nlu.push_classification(Intent::Thanks, vec![]);
        let sink = Arc::new(RecordingSink::default());

        let collab = Collaborators {
            nlu,
            forecast: Arc::new(RecordingForecast::default()),
            history: Arc::new(RecordingHistory::default()),
            sink: sink.clone(),
            store: Arc::new(FailingStore),
        };
        let (_turn_tx, turn_rx) = mpsc::channel(8);
        let mut worker = ConversationWorker::new("conv-1", ConvState::default(), collab, turn_rx);

        worker.process_turn("cheers".to_string()).await;
        assert_eq!(sink.texts().len(), 1);
    }

    #[tokio::test]
    async fn compare_reuses_the_stored_location_on_later_turns() {
        let mut h = harness();

        // First turn establishes the location and completes a comparison.
        h.nlu.push_classification(
            Intent::CompareToPast,
            vec![
                Entity::new("location", "exeter"),
                Entity::new("condition", "hotter"),
                Entity::new("timebounding", "usual"),
            ],
        );
        h.forecast.push_ok("Sunny spells.", 17.0);
        h.history.push_ok("12.4");
        h.worker
            .process_turn("hotter than usual in exeter?".to_string())
            .await;

        // Second turn carries no location entity; the stored slot is reused
        // and the user is never re-prompted.
        h.nlu.push_classification(
            Intent::CompareToPast,
            vec![
                Entity::new("condition", "colder"),
                Entity::new("timebounding", "usual"),
            ],
        );
        h.forecast.push_ok("Sunny spells.", 10.0);
        h.history.push_ok("12.4");
        h.worker.process_turn("what about colder?".to_string()).await;

        assert_eq!(
            h.forecast.queries(),
            vec!["exeter".to_string(), "exeter".to_string()]
        );
        assert!(!h.sink.texts().contains(&phrases::ASK_LOCATION.to_string()));
        // 10.0 today is colder than the 12.4 average.
        assert!(h
            .sink
            .texts()
            .last()
            .is_some_and(|text| text.starts_with("Yes, ")));
    }
}
