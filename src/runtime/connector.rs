//! Outbound connector
//!
//! Posts replies back to the chat channel's reply endpoint. Fire-and-forget
//! from the dialog's point of view: failures are reported to the caller for
//! logging and nothing else.

use super::traits::MessageSink;
use crate::dialog::Card;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

pub struct HttpConnector {
    http: Client,
    reply_url: String,
}

impl HttpConnector {
    pub fn new(http: Client, reply_url: impl Into<String>) -> Self {
        Self {
            http,
            reply_url: reply_url.into(),
        }
    }

    async fn post(&self, payload: Value) -> Result<(), String> {
        let response = self
            .http
            .post(&self.reply_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("connector returned status {status}"));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageSink for HttpConnector {
    async fn send_text(&self, conversation_id: &str, text: &str) -> Result<(), String> {
        self.post(json!({
            "conversationId": conversation_id,
            "type": "message",
            "text": text,
        }))
        .await
    }

    async fn send_card(&self, conversation_id: &str, card: &Card) -> Result<(), String> {
        self.post(json!({
            "conversationId": conversation_id,
            "type": "card",
            "title": card.title,
            "imageUrl": card.image_url,
            "linkUrl": card.link_url,
            "activityId": Uuid::new_v4().to_string(),
        }))
        .await
    }
}
