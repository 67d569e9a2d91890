//! API payload types

use serde::{Deserialize, Serialize};

/// One inbound webhook activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessage {
    pub conversation_id: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_message_uses_camel_case() {
        let message: InboundMessage =
            serde_json::from_str(r#"{"conversationId": "conv-1", "text": "hello"}"#).unwrap();
        assert_eq!(message.conversation_id, "conv-1");
        assert_eq!(message.text, "hello");
    }
}
