use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/// Discriminator selecting what the endpoint does with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    GetCount,
    SendMessage,
    ReceiveMessage,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::GetCount => "getcount",
            Action::SendMessage => "sendmessage",
            Action::ReceiveMessage => "receivemessage",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionRequest {
    pub fn get_count() -> Self {
        Self {
            action: Action::GetCount,
            message: None,
        }
    }

    pub fn send_message(message: impl Into<String>) -> Self {
        Self {
            action: Action::SendMessage,
            message: Some(message.into()),
        }
    }

    pub fn receive_message() -> Self {
        Self {
            action: Action::ReceiveMessage,
            message: None,
        }
    }
}

/// Body of every endpoint reply, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub message: String,
}

impl ApiResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedMessage {
    pub id: u64,
    pub body: String,
    pub group_id: String,
    pub dedup_id: String,
    pub sent_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QueueData {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub messages: VecDeque<QueuedMessage>,
    /// Dedup id -> unix millis of the send that claimed it.
    #[serde(default)]
    pub recent_dedup: BTreeMap<String, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_count_payload_has_no_message_key() {
        let json = serde_json::to_value(ActionRequest::get_count()).unwrap();
        assert_eq!(json, serde_json::json!({ "action": "getcount" }));
    }

    #[test]
    fn send_message_payload_carries_text() {
        let json = serde_json::to_value(ActionRequest::send_message("hi")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "action": "sendmessage", "message": "hi" })
        );
    }

    #[test]
    fn unknown_action_is_rejected() {
        let parsed = serde_json::from_str::<ActionRequest>(r#"{"action":"purge"}"#);
        assert!(parsed.is_err());
    }
}
