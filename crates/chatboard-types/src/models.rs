use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry on the board.
///
/// `time_sent` is `None` only for messages that were never created through
/// the API (the seed message); it is left out of the JSON entirely in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub from: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_sent: Option<DateTime<Utc>>,
}

impl Message {
    /// Case-insensitive substring match against the message body.
    pub fn text_contains(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(&needle.to_lowercase())
    }
}
