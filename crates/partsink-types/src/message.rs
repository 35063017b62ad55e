//! Keyed broker messages and their projection to records.

use serde::{Deserialize, Serialize};

/// A `(key, value)` message as delivered by a broker partition.
///
/// Only the value is persisted; the key is dropped by [`KeyedMessage::into_value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyedMessage {
    #[serde(default)]
    pub key: Option<String>,
    pub value: String,
}

impl KeyedMessage {
    #[must_use]
    pub fn new(key: Option<String>, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// Project the message to its record payload.
    #[must_use]
    pub fn into_value(self) -> String {
        self.value
    }
}

impl From<(String, String)> for KeyedMessage {
    fn from((key, value): (String, String)) -> Self {
        Self {
            key: Some(key),
            value,
        }
    }
}
