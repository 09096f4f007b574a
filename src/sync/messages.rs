//! Broadcast message types.
//!
//! Every message travels in a generic envelope; the payload is a JSON value so
//! channels stay agnostic of what the application publishes on them.

use super::SyncError;
use crate::catalog::Book;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelMessage {
    /// Message type identifier (e.g. "readlist")
    #[serde(rename = "type")]
    pub msg_type: String,
    pub payload: serde_json::Value,
}

impl ChannelMessage {
    pub fn new(msg_type: impl Into<String>, payload: impl Serialize) -> Self {
        Self {
            msg_type: msg_type.into(),
            payload: serde_json::to_value(payload).unwrap_or(serde_json::Value::Null),
        }
    }

    /// The full reading list, never a diff.
    pub fn reading_list(books: &[Book]) -> Self {
        Self::new(msg_types::READING_LIST, books)
    }

    pub fn parse_reading_list(&self) -> Result<Vec<Book>, SyncError> {
        if self.msg_type != msg_types::READING_LIST {
            return Err(SyncError::UnexpectedMessageType(self.msg_type.clone()));
        }
        serde_json::from_value(self.payload.clone()).map_err(SyncError::MalformedPayload)
    }
}

pub mod msg_types {
    /// Full reading list published after a local mutation.
    pub const READING_LIST: &str = "readlist";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Author;

    fn book(isbn: &str) -> Book {
        Book {
            title: isbn.to_string(),
            pages: 10,
            genre: "Drama".to_string(),
            cover: String::new(),
            synopsis: String::new(),
            year: 1990,
            isbn: isbn.to_string(),
            author: Author {
                name: "a".to_string(),
                other_books: vec![],
            },
        }
    }

    #[test]
    fn reading_list_envelope_shape() {
        let msg = ChannelMessage::reading_list(&[book("A"), book("B")]);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "readlist");
        assert_eq!(json["payload"][1]["ISBN"], "B");

        let parsed = msg.parse_reading_list().unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].isbn, "A");
    }

    #[test]
    fn malformed_payload_is_rejected() {
        let msg = ChannelMessage::new(msg_types::READING_LIST, serde_json::json!({"no": "list"}));
        assert!(matches!(
            msg.parse_reading_list(),
            Err(SyncError::MalformedPayload(_))
        ));
    }

    #[test]
    fn other_message_types_are_rejected() {
        let msg = ChannelMessage::new("ping", serde_json::Value::Null);
        assert!(matches!(
            msg.parse_reading_list(),
            Err(SyncError::UnexpectedMessageType(t)) if t == "ping"
        ));
    }
}
