//! Same-origin broadcast between sibling instances.

mod channel;
mod hub;
pub mod messages;

pub use channel::SyncChannel;
pub use hub::BroadcastHub;
pub use messages::{msg_types, ChannelMessage};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Channel {0} is closed")]
    Closed(String),

    #[error("Unexpected message type: {0}")]
    UnexpectedMessageType(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),
}
