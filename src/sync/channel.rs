use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use super::hub::BroadcastHub;
use super::messages::ChannelMessage;
use super::SyncError;

/// One instance's handle on a named broadcast channel.
///
/// Opened once per instance and kept for its whole lifetime. Dropping the
/// handle closes it.
pub struct SyncChannel {
    hub: Arc<BroadcastHub>,
    name: String,
    instance_id: usize,
    receiver: mpsc::UnboundedReceiver<ChannelMessage>,
    closed: bool,
}

impl SyncChannel {
    pub(super) fn new(
        hub: Arc<BroadcastHub>,
        name: String,
        instance_id: usize,
        receiver: mpsc::UnboundedReceiver<ChannelMessage>,
    ) -> Self {
        Self {
            hub,
            name,
            instance_id,
            receiver,
            closed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instance_id(&self) -> usize {
        self.instance_id
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Fire-and-forget delivery to every sibling on this channel.
    ///
    /// Returns the number of siblings that could not be reached.
    pub fn post(&self, message: ChannelMessage) -> Result<usize, SyncError> {
        if self.closed {
            return Err(SyncError::Closed(self.name.clone()));
        }
        let failed = self
            .hub
            .send_to_others(&self.name, self.instance_id, message);
        if !failed.is_empty() {
            debug!(
                "Instance {} could not reach {} siblings on {}",
                self.instance_id,
                failed.len(),
                self.name
            );
        }
        Ok(failed.len())
    }

    /// Returns a pending message without waiting.
    pub fn try_recv(&mut self) -> Option<ChannelMessage> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next message. Returns None once the channel is closed
    /// and drained.
    pub async fn recv(&mut self) -> Option<ChannelMessage> {
        self.receiver.recv().await
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.hub.unregister(&self.name, self.instance_id);
        self.receiver.close();
    }
}

impl Drop for SyncChannel {
    fn drop(&mut self) {
        self.close();
    }
}
