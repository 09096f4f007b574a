//! Process-wide broadcast hub.
//!
//! Tracks every open channel handle, organized by channel name and instance.
//! A message posted by one instance reaches every other instance listening on
//! the same name, never the poster itself.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;
use tracing::debug;

use super::channel::SyncChannel;
use super::messages::ChannelMessage;

pub struct BroadcastHub {
    next_instance_id: AtomicUsize,
    /// channel name -> (instance id -> sender)
    channels: RwLock<HashMap<String, HashMap<usize, mpsc::UnboundedSender<ChannelMessage>>>>,
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self {
            next_instance_id: AtomicUsize::new(1),
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Open a long-lived handle on the named channel.
    pub fn open(self: &Arc<Self>, name: &str) -> SyncChannel {
        let instance_id = self.next_instance_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();

        self.channels
            .write()
            .unwrap()
            .entry(name.to_string())
            .or_default()
            .insert(instance_id, tx);
        debug!("Instance {} joined channel {}", instance_id, name);

        SyncChannel::new(self.clone(), name.to_string(), instance_id, rx)
    }

    /// Send to all OTHER instances on the channel.
    ///
    /// Returns the instance ids whose receiver was gone; those are pruned.
    pub(super) fn send_to_others(
        &self,
        name: &str,
        exclude_instance_id: usize,
        message: ChannelMessage,
    ) -> Vec<usize> {
        let failed: Vec<usize> = {
            let channels = self.channels.read().unwrap();
            match channels.get(name) {
                Some(instances) => instances
                    .iter()
                    .filter(|(id, _)| **id != exclude_instance_id)
                    .filter(|(_, sender)| sender.send(message.clone()).is_err())
                    .map(|(id, _)| *id)
                    .collect(),
                None => Vec::new(),
            }
        };

        for instance_id in &failed {
            self.unregister(name, *instance_id);
        }
        failed
    }

    /// Removes the instance and cleans up empty channel maps.
    pub(super) fn unregister(&self, name: &str, instance_id: usize) {
        let mut channels = self.channels.write().unwrap();
        if let Some(instances) = channels.get_mut(name) {
            instances.remove(&instance_id);
            if instances.is_empty() {
                channels.remove(name);
            }
        }
        debug!("Instance {} left channel {}", instance_id, name);
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.channels
            .read()
            .unwrap()
            .get(name)
            .map(|instances| instances.len())
            .unwrap_or(0)
    }

    pub fn is_instance_listening(&self, name: &str, instance_id: usize) -> bool {
        self.channels
            .read()
            .unwrap()
            .get(name)
            .map(|instances| instances.contains_key(&instance_id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ping() -> ChannelMessage {
        ChannelMessage::new("ping", serde_json::Value::Null)
    }

    #[test]
    fn open_assigns_distinct_instance_ids() {
        let hub = Arc::new(BroadcastHub::new());
        let a = hub.open("readlist");
        let b = hub.open("readlist");
        assert_ne!(a.instance_id(), b.instance_id());
        assert_eq!(hub.listener_count("readlist"), 2);
    }

    #[test]
    fn send_to_others_excludes_sender() {
        let hub = Arc::new(BroadcastHub::new());
        let mut a = hub.open("readlist");
        let mut b = hub.open("readlist");

        let failed = hub.send_to_others("readlist", a.instance_id(), ping());
        assert!(failed.is_empty());

        assert!(a.try_recv().is_none());
        assert_eq!(b.try_recv().unwrap().msg_type, "ping");
    }

    #[test]
    fn channels_are_isolated_by_name() {
        let hub = Arc::new(BroadcastHub::new());
        let a = hub.open("readlist");
        let mut other = hub.open("settings");

        hub.send_to_others("readlist", a.instance_id(), ping());
        assert!(other.try_recv().is_none());
    }

    #[test]
    fn unregister_cleans_up_empty_channel() {
        let hub = Arc::new(BroadcastHub::new());
        let a = hub.open("readlist");
        let id = a.instance_id();
        hub.unregister("readlist", id);

        assert!(!hub.is_instance_listening("readlist", id));
        assert!(!hub.channels.read().unwrap().contains_key("readlist"));
    }

    #[test]
    fn dead_receivers_are_pruned() {
        let hub = Arc::new(BroadcastHub::new());
        let a = hub.open("readlist");

        // Register a sender whose receiver is already gone.
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        hub.channels
            .write()
            .unwrap()
            .get_mut("readlist")
            .unwrap()
            .insert(999, tx);

        let failed = hub.send_to_others("readlist", a.instance_id(), ping());
        assert_eq!(failed, vec![999]);
        assert!(!hub.is_instance_listening("readlist", 999));
    }
}
