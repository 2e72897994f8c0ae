use super::types::Message;
use crate::api::HistoryEntry;
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe store for the conversation shown in the UI.
///
/// The server copy of the history is authoritative; each successful fetch
/// replaces the local list wholesale. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct MessageStorage {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MessageStorage {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn add(&self, message: Message) {
        self.messages.write().push(message);
    }

    /// Replace the entire list with freshly fetched server history.
    pub fn replace_all(&self, entries: &[HistoryEntry]) {
        let messages = entries.iter().map(Message::from_history_entry).collect();
        *self.messages.write() = messages;
    }

    pub fn get_all(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn clear(&self) {
        self.messages.write().clear();
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl Default for MessageStorage {
    fn default() -> Self {
        Self::new()
    }
}
