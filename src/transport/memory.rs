//! In-memory transport for tests and local development.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;
use uuid::Uuid;

use super::{MessageId, Transport, TransportError};
use crate::message::Message;

/// Records every accepted message in order instead of delivering it.
///
/// Can be flipped into a failing mode to exercise the error path.
pub struct RecordingTransport {
    sent: DashMap<u64, (MessageId, Message)>,
    seq: AtomicU64,
    fail: AtomicBool,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            sent: DashMap::new(),
            seq: AtomicU64::new(0),
            fail: AtomicBool::new(false),
        }
    }

    /// Make every subsequent send fail with [`TransportError::Unavailable`].
    pub fn fail_all(&self, fail: bool) {
        self.fail.store(fail, Ordering::Relaxed);
    }

    /// Accepted messages, in send order.
    pub fn sent(&self) -> Vec<Message> {
        let mut entries: Vec<(u64, Message)> = self
            .sent
            .iter()
            .map(|e| (*e.key(), e.value().1.clone()))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, m)| m).collect()
    }

    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }

    /// The most recently accepted message, if any.
    pub fn last(&self) -> Option<Message> {
        self.sent().pop()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, message: &Message) -> Result<MessageId, TransportError> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(TransportError::Unavailable(
                "recording transport set to fail".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.sent.insert(seq, (id, message.clone()));
        Ok(id)
    }
}
