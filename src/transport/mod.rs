//! Notification transport seam.
//!
//! The crate never delivers anything itself: a fully assembled [`Message`]
//! is handed to a [`Transport`] supplied by the host, and the result comes
//! back unchanged. Delivery reliability, retries and bookkeeping all belong
//! to the transport.

use thiserror::Error;
use uuid::Uuid;

use crate::message::Message;

mod memory;

pub use memory::RecordingTransport;

/// Identifier a transport assigns to an accepted message.
pub type MessageId = Uuid;

/// Transport-specific error type
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("delivery rejected: {0}")]
    Rejected(String),

    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// External notification-delivery primitive.
///
/// Returning an error is an expected outcome, not an exceptional one:
/// callers inspect it, possibly log it, and decide themselves whether to try
/// again later.
pub trait Transport: Send + Sync {
    fn send(&self, message: &Message) -> Result<MessageId, TransportError>;
}
