//! Message assembly and dispatch.
//!
//! This module provides:
//! - The transport-level [`Message`] representation and its builder
//! - The standard variable builder for slot-related messages
//! - The [`Messenger`], which compiles a template in all three formats,
//!   assembles the message and hands it to the transport

mod dispatcher;
mod types;
mod variables;

pub use dispatcher::{
    CopyPolicy, CopyRule, Messenger, SendError, SendResult, SCHEDULER_COMPONENT,
};
pub use types::{Message, MessageBuilder};
