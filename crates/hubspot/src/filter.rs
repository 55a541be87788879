//! Predicates selecting the threads and messages that belong in an export.

use crate::types::{Message, MessageType, Thread};

/// Message kinds carrying conversation content. Assignment and status-change
/// events are never exported.
pub const EXPORTED_MESSAGE_TYPES: [MessageType; 2] =
    [MessageType::Message, MessageType::WelcomeMessage];

/// Thread originated in `channel_id`.
pub fn thread_in_channel(thread: &Thread, channel_id: &str) -> bool {
    thread.original_channel_id == channel_id
}

/// Message was sent through `channel_id` and is a content message.
pub fn message_in_scope(message: &Message, channel_id: &str) -> bool {
    message.channel_id == channel_id && EXPORTED_MESSAGE_TYPES.contains(&message.kind)
}
