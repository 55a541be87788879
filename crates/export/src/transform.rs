//! Raw API records to archive records.

use {
    hubvault_hubspot::{Message, MessageDirection, Thread},
    hubvault_redact::Redactor,
};

use crate::schema::{ExportDirection, ExportMessage, ExportThread};

impl From<MessageDirection> for ExportDirection {
    /// Only `INCOMING` is inbound; everything else counts as outbound.
    fn from(direction: MessageDirection) -> Self {
        match direction {
            MessageDirection::Incoming => Self::In,
            MessageDirection::Outgoing | MessageDirection::Other => Self::Out,
        }
    }
}

pub fn export_message(message: &Message, redactor: &Redactor) -> ExportMessage {
    ExportMessage {
        created_at: message.created_at.clone(),
        text: redactor.mask(&message.text),
        direction: message.direction.into(),
    }
}

/// Build the archive entry for `thread`, keeping message order.
pub fn export_thread(thread: &Thread, messages: &[Message], redactor: &Redactor) -> ExportThread {
    ExportThread {
        id: thread.id.clone(),
        created_at: thread.created_at.clone(),
        closed: thread.is_closed(),
        messages: messages
            .iter()
            .map(|m| export_message(m, redactor))
            .collect(),
    }
}
