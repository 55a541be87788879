//! Wire types for the HubSpot Conversations API.

use serde::{Deserialize, Serialize};

/// A communication channel (live chat widget, e-mail inbox, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

/// `GET /channels` body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelList {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub results: Vec<Channel>,
}

/// Conversation-level record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: String,
    pub created_at: String,
    #[serde(default)]
    pub status: String,
    pub original_channel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_channel_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_message_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbox_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_contact_id: Option<String>,
    #[serde(default)]
    pub spam: bool,
    #[serde(default)]
    pub archived: bool,
}

impl Thread {
    pub fn is_closed(&self) -> bool {
        self.status == "CLOSED"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Message,
    WelcomeMessage,
    Assignment,
    ThreadStatusChange,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageDirection {
    Incoming,
    Outgoing,
    #[serde(other)]
    Other,
}

/// A single message within a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub created_at: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default = "default_direction")]
    pub direction: MessageDirection,
    #[serde(default)]
    pub text: String,
}

fn default_direction() -> MessageDirection {
    MessageDirection::Other
}

/// One page of a cursor-paginated collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, after: Option<&str>) -> Self {
        Self {
            results,
            paging: after.map(|after| Paging {
                next: Some(PagingNext {
                    after: Some(after.to_string()),
                    link: None,
                }),
            }),
        }
    }

    /// Cursor for the following page; empty when the collection is exhausted.
    pub fn next_cursor(&self) -> &str {
        self.paging
            .as_ref()
            .and_then(|p| p.next.as_ref())
            .and_then(|n| n.after.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<PagingNext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PagingNext {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}
