//! Channel, thread and message retrieval on top of [`Paginator`].

use {async_trait::async_trait, tracing::info};

use crate::{
    Result,
    client::HubSpotClient,
    filter::{message_in_scope, thread_in_channel},
    paginate::{PageSource, Paginator},
    types::{Channel, Message, Page, Thread},
};

/// All conversation threads, newest pages first as HubSpot serves them.
pub struct ThreadPages<'a> {
    client: &'a HubSpotClient,
}

impl<'a> ThreadPages<'a> {
    pub fn new(client: &'a HubSpotClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for ThreadPages<'_> {
    type Item = Thread;

    fn label(&self) -> &str {
        "threads"
    }

    async fn fetch_page(&self, after: Option<&str>) -> Result<Page<Thread>> {
        self.client.threads_page(after).await
    }
}

/// Messages of one thread, oldest first.
pub struct MessagePages<'a> {
    client: &'a HubSpotClient,
    thread_id: &'a str,
}

impl<'a> MessagePages<'a> {
    pub fn new(client: &'a HubSpotClient, thread_id: &'a str) -> Self {
        Self { client, thread_id }
    }
}

#[async_trait]
impl PageSource for MessagePages<'_> {
    type Item = Message;

    fn label(&self) -> &str {
        "messages"
    }

    async fn fetch_page(&self, after: Option<&str>) -> Result<Page<Message>> {
        self.client.messages_page(self.thread_id, after).await
    }
}

/// Serial fetcher for the three resources an export needs.
#[derive(Debug)]
pub struct Fetcher {
    client: HubSpotClient,
    paginator: Paginator,
}

impl Fetcher {
    pub fn new(client: HubSpotClient, paginator: Paginator) -> Self {
        Self { client, paginator }
    }

    /// Every channel of the account, in one request.
    pub async fn channels(&self) -> Result<Vec<Channel>> {
        info!("reading HubSpot channels");
        self.client.list_channels().await
    }

    /// Threads that originated in `channel_id`.
    pub async fn threads(&self, channel_id: &str) -> Result<Vec<Thread>> {
        info!(channel_id, "reading HubSpot threads");
        let walk = self
            .paginator
            .walk(&ThreadPages::new(&self.client), |t| {
                thread_in_channel(t, channel_id)
            })
            .await?;
        info!(threads = walk.items.len(), pages = walk.pages, "threads read");
        Ok(walk.items)
    }

    /// Content messages of `thread_id` sent through `channel_id`, in creation order.
    pub async fn messages(&self, thread_id: &str, channel_id: &str) -> Result<Vec<Message>> {
        let walk = self
            .paginator
            .walk(&MessagePages::new(&self.client, thread_id), |m| {
                message_in_scope(m, channel_id)
            })
            .await?;
        Ok(walk.items)
    }
}
