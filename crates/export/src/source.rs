use {
    async_trait::async_trait,
    hubvault_hubspot::{Channel, Fetcher, Message, Thread},
};

use crate::Result;

/// Where the pipeline reads conversations from.
///
/// Implementations return threads and messages already filtered to the
/// channel, messages in creation order.
#[async_trait]
pub trait ConversationSource: Send + Sync {
    async fn channels(&self) -> Result<Vec<Channel>>;
    async fn threads(&self, channel_id: &str) -> Result<Vec<Thread>>;
    async fn messages(&self, thread_id: &str, channel_id: &str) -> Result<Vec<Message>>;
}

#[async_trait]
impl ConversationSource for Fetcher {
    async fn channels(&self) -> Result<Vec<Channel>> {
        Ok(Fetcher::channels(self).await?)
    }

    async fn threads(&self, channel_id: &str) -> Result<Vec<Thread>> {
        Ok(Fetcher::threads(self, channel_id).await?)
    }

    async fn messages(&self, thread_id: &str, channel_id: &str) -> Result<Vec<Message>> {
        Ok(Fetcher::messages(self, thread_id, channel_id).await?)
    }
}
