//! Export orchestration.
//!
//! Strictly sequential: resolve the channel, list its threads, then fetch each
//! thread's messages one thread at a time, and finally persist the archive in
//! one write. Any error aborts the run before anything is written.

use {
    hubvault_hubspot::Channel,
    hubvault_redact::Redactor,
    tracing::info,
};

use crate::{
    Error, Result, schema::ExportThread, sink::ExportSink, source::ConversationSource,
    transform::export_thread,
};

/// Log a progress line every this many threads.
pub const PROGRESS_STEP: usize = 20;

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub channel_id: String,
    pub threads: usize,
    pub messages: usize,
}

pub struct ExportPipeline<S> {
    source: S,
    redactor: Redactor,
    channel_name: String,
}

impl<S: ConversationSource> ExportPipeline<S> {
    pub fn new(source: S, channel_name: impl Into<String>) -> Self {
        Self {
            source,
            redactor: Redactor::default(),
            channel_name: channel_name.into(),
        }
    }

    #[must_use]
    pub fn with_redactor(mut self, redactor: Redactor) -> Self {
        self.redactor = redactor;
        self
    }

    /// The channel whose name equals the configured name exactly.
    pub async fn resolve_channel(&self) -> Result<Channel> {
        let channel = self
            .source
            .channels()
            .await?
            .into_iter()
            .find(|c| c.name == self.channel_name)
            .ok_or_else(|| Error::channel_not_found(&self.channel_name))?;
        info!(channel_id = %channel.id, name = %channel.name, "using channel");
        Ok(channel)
    }

    /// Resolve, list and transform, without persisting.
    pub async fn collect(&self) -> Result<(Channel, Vec<ExportThread>)> {
        let channel = self.resolve_channel().await?;
        let threads = self.source.threads(&channel.id).await?;

        info!(threads = threads.len(), "reading HubSpot messages");
        let total = threads.len();
        let mut exported = Vec::with_capacity(total);
        for (i, thread) in threads.iter().enumerate() {
            if (i + 1) % PROGRESS_STEP == 0 {
                info!("thread {}/{total}...", i + 1);
            }
            let messages = self.source.messages(&thread.id, &channel.id).await?;
            exported.push(export_thread(thread, &messages, &self.redactor));
        }
        Ok((channel, exported))
    }

    /// Full run: collect everything, then hand it to `sink` in one call.
    pub async fn run(&self, sink: &dyn ExportSink) -> Result<ExportSummary> {
        let (channel, threads) = self.collect().await?;
        sink.write(&threads).await?;

        let summary = ExportSummary {
            channel_id: channel.id,
            threads: threads.len(),
            messages: threads.iter().map(|t| t.messages.len()).sum(),
        };
        info!(
            threads = summary.threads,
            messages = summary.messages,
            "export complete"
        );
        Ok(summary)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use {
        super::*,
        crate::schema::{ExportDirection, ExportMessage},
        async_trait::async_trait,
        hubvault_hubspot::{Message, MessageDirection, MessageType, Thread},
    };

    /// Serves fixed data and logs every call in order.
    #[derive(Default)]
    struct Fixture {
        channels: Vec<Channel>,
        threads: Vec<Thread>,
        messages: HashMap<String, Vec<Message>>,
        fail_messages_for: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl Fixture {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ConversationSource for &Fixture {
        async fn channels(&self) -> Result<Vec<Channel>> {
            self.calls.lock().unwrap().push("channels".into());
            Ok(self.channels.clone())
        }

        async fn threads(&self, channel_id: &str) -> Result<Vec<Thread>> {
            self.calls.lock().unwrap().push(format!("threads:{channel_id}"));
            Ok(self
                .threads
                .iter()
                .filter(|t| t.original_channel_id == channel_id)
                .cloned()
                .collect())
        }

        async fn messages(&self, thread_id: &str, channel_id: &str) -> Result<Vec<Message>> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("messages:{thread_id}:{channel_id}"));
            if self.fail_messages_for.as_deref() == Some(thread_id) {
                return Err(hubvault_hubspot::Error::Api {
                    category: "RATE_LIMITS".into(),
                    message: "slow down".into(),
                    correlation_id: None,
                }
                .into());
            }
            Ok(self.messages.get(thread_id).cloned().unwrap_or_default())
        }
    }

    /// Keeps whatever it is given.
    #[derive(Default)]
    struct Captured(Mutex<Option<Vec<ExportThread>>>);

    #[async_trait]
    impl ExportSink for Captured {
        async fn write(&self, threads: &[ExportThread]) -> Result<()> {
            *self.0.lock().unwrap() = Some(threads.to_vec());
            Ok(())
        }
    }

    fn channel(id: &str, name: &str) -> Channel {
        Channel {
            id: id.into(),
            name: name.into(),
        }
    }

    fn thread(id: &str, channel: &str, status: &str) -> Thread {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "createdAt": "2024-05-01T10:00:00Z",
            "status": status,
            "originalChannelId": channel
        }))
        .unwrap()
    }

    fn incoming(text: &str) -> Message {
        Message {
            id: None,
            kind: MessageType::Message,
            created_at: "2024-05-01T10:00:30Z".into(),
            channel_id: "ch1".into(),
            direction: MessageDirection::Incoming,
            text: text.into(),
        }
    }

    fn live_chat_fixture() -> Fixture {
        Fixture {
            channels: vec![channel("ch0", "Email"), channel("ch1", "Live Chat")],
            threads: vec![thread("t1", "ch1", "CLOSED"), thread("t2", "ch2", "OPEN")],
            messages: HashMap::from([("t1".to_string(), vec![incoming("email me@x.com")])]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn exports_only_the_target_channel() {
        let fixture = live_chat_fixture();
        let sink = Captured::default();

        let summary = ExportPipeline::new(&fixture, "Live Chat")
            .run(&sink)
            .await
            .unwrap();

        assert_eq!(summary, ExportSummary {
            channel_id: "ch1".into(),
            threads: 1,
            messages: 1,
        });
        let written = sink.0.lock().unwrap().clone().unwrap();
        assert_eq!(written, vec![ExportThread {
            id: "t1".into(),
            created_at: "2024-05-01T10:00:00Z".into(),
            closed: true,
            messages: vec![ExportMessage {
                created_at: "2024-05-01T10:00:30Z".into(),
                text: "email <<##removed##>>".into(),
                direction: ExportDirection::In,
            }],
        }]);
        assert_eq!(fixture.calls(), [
            "channels",
            "threads:ch1",
            "messages:t1:ch1"
        ]);
    }

    #[tokio::test]
    async fn unknown_channel_is_fatal_before_listing_threads() {
        let fixture = live_chat_fixture();
        let sink = Captured::default();

        let err = ExportPipeline::new(&fixture, "live chat")
            .run(&sink)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ChannelNotFound { ref name } if name == "live chat"));
        assert_eq!(
            err.to_string(),
            "could not find channel 'live chat' for live chats"
        );
        assert_eq!(fixture.calls(), ["channels"]);
        assert!(sink.0.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn threads_are_processed_in_list_order() {
        let fixture = Fixture {
            channels: vec![channel("ch1", "Live Chat")],
            threads: vec![
                thread("a", "ch1", "OPEN"),
                thread("b", "ch1", "OPEN"),
                thread("c", "ch1", "OPEN"),
            ],
            ..Default::default()
        };

        let (_, threads) = ExportPipeline::new(&fixture, "Live Chat")
            .collect()
            .await
            .unwrap();

        let ids: Vec<&str> = threads.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(fixture.calls()[2..], [
            "messages:a:ch1",
            "messages:b:ch1",
            "messages:c:ch1"
        ]);
        assert!(threads.iter().all(|t| t.messages.is_empty()));
    }

    #[tokio::test]
    async fn api_error_mid_run_writes_nothing() {
        let fixture = Fixture {
            channels: vec![channel("ch1", "Live Chat")],
            threads: vec![
                thread("a", "ch1", "OPEN"),
                thread("b", "ch1", "OPEN"),
                thread("c", "ch1", "OPEN"),
            ],
            fail_messages_for: Some("b".into()),
            ..Default::default()
        };
        let sink = Captured::default();

        let err = ExportPipeline::new(&fixture, "Live Chat")
            .run(&sink)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "RATE_LIMITS: slow down");
        assert!(sink.0.lock().unwrap().is_none());
        assert!(!fixture.calls().contains(&"messages:c:ch1".to_string()));
    }

    #[tokio::test]
    async fn custom_redactor_is_used() {
        let fixture = live_chat_fixture();
        let (_, threads) = ExportPipeline::new(&fixture, "Live Chat")
            .with_redactor(Redactor::default().with_mask("[pii]"))
            .collect()
            .await
            .unwrap();
        assert_eq!(threads[0].messages[0].text, "email [pii]");
    }
}
