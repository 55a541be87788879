//! Cursor walk over `after`-paginated collections.
//!
//! A walk is a small state machine. It starts in [`WalkState::Fetching`] with an
//! empty cursor, and each page moves it to one of:
//!
//! - `Fetching` with the page's next cursor, when that cursor is new,
//! - `Exhausted`, when the page carries no next cursor,
//! - `Stalled`, when the page hands back the cursor that was just requested.
//!
//! Every request except the first is preceded by the configured delay, so the
//! terminal page is never followed by a wasted sleep.

use std::time::Duration;

use {
    async_trait::async_trait,
    tracing::{debug, warn},
};

use crate::{Error, Result, types::Page};

/// Something that can produce one page for a given cursor.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    /// Name used in log lines.
    fn label(&self) -> &str;

    /// Fetch the page starting at `after` (`None` for the first page).
    async fn fetch_page(&self, after: Option<&str>) -> Result<Page<Self::Item>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkState {
    Fetching { cursor: String },
    Exhausted,
    Stalled { cursor: String },
}

impl WalkState {
    /// Transition taken after the page requested with `cursor` reported `next`.
    pub fn after_page(cursor: &str, next: &str) -> Self {
        if next.is_empty() {
            Self::Exhausted
        } else if next == cursor {
            Self::Stalled {
                cursor: next.to_string(),
            }
        } else {
            Self::Fetching {
                cursor: next.to_string(),
            }
        }
    }
}

/// Outcome of a finished walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk<T> {
    /// Accepted items, in request order then page order.
    pub items: Vec<T>,
    /// Number of requests issued.
    pub pages: usize,
    /// The walk ended on a repeated cursor rather than an empty one.
    pub stalled: bool,
}

/// Serial paginator with a fixed pause between requests.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    delay: Duration,
}

impl Paginator {
    /// Fails with [`Error::InvalidDelay`] for a zero delay: unthrottled
    /// requests get the caller blocked by the API.
    pub fn new(delay: Duration) -> Result<Self> {
        if delay.is_zero() {
            return Err(Error::InvalidDelay);
        }
        Ok(Self { delay })
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Walk every page of `source`, keeping the items `keep` accepts.
    pub async fn walk<S, F>(&self, source: &S, mut keep: F) -> Result<Walk<S::Item>>
    where
        S: PageSource + ?Sized,
        F: FnMut(&S::Item) -> bool + Send,
    {
        let mut items = Vec::new();
        let mut pages = 0usize;
        let mut state = WalkState::Fetching {
            cursor: String::new(),
        };

        loop {
            let cursor = match state {
                WalkState::Fetching { cursor } => cursor,
                WalkState::Exhausted => {
                    debug!(source = source.label(), pages, items = items.len(), "walk exhausted");
                    return Ok(Walk {
                        items,
                        pages,
                        stalled: false,
                    });
                },
                WalkState::Stalled { cursor } => {
                    warn!(
                        source = source.label(),
                        pages,
                        %cursor,
                        "cursor did not advance, stopping early"
                    );
                    return Ok(Walk {
                        items,
                        pages,
                        stalled: true,
                    });
                },
            };

            if pages > 0 {
                tokio::time::sleep(self.delay).await;
            }

            let after = (!cursor.is_empty()).then_some(cursor.as_str());
            let page = source.fetch_page(after).await?;
            pages += 1;

            state = WalkState::after_page(&cursor, page.next_cursor());
            let before = items.len();
            items.extend(page.results.into_iter().filter(|item| keep(item)));
            debug!(
                source = source.label(),
                page = pages,
                accepted = items.len() - before,
                total = items.len(),
                "fetched page"
            );
        }
    }
}
