//! Client for the HubSpot Conversations API.
//!
//! Lists channels, walks the `after`-cursor pagination of threads and of each
//! thread's messages with a fixed pause between requests, and filters both
//! collections down to a single channel.

pub mod client;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod paginate;
pub mod response;
pub mod types;

pub use {
    client::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, HubSpotClient},
    error::{Error, Result},
    fetch::Fetcher,
    paginate::{PageSource, Paginator, Walk, WalkState},
    types::{Channel, Message, MessageDirection, MessageType, Page, Thread},
};
