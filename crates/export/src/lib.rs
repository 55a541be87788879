//! Channel export: resolve the channel, walk its threads and messages, redact
//! and reshape them, and hand the archive to a sink.

pub mod error;
pub mod pipeline;
pub mod schema;
pub mod sink;
pub mod source;
pub mod transform;

pub use {
    error::{Error, Result},
    pipeline::{ExportPipeline, ExportSummary},
    schema::{ExportDirection, ExportMessage, ExportThread},
    sink::{ExportSink, JsonFileSink},
    source::ConversationSource,
};
