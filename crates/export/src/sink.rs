//! Persistence of the finished archive.

use std::path::{Path, PathBuf};

use {
    async_trait::async_trait,
    tokio::fs,
    tracing::{error, info},
};

use crate::{Error, Result, schema::ExportThread};

/// Receives the complete archive once, after every thread is collected.
#[async_trait]
pub trait ExportSink: Send + Sync {
    async fn write(&self, threads: &[ExportThread]) -> Result<()>;
}

/// Pretty-printed JSON file, replaced atomically.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `chats.json` -> `chats.json.tmp`, next to the target.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write to a sibling temp file, then rename over the target.
    async fn atomic_write(&self, json: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        let tmp = self.temp_path();
        fs::write(&tmp, json.as_bytes()).await?;
        fs::rename(&tmp, &self.path).await
    }
}

#[async_trait]
impl ExportSink for JsonFileSink {
    async fn write(&self, threads: &[ExportThread]) -> Result<()> {
        info!(path = %self.path.display(), threads = threads.len(), "writing export");
        let json = serde_json::to_string_pretty(threads)?;
        self.atomic_write(&json).await.map_err(|source| {
            error!(path = %self.path.display(), error = %source, "failed to write export");
            Error::write(&self.path, source)
        })
    }
}
