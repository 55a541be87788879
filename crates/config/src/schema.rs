//! Config schema and the override layer applied on top of it.

use std::path::PathBuf;

use {
    hubvault_hubspot::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE},
    secrecy::Secret,
    serde::Deserialize,
};

/// Where the archive is written when nothing else is configured.
pub const DEFAULT_OUTPUT: &str = "chats.json";

/// Raw configuration as read from `hubvault.toml`. Required values stay
/// optional here; `ExportConfig::validate` enforces them.
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Private app access token (bearer credential).
    pub token: Option<Secret<String>>,

    /// Exact name of the channel to export, e.g. `"Live Chat"`.
    pub channel: Option<String>,

    /// Pause between consecutive API requests, in milliseconds.
    pub wait_ms: Option<u64>,

    /// Conversations API root.
    pub base_url: String,

    /// Destination of the JSON archive.
    pub output: PathBuf,

    /// Results requested per page.
    pub page_size: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            token: None,
            channel: None,
            wait_ms: None,
            base_url: DEFAULT_BASE_URL.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl std::fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("channel", &self.channel)
            .field("wait_ms", &self.wait_ms)
            .field("base_url", &self.base_url)
            .field("output", &self.output)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Values from the environment or command line. `None` keeps the file value.
#[derive(Clone, Default)]
pub struct ConfigOverrides {
    pub token: Option<Secret<String>>,
    pub channel: Option<String>,
    pub wait_ms: Option<u64>,
    pub base_url: Option<String>,
    pub output: Option<PathBuf>,
    pub page_size: Option<u32>,
}

impl std::fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("channel", &self.channel)
            .field("wait_ms", &self.wait_ms)
            .field("base_url", &self.base_url)
            .field("output", &self.output)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl ExportConfig {
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(token) = overrides.token {
            self.token = Some(token);
        }
        if let Some(channel) = overrides.channel {
            self.channel = Some(channel);
        }
        if let Some(wait_ms) = overrides.wait_ms {
            self.wait_ms = Some(wait_ms);
        }
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(page_size) = overrides.page_size {
            self.page_size = page_size;
        }
    }
}
