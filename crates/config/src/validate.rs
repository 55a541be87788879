//! Turns a raw [`ExportConfig`] into settings that are safe to run with.

use std::{path::PathBuf, time::Duration};

use secrecy::{ExposeSecret, Secret};

use crate::{Error, Result, schema::ExportConfig};

/// Fully validated configuration.
#[derive(Clone)]
pub struct ExportSettings {
    pub token: Secret<String>,
    pub channel: String,
    /// Always non-zero.
    pub delay: Duration,
    pub base_url: String,
    pub output: PathBuf,
    pub page_size: u32,
}

impl std::fmt::Debug for ExportSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportSettings")
            .field("token", &"[REDACTED]")
            .field("channel", &self.channel)
            .field("delay", &self.delay)
            .field("base_url", &self.base_url)
            .field("output", &self.output)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl ExportConfig {
    /// Check required values. Runs before any network client exists, so a
    /// bad delay never costs a request.
    pub fn validate(self) -> Result<ExportSettings> {
        let token = self
            .token
            .filter(|t| !t.expose_secret().trim().is_empty())
            .ok_or(Error::MissingToken)?;
        let channel = self
            .channel
            .filter(|c| !c.is_empty())
            .ok_or(Error::MissingChannel)?;
        let delay = match self.wait_ms {
            Some(ms) if ms > 0 => Duration::from_millis(ms),
            _ => return Err(Error::InvalidDelay),
        };
        if self.page_size == 0 {
            return Err(Error::InvalidPageSize);
        }

        Ok(ExportSettings {
            token,
            channel,
            delay,
            base_url: self.base_url,
            output: self.output,
            page_size: self.page_size,
        })
    }
}
