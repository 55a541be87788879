use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The request did not complete (connect, TLS, body read).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The service answered with a structured `{"status":"error"}` payload.
    #[error("{category}: {message}")]
    Api {
        category: String,
        message: String,
        correlation_id: Option<String>,
    },

    /// Non-success status without a structured error payload.
    #[error("HubSpot returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("request delay must be greater than zero, otherwise HubSpot will probably block you")]
    InvalidDelay,
}

impl Error {
    #[must_use]
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
