//! The ok/error union layered under a successful HTTP exchange.

use {
    serde::{Deserialize, de::DeserializeOwned},
    serde_json::Value,
};

use crate::{Error, Result};

/// Error body returned by HubSpot, e.g.
/// `{"status":"error","message":"...","correlationId":"...","category":"UNAUTHORIZED"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub status: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

impl From<ErrorPayload> for Error {
    fn from(payload: ErrorPayload) -> Self {
        Error::Api {
            category: payload.category,
            message: payload.message,
            correlation_id: payload.correlation_id,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ApiResponse<T> {
    Ok(T),
    Error(ErrorPayload),
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Classify a decoded JSON body. Objects carrying `"status": "error"` are
    /// the error case; everything else must decode as `T`.
    pub fn from_value(endpoint: &str, value: Value) -> Result<Self> {
        if is_error_payload(&value) {
            let payload = serde_json::from_value(value).map_err(|e| Error::decode(endpoint, e))?;
            return Ok(Self::Error(payload));
        }
        let ok = serde_json::from_value(value).map_err(|e| Error::decode(endpoint, e))?;
        Ok(Self::Ok(ok))
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Error(payload) => Err(payload.into()),
        }
    }
}

pub(crate) fn is_error_payload(value: &Value) -> bool {
    value.get("status").and_then(Value::as_str) == Some("error")
}
