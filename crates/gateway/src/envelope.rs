//! Response envelope.
//!
//! The backend answers with `{ success, data | user | message, ... }`. The
//! shape is the backend's contract; the gateway only parses the JSON and
//! hands it over unmodified. Accessors here are read-only conveniences.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Value);

impl Envelope {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a response body. An empty body becomes `null`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Value::Null));
        }
        serde_json::from_slice(bytes).map(Self)
    }

    /// Parse an error body, keeping non-JSON text as a plain string.
    pub(crate) fn from_error_body(bytes: &[u8]) -> Self {
        Self::from_slice(bytes)
            .unwrap_or_else(|_| Self(Value::String(String::from_utf8_lossy(bytes).into_owned())))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `success` flag, when the backend sent one.
    pub fn success(&self) -> Option<bool> {
        self.get("success").and_then(Value::as_bool)
    }

    /// The `message` field, or the whole body when the server replied with plain text.
    pub fn message(&self) -> Option<&str> {
        match &self.0 {
            Value::String(text) if !text.is_empty() => Some(text.as_str()),
            other => other.get("message").and_then(Value::as_str),
        }
    }

    pub fn data(&self) -> Option<&Value> {
        self.get("data")
    }

    pub fn user(&self) -> Option<&Value> {
        self.get("user")
    }

    /// Session token carried by a login response (`token` or `data.token`).
    pub fn token(&self) -> Option<&str> {
        self.get("token")
            .or_else(|| self.data().and_then(|data| data.get("token")))
            .and_then(Value::as_str)
    }

    /// Deserialize the `data` field into a caller-chosen type.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        let data = self
            .data()
            .ok_or_else(|| GatewayError::Decode("response has no `data` field".to_string()))?;
        T::deserialize(data).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Turn a `success: false` envelope into [`GatewayError::Rejected`].
    ///
    /// Envelopes without a `success` flag pass.
    pub fn ensure_success(self) -> Result<Self, GatewayError> {
        if self.success() == Some(false) {
            let message = self
                .message()
                .unwrap_or("request was not successful")
                .to_string();
            return Err(GatewayError::Rejected {
                message,
                body: self,
            });
        }
        Ok(self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for Envelope {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
