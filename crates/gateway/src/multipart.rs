//! Multipart payloads for file-bearing operations (office-head photos).
//!
//! The payload is a plain description; it only becomes a
//! `reqwest::multipart::Form` when the request is dispatched, so the
//! `multipart/form-data` content type applies to that single call.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::error::GatewayError;

/// A file field.
#[derive(Clone)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl core::fmt::Debug for FilePart {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone)]
enum Field {
    Text(String, String),
    File(String, FilePart),
}

#[derive(Debug, Clone, Default)]
pub struct MultipartPayload {
    fields: Vec<Field>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build text fields from a serializable record.
    ///
    /// The record must serialize to a JSON object. Strings are sent as-is,
    /// `null` fields are skipped, everything else is sent as its JSON text.
    pub fn from_fields<T: Serialize + ?Sized>(record: &T) -> Result<Self, GatewayError> {
        let value = serde_json::to_value(record)
            .map_err(|e| GatewayError::invalid_request(format!("failed to encode form: {}", e)))?;
        let Value::Object(map) = value else {
            return Err(GatewayError::invalid_request("form fields must be an object"));
        };

        let mut payload = Self::new();
        for (name, value) in map {
            match value {
                Value::Null => {}
                Value::String(text) => payload = payload.text(name, text),
                other => payload = payload.text(name, other.to_string()),
            }
        }
        Ok(payload)
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field::Text(name.into(), value.into()));
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: FilePart) -> Self {
        self.fields.push(Field::File(name.into(), file));
        self
    }

    /// Read `path` and attach it under `name`; the content type is guessed
    /// from the extension.
    pub async fn file_from_path(
        self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| GatewayError::invalid_request(format!("cannot read {:?}: {}", path, e)))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        Ok(self.file(
            name,
            FilePart {
                file_name,
                content_type,
                bytes,
            },
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has_file(&self) -> bool {
        self.fields.iter().any(|f| matches!(f, Field::File(..)))
    }

    /// Value of a text field.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|f| match f {
            Field::Text(n, v) if n == name => Some(v.as_str()),
            _ => None,
        })
    }

    pub(crate) fn into_form(self) -> Result<Form, GatewayError> {
        let mut form = Form::new();
        for field in self.fields {
            form = match field {
                Field::Text(name, value) => form.text(name, value),
                Field::File(name, file) => {
                    let part = Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.content_type)
                        .map_err(|e| {
                            GatewayError::invalid_request(format!(
                                "invalid content type {:?}: {}",
                                file.content_type, e
                            ))
                        })?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}
