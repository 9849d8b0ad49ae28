//! Request description handed to [`RequestGateway::send`](crate::RequestGateway::send).

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use auditdesk_core::RecordId;

use crate::config::split_path;
use crate::error::GatewayError;
use crate::multipart::MultipartPayload;

/// Which base URL a path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `<origin><api_prefix>/...`: every resource endpoint.
    Api,
    /// `<origin>/...`: root-level endpoints such as `/health`.
    Origin,
}

type QueryPairs = Vec<(String, String)>;

/// Parts of an [`ApiRequest`] as consumed by the gateway.
pub(crate) type RequestParts = (Method, Scope, Vec<String>, QueryPairs, RequestBody);

#[derive(Debug)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartPayload),
}

/// Method, path, optional query and body of one backend call.
#[derive(Debug)]
pub struct ApiRequest {
    method: Method,
    scope: Scope,
    segments: Vec<String>,
    query: QueryPairs,
    body: RequestBody,
}

impl ApiRequest {
    /// `path` is split on `/`; empty segments are dropped.
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            scope: Scope::Api,
            segments: split_path(path).map(str::to_string).collect(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Resolve against the origin instead of the API prefix.
    pub fn at_origin(mut self) -> Self {
        self.scope = Scope::Origin;
        self
    }

    /// Append one path segment. It is percent-encoded as a whole, so `/` inside
    /// `segment` cannot escape into a new path component.
    pub fn segment(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Repeat `key` once per identifier (`ids=3&ids=7`), preserving order.
    pub fn query_ids(mut self, key: &str, ids: &[RecordId]) -> Self {
        self.query.extend(id_query_pairs(key, ids));
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, GatewayError> {
        let value = serde_json::to_value(body)
            .map_err(|e| GatewayError::invalid_request(format!("failed to encode body: {}", e)))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, payload: MultipartPayload) -> Self {
        self.body = RequestBody::Multipart(payload);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Display form of the path, e.g. `/events/update/4`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub(crate) fn into_parts(self) -> RequestParts {
        (
            self.method,
            self.scope,
            self.segments,
            self.query,
            self.body,
        )
    }
}

/// `(key, id)` pairs for a repeated query parameter.
pub fn id_query_pairs(key: &str, ids: &[RecordId]) -> Vec<(String, String)> {
    ids.iter()
        .map(|id| (key.to_string(), id.to_string()))
        .collect()
}

/// Refuse to send a bulk request without identifiers.
pub(crate) fn require_ids(ids: &[RecordId]) -> Result<(), GatewayError> {
    if ids.is_empty() {
        return Err(GatewayError::invalid_request("at least one identifier is required"));
    }
    Ok(())
}
