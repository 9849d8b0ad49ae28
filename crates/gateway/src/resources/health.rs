//! Root-level liveness check.

use serde::{Deserialize, Serialize};

use crate::request::ApiRequest;
use crate::{Envelope, GatewayError, RequestGateway};

/// Whether the backend can be reached at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    /// The backend answered (whatever the status).
    Online,
    /// No response was received.
    Offline,
}

/// `GET <origin>/health`.
#[derive(Clone, Copy)]
pub struct HealthApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> HealthApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    /// Fetch the health envelope.
    pub async fn check(self) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::get("/health").at_origin())
            .await
    }

    /// Classify reachability. Only transport failures count as offline.
    pub async fn connectivity(self) -> ConnectivityState {
        match self.check().await {
            Err(e) if e.is_network() => {
                tracing::warn!("backend unreachable: {}", e);
                ConnectivityState::Offline
            }
            _ => ConnectivityState::Online,
        }
    }
}
