use serde::Serialize;

use auditdesk_core::RecordId;

use crate::request::{ApiRequest, require_ids};
use crate::{Envelope, GatewayError, RequestGateway};

/// Body of `POST /events/delete`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteEvents<'a> {
    event_ids: &'a [RecordId],
}

/// `/events` operations.
#[derive(Clone, Copy)]
pub struct EventsApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> EventsApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    /// GET /events
    pub async fn list(self) -> Result<Envelope, GatewayError> {
        self.gateway.send(ApiRequest::get("/events")).await
    }

    /// POST /events/add
    pub async fn create<B: Serialize + ?Sized>(self, event: &B) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::post("/events/add").json(event)?)
            .await
    }

    /// PUT /events/update/:id
    pub async fn update<B: Serialize + ?Sized>(
        self,
        id: RecordId,
        event: &B,
    ) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::put("/events/update").segment(id).json(event)?)
            .await
    }

    /// POST /events/delete with `{ "eventIds": [..] }`, one batched request.
    pub async fn delete_many(self, ids: &[RecordId]) -> Result<Envelope, GatewayError> {
        require_ids(ids)?;
        let body = DeleteEvents { event_ids: ids };
        self.gateway
            .send(ApiRequest::post("/events/delete").json(&body)?)
            .await
    }
}
