use serde::Serialize;

use auditdesk_core::RecordId;

use crate::request::{ApiRequest, require_ids};
use crate::{Envelope, GatewayError, RequestGateway};

/// Body of `POST /requirements/delete`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequirements<'a> {
    requirement_ids: &'a [RecordId],
}

/// `/requirements` operations.
#[derive(Clone, Copy)]
pub struct RequirementsApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> RequirementsApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    /// GET /requirements/all
    pub async fn list(self) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::get("/requirements/all"))
            .await
    }

    /// GET /requirements/criteria, or /requirements/criteria/event/:id when
    /// scoped to an event.
    pub async fn criteria(self, event: Option<RecordId>) -> Result<Envelope, GatewayError> {
        let request = match event {
            Some(id) => ApiRequest::get("/requirements/criteria/event").segment(id),
            None => ApiRequest::get("/requirements/criteria"),
        };
        self.gateway.send(request).await
    }

    /// GET /requirements/event/:id
    pub async fn for_event(self, event_id: RecordId) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::get("/requirements/event").segment(event_id))
            .await
    }

    /// POST /requirements/add
    pub async fn create<B: Serialize + ?Sized>(
        self,
        requirement: &B,
    ) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::post("/requirements/add").json(requirement)?)
            .await
    }

    /// PUT /requirements/update/:id
    pub async fn update<B: Serialize + ?Sized>(
        self,
        id: RecordId,
        requirement: &B,
    ) -> Result<Envelope, GatewayError> {
        let request = ApiRequest::put("/requirements/update")
            .segment(id)
            .json(requirement)?;
        self.gateway.send(request).await
    }

    /// POST /requirements/delete with `{ "requirementIds": [..] }`.
    pub async fn delete_many(self, ids: &[RecordId]) -> Result<Envelope, GatewayError> {
        require_ids(ids)?;
        let body = DeleteRequirements {
            requirement_ids: ids,
        };
        self.gateway
            .send(ApiRequest::post("/requirements/delete").json(&body)?)
            .await
    }
}
