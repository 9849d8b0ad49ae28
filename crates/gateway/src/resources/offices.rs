use serde::Serialize;

use auditdesk_core::RecordId;

use crate::request::ApiRequest;
use crate::{Envelope, GatewayError, RequestGateway};

/// `/offices` operations.
#[derive(Clone, Copy)]
pub struct OfficesApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> OfficesApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(self) -> Result<Envelope, GatewayError> {
        self.gateway.send(ApiRequest::get("/offices")).await
    }

    pub async fn create<B: Serialize + ?Sized>(self, office: &B) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::post("/offices").json(office)?)
            .await
    }

    pub async fn update<B: Serialize + ?Sized>(
        self,
        id: RecordId,
        office: &B,
    ) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::put("/offices").segment(id).json(office)?)
            .await
    }

    pub async fn delete(self, id: RecordId) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::delete("/offices").segment(id))
            .await
    }
}
