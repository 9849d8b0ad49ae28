use serde::Serialize;

use auditdesk_core::RecordId;

use crate::request::ApiRequest;
use crate::{Envelope, GatewayError, RequestGateway};

// The backend spells this collection `officestypes`.
const OFFICE_TYPES: &str = "/officestypes";

/// `/officestypes` operations.
#[derive(Clone, Copy)]
pub struct OfficeTypesApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> OfficeTypesApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(self) -> Result<Envelope, GatewayError> {
        self.gateway.send(ApiRequest::get(OFFICE_TYPES)).await
    }

    pub async fn get(self, id: RecordId) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::get(OFFICE_TYPES).segment(id))
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(
        self,
        office_type: &B,
    ) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::post(OFFICE_TYPES).json(office_type)?)
            .await
    }

    pub async fn update<B: Serialize + ?Sized>(
        self,
        id: RecordId,
        office_type: &B,
    ) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::put(OFFICE_TYPES).segment(id).json(office_type)?)
            .await
    }

    pub async fn delete(self, id: RecordId) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::delete(OFFICE_TYPES).segment(id))
            .await
    }
}
