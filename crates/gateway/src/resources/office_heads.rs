use reqwest::StatusCode;
use serde::Serialize;

use auditdesk_core::RecordId;

use crate::multipart::MultipartPayload;
use crate::request::{ApiRequest, require_ids};
use crate::resources::health::ConnectivityState;
use crate::{Envelope, GatewayError, RequestGateway};

const DELETE_PATH: &str = "/officeheads/delete";

/// Body of the batched `DELETE /officeheads/delete`.
#[derive(Debug, Serialize)]
struct DeleteOfficeHeads<'a> {
    ids: &'a [RecordId],
}

/// `/officeheads` operations.
#[derive(Clone, Copy)]
pub struct OfficeHeadsApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> OfficeHeadsApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    /// GET /officeheads/all
    pub async fn list(self) -> Result<Envelope, GatewayError> {
        self.gateway.send(ApiRequest::get("/officeheads/all")).await
    }

    /// GET /officeheads/:id
    pub async fn get(self, id: RecordId) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::get("/officeheads").segment(id))
            .await
    }

    /// POST /officeheads/add as `multipart/form-data` (profile picture + fields).
    pub async fn create(self, form: MultipartPayload) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::post("/officeheads/add").multipart(form))
            .await
    }

    /// PUT /officeheads/update/:id as `multipart/form-data`.
    pub async fn update(
        self,
        id: RecordId,
        form: MultipartPayload,
    ) -> Result<Envelope, GatewayError> {
        let request = ApiRequest::put("/officeheads/update")
            .segment(id)
            .multipart(form);
        self.gateway.send(request).await
    }

    /// Delete several office heads.
    ///
    /// First a batched `DELETE /officeheads/delete` with `{ "ids": [..] }`.
    /// If that answers 404 or 405, the same ids are sent once more as
    /// repeated query parameters (`?ids=3&ids=7`) to the same path, and that
    /// second result is what the caller gets. No other status triggers the
    /// second request.
    pub async fn delete_many(self, ids: &[RecordId]) -> Result<Envelope, GatewayError> {
        require_ids(ids)?;

        let batched = ApiRequest::delete(DELETE_PATH).json(&DeleteOfficeHeads { ids })?;
        match self.gateway.send(batched).await {
            Err(GatewayError::Server { status, .. }) if is_fallback_status(status) => {
                tracing::info!(
                    "batched office-head delete answered {}; resending {} ids as query parameters",
                    status,
                    ids.len()
                );
                let fallback = ApiRequest::delete(DELETE_PATH).query_ids("ids", ids);
                self.gateway.send(fallback).await
            }
            other => other,
        }
    }

    /// GET <origin>/health, used by the office-head views to tell a stopped
    /// backend apart from an empty list.
    pub async fn check_connection(self) -> ConnectivityState {
        self.gateway.health().connectivity().await
    }
}

fn is_fallback_status(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND || status == StatusCode::METHOD_NOT_ALLOWED
}
