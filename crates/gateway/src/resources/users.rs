use crate::request::ApiRequest;
use crate::{Envelope, GatewayError, RequestGateway};

/// `/user` operations.
#[derive(Clone, Copy)]
pub struct UsersApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(self) -> Result<Envelope, GatewayError> {
        self.gateway.send(ApiRequest::get("/user")).await
    }

    /// GET /user/current/:email (the email is sent as one encoded path segment).
    pub async fn current(self, email: &str) -> Result<Envelope, GatewayError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(GatewayError::invalid_request("email must not be empty"));
        }
        self.gateway
            .send(ApiRequest::get("/user/current").segment(email))
            .await
    }
}
