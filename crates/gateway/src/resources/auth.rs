//! `/auth` operations and the credential lifecycle around them.

use auditdesk_auth::{Credential, CredentialStore, LoginRequest, RegisterRequest};

use crate::request::ApiRequest;
use crate::{Envelope, GatewayError, RequestGateway};

/// `/auth` operations.
#[derive(Clone, Copy)]
pub struct AuthApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    /// POST /auth/login.
    ///
    /// When the envelope does not report `success: false` and carries a
    /// token, the token becomes the stored credential.
    pub async fn login(self, request: &LoginRequest) -> Result<Envelope, GatewayError> {
        let envelope = self
            .gateway
            .send(ApiRequest::post("/auth/login").json(request)?)
            .await?;

        if envelope.success() == Some(false) {
            return Ok(envelope);
        }

        match envelope.token() {
            Some(token) => {
                let credential = Credential::new(token)
                    .map_err(|e| GatewayError::Decode(format!("login token: {}", e)))?;
                self.gateway.credentials().save(&credential)?;
                tracing::info!("signed in as {}", request.email);
            }
            None => tracing::warn!("login response for {} carried no token", request.email),
        }
        Ok(envelope)
    }

    /// POST /auth/register
    pub async fn register(self, request: &RegisterRequest) -> Result<Envelope, GatewayError> {
        self.gateway
            .send(ApiRequest::post("/auth/register").json(request)?)
            .await
    }

    /// POST /auth/logout, then drop the stored credential whatever the outcome.
    pub async fn logout(self) -> Result<Envelope, GatewayError> {
        let result = self.gateway.send(ApiRequest::post("/auth/logout")).await;
        let cleared = self.gateway.credentials().clear();

        match (result, cleared) {
            (Ok(envelope), Ok(())) => Ok(envelope),
            (Ok(_), Err(e)) => Err(e.into()),
            (Err(e), cleared) => {
                if let Err(clear_err) = cleared {
                    tracing::error!("failed to clear stored credential: {}", clear_err);
                }
                Err(e)
            }
        }
    }
}
