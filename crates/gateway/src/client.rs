//! The request gateway: one configured HTTP client plus the outgoing and
//! incoming interceptors.

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, StatusCode};
use url::Url;

use auditdesk_auth::{
    CredentialStore, LogOnlySessionHandler, MemoryCredentialStore, SessionExpiredHandler,
};

use crate::config::{GatewayConfig, append_path};
use crate::envelope::Envelope;
use crate::error::GatewayError;
use crate::request::{ApiRequest, RequestBody, Scope};
use crate::resources::{
    AuthApi, EventsApi, HealthApi, OfficeHeadsApi, OfficeTypesApi, OfficesApi, RequirementsApi,
    UsersApi,
};

/// Uniform entry point for every backend call.
///
/// Cheap to clone; clones share the HTTP connection pool, the credential
/// store and the session-expired handler.
#[derive(Clone)]
pub struct RequestGateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    http: reqwest::Client,
    origin: Url,
    api_base: Url,
    login_path: String,
    credentials: Arc<dyn CredentialStore>,
    on_session_expired: Arc<dyn SessionExpiredHandler>,
}

impl core::fmt::Debug for RequestGateway {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RequestGateway")
            .field("origin", &self.inner.origin.as_str())
            .field("api_base", &self.inner.api_base.as_str())
            .field("login_path", &self.inner.login_path)
            .finish_non_exhaustive()
    }
}

impl RequestGateway {
    pub fn builder(config: GatewayConfig) -> GatewayBuilder {
        GatewayBuilder::new(config)
    }

    /// Gateway with an in-memory credential store and a log-only 401 handler.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        Self::builder(config).build()
    }

    pub fn events(&self) -> EventsApi<'_> {
        EventsApi::new(self)
    }

    pub fn offices(&self) -> OfficesApi<'_> {
        OfficesApi::new(self)
    }

    pub fn office_types(&self) -> OfficeTypesApi<'_> {
        OfficeTypesApi::new(self)
    }

    pub fn office_heads(&self) -> OfficeHeadsApi<'_> {
        OfficeHeadsApi::new(self)
    }

    pub fn requirements(&self) -> RequirementsApi<'_> {
        RequirementsApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn health(&self) -> HealthApi<'_> {
        HealthApi::new(self)
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.credentials
    }

    pub fn login_path(&self) -> &str {
        &self.inner.login_path
    }

    pub fn api_base(&self) -> &Url {
        &self.inner.api_base
    }

    /// Absolute URL a request resolves to.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, GatewayError> {
        self.resolve(request.scope(), request.segments())
    }

    fn resolve(&self, scope: Scope, segments: &[String]) -> Result<Url, GatewayError> {
        let mut url = match scope {
            Scope::Api => self.inner.api_base.clone(),
            Scope::Origin => self.inner.origin.clone(),
        };
        append_path(&mut url, segments)?;
        Ok(url)
    }

    /// Dispatch `request` and return the server's envelope unmodified.
    ///
    /// - no response received: [`GatewayError::Transport`]
    /// - 401: credential cleared, handler notified, [`GatewayError::Unauthorized`]
    /// - any other non-2xx: [`GatewayError::Server`] with the body as sent
    ///
    /// The status decides the outcome before the body is read. A body that
    /// cannot be read is empty on a failure status and a
    /// [`GatewayError::Decode`] on a success status.
    pub async fn send(&self, request: ApiRequest) -> Result<Envelope, GatewayError> {
        let display_path = request.path();
        let (method, scope, segments, query, body) = request.into_parts();
        let url = self.resolve(scope, &segments)?;

        let mut builder = self.inner.http.request(method.clone(), url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(payload) => builder.multipart(payload.into_form()?),
        };
        let builder = self.authorize(builder)?;

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("{} {} got no response: {}", method, display_path, e);
                return Err(GatewayError::Transport(e));
            }
        };

        let status = response.status();
        tracing::debug!("{} {} -> {}", method, display_path, status);

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) if status.is_success() => {
                return Err(GatewayError::Decode(format!("unreadable body: {}", e)));
            }
            Err(e) => {
                tracing::debug!("{} {} body unreadable: {}", method, display_path, e);
                Default::default()
            }
        };

        self.intercept_response(status, &bytes)
    }

    /// Outgoing interceptor: attach the stored credential, if any.
    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, GatewayError> {
        let Some(credential) = self.inner.credentials.load() else {
            return Ok(builder);
        };

        let header = credential.authorization_value();
        let mut value = HeaderValue::from_str(&header)
            .map_err(|_| GatewayError::invalid_request("credential is not a valid header value"))?;
        value.set_sensitive(true);
        Ok(builder.header(AUTHORIZATION, value))
    }

    /// Incoming interceptor.
    fn intercept_response(
        &self,
        status: StatusCode,
        bytes: &[u8],
    ) -> Result<Envelope, GatewayError> {
        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Err(GatewayError::Unauthorized {
                body: Envelope::from_error_body(bytes),
            });
        }

        if !status.is_success() {
            return Err(GatewayError::Server {
                status,
                body: Envelope::from_error_body(bytes),
            });
        }

        Envelope::from_slice(bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    fn expire_session(&self) {
        tracing::warn!("backend answered 401; clearing stored credential");
        if let Err(e) = self.inner.credentials.clear() {
            tracing::error!("failed to clear stored credential: {}", e);
        }
        self.inner
            .on_session_expired
            .session_expired(&self.inner.login_path);
    }
}

/// Builder for [`RequestGateway`].
pub struct GatewayBuilder {
    config: GatewayConfig,
    credentials: Option<Arc<dyn CredentialStore>>,
    on_session_expired: Option<Arc<dyn SessionExpiredHandler>>,
}

impl GatewayBuilder {
    fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            credentials: None,
            on_session_expired: None,
        }
    }

    /// Where the bearer credential is read from and written to.
    pub fn credentials(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Called with the login path after a 401 cleared the credential.
    pub fn on_session_expired(mut self, handler: impl SessionExpiredHandler + 'static) -> Self {
        self.on_session_expired = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> Result<RequestGateway, GatewayError> {
        let origin = self.config.origin_url()?;
        let api_base = self.config.api_base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;

        tracing::debug!("request gateway configured for {}", api_base);

        Ok(RequestGateway {
            inner: Arc::new(GatewayInner {
                http,
                origin,
                api_base,
                login_path: self.config.login_path,
                credentials: self
                    .credentials
                    .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new())),
                on_session_expired: self
                    .on_session_expired
                    .unwrap_or_else(|| Arc::new(LogOnlySessionHandler)),
            }),
        })
    }
}
