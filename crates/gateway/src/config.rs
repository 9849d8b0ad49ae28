//! Gateway configuration.
//!
//! Values come from the environment with fixed fallbacks; nothing here talks
//! to the network.

use std::path::Path;
use std::time::Duration;

use url::Url;

use auditdesk_auth::{CredentialStoreError, DEFAULT_CREDENTIAL_KEY, FileCredentialStore};

use crate::error::GatewayError;

pub const ENV_ORIGIN: &str = "AUDITDESK_API_ORIGIN";
pub const ENV_API_PREFIX: &str = "AUDITDESK_API_PREFIX";
pub const ENV_LOGIN_PATH: &str = "AUDITDESK_LOGIN_PATH";
pub const ENV_TIMEOUT_SECS: &str = "AUDITDESK_HTTP_TIMEOUT_SECS";
pub const ENV_CREDENTIAL_KEY: &str = "AUDITDESK_CREDENTIAL_KEY";

const DEFAULT_ORIGIN: &str = "http://localhost:5000";
const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the backend lives and how the gateway talks to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Origin serving both `<api_prefix>/*` and the root `/health` check.
    pub origin: String,
    /// Path prefix of the resource endpoints (`/api`).
    pub api_prefix: String,
    /// Login entry point handed to the session-expired callback.
    pub login_path: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Storage key of the persisted credential.
    ///
    /// The gateway itself only sees the store it is built with; hosts that
    /// persist the credential name their file store after this key through
    /// [`credential_store_in`](Self::credential_store_in) or
    /// [`default_credential_store`](Self::default_credential_store).
    pub credential_key: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
            credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Config pointing at `origin`, everything else default.
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Read `AUDITDESK_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout = match read(ENV_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        "{} must be a positive number of seconds (got {:?}); using {:?}",
                        ENV_TIMEOUT_SECS,
                        raw,
                        defaults.timeout
                    );
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        Self {
            origin: read(ENV_ORIGIN).unwrap_or(defaults.origin),
            api_prefix: read(ENV_API_PREFIX).unwrap_or(defaults.api_prefix),
            login_path: read(ENV_LOGIN_PATH).unwrap_or(defaults.login_path),
            timeout,
            credential_key: read(ENV_CREDENTIAL_KEY).unwrap_or(defaults.credential_key),
        }
    }

    /// Check that the origin is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), GatewayError> {
        self.origin_url().map(|_| ())
    }

    /// Parsed origin. Query and fragment are not allowed.
    pub fn origin_url(&self) -> Result<Url, GatewayError> {
        let url = Url::parse(&self.origin).map_err(|e| {
            GatewayError::Configuration(format!("invalid origin {:?}: {}", self.origin, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(GatewayError::Configuration(format!(
                "origin {:?} must use http or https",
                self.origin
            )));
        }
        if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
            return Err(GatewayError::Configuration(format!(
                "origin {:?} must be a plain base URL",
                self.origin
            )));
        }
        Ok(url)
    }

    /// File store for `credential_key` under `dir`.
    pub fn credential_store_in(&self, dir: impl AsRef<Path>) -> FileCredentialStore {
        FileCredentialStore::new(dir, &self.credential_key)
    }

    /// File store for `credential_key` in the platform data directory.
    pub fn default_credential_store(&self) -> Result<FileCredentialStore, CredentialStoreError> {
        FileCredentialStore::default_location(&self.credential_key)
    }

    /// `origin` + `api_prefix`, the base of every resource endpoint.
    pub fn api_base_url(&self) -> Result<Url, GatewayError> {
        let mut url = self.origin_url()?;
        append_path(&mut url, split_path(&self.api_prefix))?;
        Ok(url)
    }
}

/// Non-empty `/`-separated segments of a path.
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Append `segments` to `url`, percent-encoding each one.
pub(crate) fn append_path<S: AsRef<str>>(
    url: &mut Url,
    segments: impl IntoIterator<Item = S>,
) -> Result<(), GatewayError> {
    let mut path = url
        .path_segments_mut()
        .map_err(|_| GatewayError::Configuration("base URL cannot carry a path".to_string()))?;
    path.pop_if_empty();
    for segment in segments {
        path.push(segment.as_ref());
    }
    Ok(())
}
