use serde::{Deserialize, Serialize};

use auditdesk_core::{DomainError, DomainResult};

/// Opaque bearer token proving an authenticated session.
///
/// The token is never interpreted client-side. `Debug` is redacted so a
/// credential can sit inside logged structs without leaking.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token. Surrounding whitespace is dropped; blank tokens are rejected.
    pub fn new(token: impl Into<String>) -> DomainResult<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("credential token must not be empty"));
        }
        if trimmed.len() == token.len() {
            Ok(Self(token))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header carrying this credential.
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}
