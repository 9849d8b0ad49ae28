//! `auditdesk-auth`: client-side session credential handling.
//!
//! No HTTP in here: this crate owns the bearer
//! credential, where it is persisted, and how the host application is told
//! that a session ended. The gateway crate consumes these as injected ports.

pub mod credential;
pub mod requests;
pub mod session;
pub mod store;

pub use credential::Credential;
pub use requests::{LoginRequest, RegisterRequest};
pub use session::{LogOnlySessionHandler, SessionExpiredHandler};
pub use store::{
    CredentialStore, CredentialStoreError, DEFAULT_CREDENTIAL_KEY, FileCredentialStore,
    MemoryCredentialStore,
};
