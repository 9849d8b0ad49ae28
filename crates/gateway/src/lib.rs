//! `auditdesk-gateway`: the request gateway every dashboard view goes through.
//!
//! One configured HTTP client, two interceptors and a set of resource
//! operation groups:
//!
//! - **outgoing**: the stored credential (if any) is attached as
//!   `Authorization: Bearer <token>`;
//! - **incoming**: a 401 clears the stored credential and notifies the host
//!   through its [`SessionExpiredHandler`](auditdesk_auth::SessionExpiredHandler);
//!   every other failure is returned to the caller untouched.
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), auditdesk_gateway::GatewayError> {
//! use std::sync::Arc;
//! use auditdesk_auth::MemoryCredentialStore;
//! use auditdesk_core::RecordId;
//! use auditdesk_gateway::{GatewayConfig, RequestGateway};
//!
//! let gateway = RequestGateway::builder(GatewayConfig::from_env())
//!     .credentials(Arc::new(MemoryCredentialStore::new()))
//!     .on_session_expired(|login_path: &str| println!("redirect to {login_path}"))
//!     .build()?;
//!
//! let envelope = gateway
//!     .events()
//!     .delete_many(&[RecordId::new(10), RecordId::new(11)])
//!     .await?;
//! println!("{:?}", envelope.success());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod multipart;
pub mod request;
pub mod resources;

pub use client::{GatewayBuilder, RequestGateway};
pub use config::GatewayConfig;
pub use envelope::Envelope;
pub use error::{GatewayError, GatewayResult};
pub use multipart::{FilePart, MultipartPayload};
pub use request::{ApiRequest, RequestBody, Scope};
pub use resources::health::ConnectivityState;
