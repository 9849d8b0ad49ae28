//! `auditdesk-core`: shared primitives for the audit dashboard client.
//!
//! This crate contains **pure** building blocks (no transport concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{RecordId, parse_id_list};
