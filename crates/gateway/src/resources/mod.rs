//! Resource operation groups.
//!
//! Each group borrows the gateway and maps its operations 1:1 onto a backend
//! endpoint and verb. Payloads are plain serializable records; results are
//! the server's envelopes, unmodified.

pub mod auth;
pub mod events;
pub mod health;
pub mod office_heads;
pub mod office_types;
pub mod offices;
pub mod requirements;
pub mod users;

pub use auth::AuthApi;
pub use events::EventsApi;
pub use health::HealthApi;
pub use office_heads::OfficeHeadsApi;
pub use office_types::OfficeTypesApi;
pub use offices::OfficesApi;
pub use requirements::RequirementsApi;
pub use users::UsersApi;
