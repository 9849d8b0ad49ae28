//! `auditdesk-console`: operator CLI over the request gateway.
//!
//! The console is the hosting application: it owns configuration, the
//! on-disk credential, and what "redirect to login" means in a terminal.

pub mod cli;
pub mod commands;

pub use cli::Cli;
pub use commands::run;
