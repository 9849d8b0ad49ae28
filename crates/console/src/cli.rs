//! Command-line interface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Compliance-audit dashboard console
#[derive(Parser, Debug)]
#[command(name = "auditdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Backend origin (serves `/api/*` and `/health`)
    #[arg(long, env = "AUDITDESK_API_ORIGIN", global = true)]
    pub origin: Option<String>,

    /// Directory holding the stored session credential
    #[arg(long, env = "AUDITDESK_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "AUDITDESK_LOG_LEVEL", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the backend's /health endpoint
    Health,

    /// Sign in and store the session credential
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUDITDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and drop the stored credential
    Logout,

    #[command(subcommand)]
    Events(EventsCommand),

    #[command(subcommand)]
    Offices(OfficesCommand),

    #[command(subcommand)]
    OfficeTypes(ListOnly),

    #[command(subcommand)]
    OfficeHeads(OfficeHeadsCommand),

    #[command(subcommand)]
    Requirements(RequirementsCommand),

    #[command(subcommand)]
    Users(UsersCommand),
}

/// Comma separated record identifiers, e.g. `3,7`.
#[derive(Args, Debug)]
pub struct IdList {
    #[arg(required = true)]
    pub ids: String,
}

#[derive(Subcommand, Debug)]
pub enum ListOnly {
    List,
}

#[derive(Subcommand, Debug)]
pub enum EventsCommand {
    List,
    /// Delete several events in one request
    Delete(IdList),
}

#[derive(Subcommand, Debug)]
pub enum OfficesCommand {
    List,
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum OfficeHeadsCommand {
    List,
    Get {
        id: String,
    },
    /// Create an office head from `--field key=value` pairs and an optional photo
    Add {
        #[arg(long = "field", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    Delete(IdList),
}

#[derive(Subcommand, Debug)]
pub enum RequirementsCommand {
    List,
    ForEvent { event_id: String },
    Criteria {
        #[arg(long)]
        event: Option<String>,
    },
    Delete(IdList),
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List,
    Current { email: String },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    if key.trim().is_empty() {
        return Err("field name must not be empty".to_string());
    }
    Ok((key.trim().to_string(), value.to_string()))
}
