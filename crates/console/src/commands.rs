//! Subcommand execution.

use std::sync::Arc;

use anyhow::{Context, Result};

use auditdesk_auth::LoginRequest;
use auditdesk_core::{RecordId, parse_id_list};
use auditdesk_gateway::{
    ConnectivityState, Envelope, GatewayConfig, GatewayError, MultipartPayload, RequestGateway,
};

use crate::cli::{
    Cli, Command, EventsCommand, ListOnly, OfficeHeadsCommand, OfficesCommand,
    RequirementsCommand, UsersCommand,
};

/// Build the gateway from CLI flags and environment.
pub fn build_gateway(cli: &Cli) -> Result<RequestGateway> {
    let mut config = GatewayConfig::from_env();
    if let Some(origin) = &cli.origin {
        config.origin = origin.clone();
    }
    config.validate()?;

    let store = match &cli.state_dir {
        Some(dir) => config.credential_store_in(dir),
        None => config
            .default_credential_store()
            .context("no state directory available; pass --state-dir")?,
    };
    tracing::debug!("credential file: {:?}", store.path());

    let gateway = RequestGateway::builder(config)
        .credentials(Arc::new(store))
        .on_session_expired(|login_path: &str| {
            eprintln!(
                "Session expired. Sign in again (`auditdesk login`); \
                 dashboard entry point: {login_path}"
            );
        })
        .build()?;
    Ok(gateway)
}

/// Run one subcommand, printing the envelope as pretty JSON.
pub async fn run(cli: Cli) -> Result<()> {
    let gateway = build_gateway(&cli)?;

    let envelope = match dispatch(&gateway, cli.command).await {
        Ok(Some(envelope)) => envelope,
        Ok(None) => return Ok(()),
        Err(e) => return Err(describe(e)),
    };

    println!("{}", serde_json::to_string_pretty(envelope.as_value())?);
    Ok(())
}

async fn dispatch(
    gateway: &RequestGateway,
    command: Command,
) -> Result<Option<Envelope>, GatewayError> {
    let envelope = match command {
        Command::Health => {
            let state = gateway.health().connectivity().await;
            println!(
                "backend is {}",
                match state {
                    ConnectivityState::Online => "online",
                    ConnectivityState::Offline => "offline",
                }
            );
            return Ok(None);
        }
        Command::Login { email, password } => {
            let request = LoginRequest::new(email, password);
            gateway.auth().login(&request).await?.ensure_success()?
        }
        Command::Logout => gateway.auth().logout().await?,

        Command::Events(EventsCommand::List) => gateway.events().list().await?,
        Command::Events(EventsCommand::Delete(list)) => {
            gateway.events().delete_many(&ids(&list.ids)?).await?
        }

        Command::Offices(OfficesCommand::List) => gateway.offices().list().await?,
        Command::Offices(OfficesCommand::Delete { id }) => {
            gateway.offices().delete(record_id(&id)?).await?
        }

        Command::OfficeTypes(ListOnly::List) => gateway.office_types().list().await?,

        Command::OfficeHeads(OfficeHeadsCommand::List) => gateway.office_heads().list().await?,
        Command::OfficeHeads(OfficeHeadsCommand::Get { id }) => {
            gateway.office_heads().get(record_id(&id)?).await?
        }
        Command::OfficeHeads(OfficeHeadsCommand::Add { fields, photo }) => {
            let mut form = fields
                .into_iter()
                .fold(MultipartPayload::new(), |form, (k, v)| form.text(k, v));
            if let Some(path) = photo {
                form = form.file_from_path("profilePicture", path).await?;
            }
            gateway.office_heads().create(form).await?
        }
        Command::OfficeHeads(OfficeHeadsCommand::Delete(list)) => {
            gateway.office_heads().delete_many(&ids(&list.ids)?).await?
        }

        Command::Requirements(RequirementsCommand::List) => gateway.requirements().list().await?,
        Command::Requirements(RequirementsCommand::ForEvent { event_id }) => {
            let event = record_id(&event_id)?;
            gateway.requirements().for_event(event).await?
        }
        Command::Requirements(RequirementsCommand::Criteria { event }) => {
            let event = event.as_deref().map(record_id).transpose()?;
            gateway.requirements().criteria(event).await?
        }
        Command::Requirements(RequirementsCommand::Delete(list)) => {
            gateway.requirements().delete_many(&ids(&list.ids)?).await?
        }

        Command::Users(UsersCommand::List) => gateway.users().list().await?,
        Command::Users(UsersCommand::Current { email }) => gateway.users().current(&email).await?,
    };
    Ok(Some(envelope))
}

fn record_id(raw: &str) -> Result<RecordId, GatewayError> {
    raw.parse::<RecordId>()
        .map_err(|e| GatewayError::invalid_request(e.to_string()))
}

fn ids(raw: &str) -> Result<Vec<RecordId>, GatewayError> {
    parse_id_list(raw).map_err(|e| GatewayError::invalid_request(e.to_string()))
}

/// Attach the user-facing message; the underlying error stays in the chain.
fn describe(err: GatewayError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}
