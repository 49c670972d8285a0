mod cli;
mod setup;
mod shell;

use std::process::ExitCode;
use std::sync::Arc;

use parley_client::{AuthClient, Conversation, HttpBackend, SearchMode, SessionStore};
use parley_common::{Event, EventBus, ParleyError};
use parley_config::ParleyConfig;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Config is read before logging is up; its problems are logged below.
    let env_base_url = parley_config::base_url_from_env();
    let (config, warnings) = setup::resolve_config(
        parley_config::load_config(args.config.as_deref()),
        env_base_url.as_deref(),
        args.base_url.as_deref(),
    );

    let directive = setup::log_directive(args.log_level.as_deref(), &config);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "parley=info".parse().unwrap()),
            ),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Parley v{} starting...", env!("CARGO_PKG_VERSION"));
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    tracing::info!(base_url = %config.server.base_url, "Config loaded");

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: ParleyConfig) -> Result<(), ParleyError> {
    let backend = HttpBackend::new(setup::http_config(&config))
        .map_err(|e| ParleyError::Client(e.to_string()))?;
    let backend = Arc::new(backend);

    let events = Arc::new(EventBus::default());
    tokio::spawn(log_events(events.subscribe()));

    let session = SessionStore::new();
    let auth = AuthClient::new(backend.clone(), session.clone()).with_event_bus(events.clone());
    let mut conversation = Conversation::new(backend)
        .with_session(session)
        .with_attach_token(config.chat.attach_token)
        .with_mode(setup::search_mode(config.chat.mode))
        .with_event_bus(events.clone());
    tracing::debug!(conversation = %conversation.id(), "conversation opened");

    match args.command.unwrap_or(Command::Chat) {
        Command::Chat => shell::run(&auth, &mut conversation).await?,
        Command::Ask { text, global } => {
            if global {
                conversation.set_mode(SearchMode::Global);
            }
            match conversation.submit(text.join(" ")).await {
                Some(reply) => println!("{}", reply.text),
                None => return Err(ParleyError::Other("question is empty".into())),
            }
        }
    }

    events.publish(Event::Shutdown);
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Mirror client events into the debug log.
async fn log_events(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(Event::Shutdown) | Err(broadcast::error::RecvError::Closed) => break,
            Ok(event) => tracing::debug!(?event, "client event"),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::debug!(skipped = n, "event log lagged");
            }
        }
    }
}
