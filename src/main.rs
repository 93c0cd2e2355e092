//! Crepaway link resolver
//!
//! Runs the resolver against an in-memory session and navigation tree. The
//! first argument is treated as the launch link and the rest as live links;
//! with no arguments, links are read from stdin one per line (URLs, or
//! notification payloads as JSON objects). The resulting session and
//! navigation history are printed as JSON once the input is exhausted.

use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crepaway_core::{
    config::AppConfig,
    traits::{LaunchLink, NavigationContainer, SessionStore},
    types::{InboundLink, SessionSnapshot},
};
use crepaway_linking::{LinkResolver, LinkSubscriber};
use crepaway_store::{InMemoryNavigationContainer, InMemorySessionStore};
use crepaway_telemetry::TracingEventEmitter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize tracing
    crepaway_telemetry::configure_tracing(&config.telemetry)?;
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Failed to load configuration, using defaults");
    }

    tracing::info!("Starting crepaway-linking v{}", env!("CARGO_PKG_VERSION"));

    let metrics_handle = if config.telemetry.metrics_enabled {
        Some(crepaway_telemetry::setup_metrics_recorder()?)
    } else {
        None
    };

    // =========================================================================
    // Collaborators
    // =========================================================================
    let session = Arc::new(match std::env::var("CREPAWAY_SESSION") {
        Ok(raw) => {
            tracing::info!("Rehydrating session from CREPAWAY_SESSION");
            InMemorySessionStore::from_json(&raw)?
        }
        Err(_) => InMemorySessionStore::new(SessionSnapshot::logged_in()),
    });
    let container = Arc::new(InMemoryNavigationContainer::new(
        session.clone() as Arc<dyn SessionStore>
    ));

    let settle_delay = Duration::from_millis(config.linking.settle_delay_ms);
    let resolver = LinkResolver::builder(
        session.clone() as Arc<dyn SessionStore>,
        container.clone() as Arc<dyn NavigationContainer>,
    )
    .with_config(config.linking.clone())
    .with_event_emitter(Arc::new(TracingEventEmitter::new()))
    .build()?;

    // =========================================================================
    // Feed links
    // =========================================================================
    let mut args = std::env::args().skip(1);
    let launch = args.next().map(|raw| InboundLink::from_line(&raw)).transpose()?;
    let live: Vec<String> = args.collect();
    let read_stdin = launch.is_none();

    let (tx, rx) = mpsc::channel(32);
    let subscriber =
        LinkSubscriber::new(resolver.clone()).spawn(Arc::new(LaunchLink::new(launch)), rx);

    for raw in live {
        tx.send(InboundLink::from_line(&raw)?).await?;
    }

    if read_stdin {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match InboundLink::from_line(&line) {
                Ok(link) => tx.send(link).await?,
                Err(e) => tracing::warn!(error = %e, "Skipping malformed input line"),
            }
        }
    }
    drop(tx);

    let accepted = subscriber.await?;

    // Let a pending intent settle and replay
    while resolver.pending().is_some() {
        tokio::time::sleep(settle_delay).await;
    }

    let report = serde_json::json!({
        "accepted": accepted,
        "session": session.state(),
        "history": container.history(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(handle) = metrics_handle {
        println!("{}", handle.render());
    }

    Ok(())
}
