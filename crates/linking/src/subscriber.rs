//! Link subscriber.
//!
//! Feeds the launch link and every live link into the resolver. Nothing is
//! retried: a link rejected because the user is logged out or the container
//! is not mounted is lost.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crepaway_core::{traits::LinkSource, types::InboundLink};

use crate::resolver::LinkResolver;

pub struct LinkSubscriber {
    resolver: LinkResolver,
}

impl LinkSubscriber {
    pub fn new(resolver: LinkResolver) -> Self {
        Self { resolver }
    }

    /// Resolve the launch link, then every link received until the channel
    /// closes. Returns how many links were accepted.
    pub async fn run(&self, source: &dyn LinkSource, mut links: mpsc::Receiver<InboundLink>) -> usize {
        let mut accepted = 0;

        match source.initial_link().await {
            Ok(Some(link)) => {
                tracing::debug!(source = link.source(), "Resolving launch link");
                if self.resolver.handle(&link) {
                    accepted += 1;
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to read launch link"),
        }

        while let Some(link) = links.recv().await {
            if self.resolver.handle(&link) {
                accepted += 1;
            } else {
                tracing::debug!(source = link.source(), "Inbound link not accepted");
            }
        }

        tracing::debug!(accepted, "Link channel closed");
        accepted
    }

    /// Run on a background task.
    pub fn spawn(
        self,
        source: Arc<dyn LinkSource>,
        links: mpsc::Receiver<InboundLink>,
    ) -> JoinHandle<usize> {
        tokio::spawn(async move { self.run(source.as_ref(), links).await })
    }
}
