//! Cold-start link provider.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

use crate::error::Result;
use crate::types::InboundLink;

/// Supplies the link that launched the app, if any.
///
/// Live links arrive on a channel; this only covers the one the OS handed
/// over before the subscriber was listening.
#[async_trait]
pub trait LinkSource: Send + Sync {
    /// The launch link (deep-link URL or tapped notification).
    async fn initial_link(&self) -> Result<Option<InboundLink>>;
}

/// Launch link captured at startup, handed out once.
#[derive(Debug, Default)]
pub struct LaunchLink {
    link: Mutex<Option<InboundLink>>,
}

impl LaunchLink {
    pub fn new(link: Option<InboundLink>) -> Self {
        Self {
            link: Mutex::new(link),
        }
    }

    pub fn url(raw: &str) -> Self {
        Self::new(Some(InboundLink::Url(raw.to_string())))
    }
}

#[async_trait]
impl LinkSource for LaunchLink {
    async fn initial_link(&self) -> Result<Option<InboundLink>> {
        // The OS only delivers the launch link once.
        Ok(self.link.lock().unwrap_or_else(PoisonError::into_inner).take())
    }
}
