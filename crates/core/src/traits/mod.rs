//! Collaborator traits for the link resolver.
//!
//! The resolver owns none of the state it routes against. Traits are
//! organized by collaborator:
//! - `state_store`: client session store (login, active flow, cart)
//! - `navigation`: navigation container (readiness, top route, dispatch)
//! - `link_source`: cold-start link provider
//! - `events`: structured event emission

pub mod events;
pub mod link_source;
pub mod navigation;
pub mod state_store;

pub use events::*;
pub use link_source::*;
pub use navigation::*;
pub use state_store::*;
