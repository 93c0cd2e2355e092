//! Core type definitions for the link resolver.
//!
//! Broken down into submodules: order flows, canonical screens, intents,
//! session snapshots, navigation actions, and inbound links.

pub mod flow;
pub mod intent;
pub mod link;
pub mod navigation;
pub mod screen;
pub mod session;

pub use flow::*;
pub use intent::*;
pub use link::*;
pub use navigation::*;
pub use screen::*;
pub use session::*;
