//! Core types, traits, and error definitions for the Crepaway link resolver.
//!
//! This crate provides the foundational building blocks shared by the
//! resolver, the in-memory collaborators, and the telemetry layer.

pub mod config;
pub mod error;
pub mod events;
pub mod mocks;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use events::*;
pub use traits::*;
pub use types::*;
