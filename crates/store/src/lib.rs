//! In-memory collaborators for the link resolver.
//!
//! This crate provides the session store and navigation container the
//! binary runs against, standing in for the app's state store and mounted
//! navigation tree.

pub mod memory;
pub mod navigation;

pub use memory::InMemorySessionStore;
pub use navigation::InMemoryNavigationContainer;
