use crate::events::NavigationEvent;

/// Trait for emitting structured events.
///
/// Emission is synchronous and must not fail; implementations that forward
/// events elsewhere should buffer or drop.
pub trait EventEmitter: Send + Sync {
    /// Emit an event.
    fn emit(&self, event: NavigationEvent);
}

/// No-op implementation for testing/default.
pub struct NoOpEventEmitter;

impl EventEmitter for NoOpEventEmitter {
    fn emit(&self, _event: NavigationEvent) {}
}
