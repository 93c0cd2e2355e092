//! Navigation container trait.

use crate::error::Result;
use crate::types::NavigationAction;

/// The mounted navigation tree.
pub trait NavigationContainer: Send + Sync {
    /// Whether the container is mounted and accepts dispatches.
    fn is_ready(&self) -> bool;

    /// Name of the focused top-level route, if any.
    fn current_route(&self) -> Option<String>;

    /// Apply a nested navigate or a stack replacement.
    fn dispatch(&self, action: NavigationAction) -> Result<()>;
}
