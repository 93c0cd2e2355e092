//! Session store trait.
//!
//! The client session lives in an external key-value store that is shared
//! with the UI. The resolver only reads a snapshot and clears or sets a
//! handful of fields.

use crate::error::Result;
use crate::types::{MenuType, OrderFlow, SessionSnapshot};

/// Accessor for the client session.
///
/// Calls are synchronous: the store is mutated on the UI thread and every
/// read must reflect the state at the moment the resolver runs.
pub trait SessionStore: Send + Sync {
    /// Read the current session.
    fn snapshot(&self) -> Result<SessionSnapshot>;

    /// Check the login gate.
    fn is_logged_in(&self) -> Result<bool> {
        Ok(self.snapshot()?.is_logged_in)
    }

    /// Select the active flow and menu.
    fn set_order_flow(&self, flow: OrderFlow, menu_type: MenuType) -> Result<()>;

    /// Drop the active flow, sending the user back to flow selection.
    fn clear_active_flow(&self) -> Result<()>;

    /// Tag the cart with the flow it belongs to.
    fn set_cart_flow(&self, flow: OrderFlow) -> Result<()>;

    /// Forget the selected branch.
    fn clear_selected_branch(&self) -> Result<()>;

    /// Forget the selected delivery address.
    fn clear_selected_address(&self) -> Result<()>;
}
