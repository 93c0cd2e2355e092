//! In-memory session store.

use std::sync::{PoisonError, RwLock};

use crepaway_core::{
    traits::SessionStore,
    types::{MenuType, OrderFlow, SessionSnapshot},
    Result,
};

/// Session held in process memory.
///
/// This is the store the binary and scenario tests run against; the app's
/// real store rehydrates the same fields at startup.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    state: RwLock<SessionSnapshot>,
}

impl InMemorySessionStore {
    /// Create a store seeded with `state`.
    pub fn new(state: SessionSnapshot) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Seed from a JSON-encoded snapshot.
    pub fn from_json(raw: &str) -> Result<Self> {
        let state: SessionSnapshot = serde_json::from_str(raw)?;
        Ok(Self::new(state))
    }

    /// Current session, cloned.
    pub fn state(&self) -> SessionSnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_logged_in(&self, logged_in: bool) {
        self.update(|s| s.is_logged_in = logged_in);
    }

    /// Record what the cart holds.
    pub fn set_cart_items(&self, has_items: bool) {
        self.update(|s| s.cart_has_items = has_items);
    }

    fn update(&self, apply: impl FnOnce(&mut SessionSnapshot)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut state);
        tracing::trace!(session = ?*state, "Session updated");
    }
}

impl SessionStore for InMemorySessionStore {
    fn snapshot(&self) -> Result<SessionSnapshot> {
        Ok(self.state())
    }

    fn set_order_flow(&self, flow: OrderFlow, menu_type: MenuType) -> Result<()> {
        self.update(|s| {
            s.active_order_flow = Some(flow);
            s.menu_type = Some(menu_type);
        });
        Ok(())
    }

    fn clear_active_flow(&self) -> Result<()> {
        self.update(|s| {
            s.active_order_flow = None;
            s.menu_type = None;
        });
        Ok(())
    }

    fn set_cart_flow(&self, flow: OrderFlow) -> Result<()> {
        self.update(|s| s.cart_flow = Some(flow));
        Ok(())
    }

    fn clear_selected_branch(&self) -> Result<()> {
        self.update(|s| s.selected_branch = None);
        Ok(())
    }

    fn clear_selected_address(&self) -> Result<()> {
        self.update(|s| s.selected_address = None);
        Ok(())
    }
}
