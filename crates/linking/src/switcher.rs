//! Flow switcher.
//!
//! Moves the session into the flow an intent needs, parks the intent in the
//! pending slot, and replays it once the new flow container has had time to
//! mount.

use serde_json::json;
use std::sync::Arc;

use crepaway_core::{
    events::{EventType, NavigationEvent},
    types::{Intent, MenuType, OrderFlow, Screen},
    Result,
};

use crate::resolver::{LinkResolver, PendingIntent};

impl LinkResolver {
    /// Switch the session to `flow` and navigate to `screen` once the switch
    /// has settled.
    ///
    /// Dine-in-only screens always switch to dine-in. Any previously parked
    /// intent is overwritten. Returns `true` once the switch is under way,
    /// independent of how the replay turns out.
    pub fn switch_and_navigate(
        &self,
        flow: OrderFlow,
        menu_type: MenuType,
        screen: Screen,
        intent: &Intent,
    ) -> bool {
        self.switch_flow(flow, menu_type, screen, intent, 0)
    }

    pub(crate) fn switch_flow(
        &self,
        flow: OrderFlow,
        menu_type: MenuType,
        screen: Screen,
        intent: &Intent,
        attempt: u32,
    ) -> bool {
        let attempt = attempt + 1;
        if attempt > self.inner.max_settle_attempts {
            tracing::warn!(
                screen = %screen,
                flow = %flow,
                attempts = attempt - 1,
                "Flow never settled, abandoning pending intent"
            );
            self.emit(NavigationEvent::new(
                EventType::PendingAbandoned,
                json!({ "screen": screen, "flow": flow, "attempts": attempt - 1 }),
            ));
            return false;
        }

        let (flow, menu_type) = if screen.is_dine_in_only() {
            (OrderFlow::DineIn, MenuType::DineIn)
        } else {
            (flow, menu_type)
        };

        let parked = Intent {
            screen,
            order_flow: Some(flow),
            menu_type: Some(menu_type),
            target_id: intent.target_id,
        };

        // Nothing is written unless the replay can be scheduled.
        if let Err(e) = self.inner.pending.ensure_schedulable() {
            tracing::warn!(error = %e, flow = %flow, "Cannot schedule replay, skipping flow switch");
            self.inner.pending.clear();
            return self.reject(&parked, "scheduling failed");
        }

        if let Err(e) = self.apply_flow(flow, menu_type) {
            tracing::warn!(error = %e, flow = %flow, "Flow switch failed");
            self.inner.pending.clear();
            return self.reject(&parked, "session write failed");
        }

        let weak = Arc::downgrade(&self.inner);
        let scheduled = self.inner.pending.schedule(
            PendingIntent {
                intent: parked.clone(),
                attempt,
            },
            move |pending| {
                if let Some(inner) = weak.upgrade() {
                    LinkResolver { inner }.replay(pending);
                }
            },
        );

        match scheduled {
            Ok(Some(superseded)) => {
                tracing::debug!(
                    screen = %superseded.intent.screen,
                    "Pending intent superseded by newer flow switch"
                );
                self.emit(NavigationEvent::new(
                    EventType::PendingSuperseded,
                    json!({ "screen": superseded.intent.screen }),
                ));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Could not schedule pending intent");
                self.inner.pending.clear();
                return self.reject(&parked, "scheduling failed");
            }
        }

        tracing::info!(
            flow = %flow,
            menu_type = %menu_type,
            screen = %screen,
            attempt,
            delay_ms = self.inner.pending.delay().as_millis() as u64,
            "Switched order flow, intent pending"
        );
        self.emit(NavigationEvent::new(
            EventType::FlowSwitched,
            json!({ "flow": flow, "menu_type": menu_type, "screen": screen, "attempt": attempt }),
        ));
        true
    }

    /// Session writes for a flow switch.
    fn apply_flow(&self, flow: OrderFlow, menu_type: MenuType) -> Result<()> {
        let session = &self.inner.session;

        let snapshot = session.snapshot()?;
        if snapshot.cart_conflicts_with(flow) {
            tracing::info!(
                cart_flow = ?snapshot.cart_flow,
                flow = %flow,
                "Cart holds items from another flow"
            );
            self.emit(NavigationEvent::new(
                EventType::CartFlowConflict,
                json!({ "cart_flow": snapshot.cart_flow, "flow": flow }),
            ));
        }

        session.set_order_flow(flow, menu_type)?;
        session.set_cart_flow(flow)?;
        match flow {
            OrderFlow::Delivery => session.clear_selected_branch()?,
            OrderFlow::Takeaway => {
                session.clear_selected_branch()?;
                session.clear_selected_address()?;
            }
            OrderFlow::DineIn => {}
        }
        Ok(())
    }

    fn replay(&self, pending: PendingIntent) {
        tracing::debug!(
            screen = %pending.intent.screen,
            attempt = pending.attempt,
            "Replaying pending intent"
        );
        self.emit(
            NavigationEvent::new(
                EventType::PendingReplayed,
                json!({ "screen": pending.intent.screen, "attempt": pending.attempt }),
            )
            .with_source("replay"),
        );
        self.resolve(&pending.intent, pending.attempt);
    }
}
