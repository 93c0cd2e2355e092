//! Single-slot deferred task.
//!
//! Holds at most one value and fires a one-shot callback with it after a
//! fixed delay. Scheduling again overwrites the value and cancels the earlier
//! timer, so only the most recent request is ever delivered.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crepaway_core::{Error, Result};

struct SlotState<T> {
    /// Bumped on every schedule; a timer only fires for its own generation.
    generation: u64,
    value: Option<T>,
    timer: Option<JoinHandle<()>>,
}

/// Cancellable-by-overwrite, fire-once callback slot.
pub struct DeferredSlot<T> {
    delay: Duration,
    state: Arc<Mutex<SlotState<T>>>,
}

impl<T: Send + 'static> DeferredSlot<T> {
    /// Create an empty slot that fires `delay` after each schedule.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: Arc::new(Mutex::new(SlotState {
                generation: 0,
                value: None,
                timer: None,
            })),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Park `value` and fire `on_fire(value)` after the delay unless the slot
    /// is overwritten or taken first.
    ///
    /// Returns the value that was overwritten, if any. Must be called from
    /// within a tokio runtime.
    pub fn schedule<F>(&self, value: T, on_fire: F) -> Result<Option<T>>
    where
        F: FnOnce(T) + Send + 'static,
    {
        let runtime = current_runtime()?;

        let mut state = lock(&self.state);
        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;
        let superseded = state.value.replace(value);
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }

        let slot = Arc::clone(&self.state);
        let delay = self.delay;
        state.timer = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            let value = {
                let mut state = lock(&slot);
                if state.generation != generation {
                    return;
                }
                state.timer = None;
                state.value.take()
            };

            // Taken or cleared while we slept.
            if let Some(value) = value {
                on_fire(value);
            }
        }));

        Ok(superseded)
    }

    /// Fails when called outside a tokio runtime, where `schedule` would
    /// fail too.
    pub fn ensure_schedulable(&self) -> Result<()> {
        current_runtime().map(|_| ())
    }

    /// Remove the parked value and cancel its timer.
    pub fn take(&self) -> Option<T> {
        let mut state = lock(&self.state);
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.value.take()
    }

    /// Drop the parked value without firing.
    pub fn clear(&self) {
        if self.take().is_some() {
            tracing::debug!("Cleared deferred value");
        }
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.state).value.is_some()
    }
}

impl<T: Clone + Send + 'static> DeferredSlot<T> {
    /// Copy of the parked value.
    pub fn peek(&self) -> Option<T> {
        lock(&self.state).value.clone()
    }
}

fn current_runtime() -> Result<Handle> {
    Handle::try_current()
        .map_err(|e| Error::scheduler(format!("no runtime for deferred task: {}", e)))
}

fn lock<T>(state: &Mutex<SlotState<T>>) -> MutexGuard<'_, SlotState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    fn recorder() -> (Arc<StdMutex<Vec<&'static str>>>, impl Fn() -> Vec<&'static str>) {
        let fired = Arc::new(StdMutex::new(Vec::new()));
        let view = Arc::clone(&fired);
        (fired, move || view.lock().unwrap().clone())
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_delay() {
        let slot = DeferredSlot::new(Duration::from_millis(150));
        let (fired, seen) = recorder();

        let sink = Arc::clone(&fired);
        let superseded = slot
            .schedule("a", move |v| sink.lock().unwrap().push(v))
            .unwrap();
        assert_eq!(superseded, None);
        assert!(slot.is_pending());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(seen().is_empty());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(seen(), vec!["a"]);
        assert!(!slot.is_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(seen(), vec!["a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_delivers_latest_only() {
        let slot = DeferredSlot::new(Duration::from_millis(150));
        let (fired, seen) = recorder();

        let sink = Arc::clone(&fired);
        slot.schedule("a", move |v| sink.lock().unwrap().push(v)).unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        let sink = Arc::clone(&fired);
        let superseded = slot
            .schedule("b", move |v| sink.lock().unwrap().push(v))
            .unwrap();
        assert_eq!(superseded, Some("a"));
        assert_eq!(slot.peek(), Some("b"));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(seen(), vec!["b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_take_cancels() {
        let slot = DeferredSlot::new(Duration::from_millis(150));
        let (fired, seen) = recorder();

        let sink = Arc::clone(&fired);
        slot.schedule("a", move |v| sink.lock().unwrap().push(v)).unwrap();
        assert_eq!(slot.take(), Some("a"));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(seen().is_empty());
        assert_eq!(slot.take(), None);

        let sink = Arc::clone(&fired);
        slot.schedule("b", move |v| sink.lock().unwrap().push(v)).unwrap();
        slot.clear();
        assert!(!slot.is_pending());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(seen().is_empty());
    }

    #[test]
    fn test_schedule_outside_runtime_fails() {
        let slot = DeferredSlot::new(Duration::from_millis(10));
        assert!(matches!(slot.ensure_schedulable(), Err(Error::Scheduler(_))));
        let err = slot.schedule(1u32, |_| {}).unwrap_err();
        assert!(matches!(err, Error::Scheduler(_)));
        assert!(!slot.is_pending());
    }
}
