//! Single-slot debounce timer.

use std::future;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Sleep, sleep};

/// Holds at most one pending value and releases it once the input has been
/// quiet for `delay`.
///
/// Scheduling a new value replaces the pending one and restarts the timer,
/// so a superseded value is never released.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    slot: Option<(Pin<Box<Sleep>>, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, slot: None }
    }

    /// Schedule `value`, cancelling whatever was pending.
    pub fn schedule(&mut self, value: T) {
        self.slot = Some((Box::pin(sleep(self.delay)), value));
    }

    /// Cancel the pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.slot.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    /// Wait for the pending value to become due.
    ///
    /// Never resolves while nothing is scheduled. Cancel safe: dropping the
    /// future leaves the pending value in place.
    pub async fn fired(&mut self) -> T {
        loop {
            match self.slot.as_mut() {
                Some((timer, _)) => timer.as_mut().await,
                None => future::pending::<()>().await,
            }
            if let Some((_, value)) = self.slot.take() {
                return value;
            }
        }
    }
}
