//! Recurring message polling as a cancellable subscription.
//!
//! DESIGN
//! ======
//! A [`Scheduler`] arms a repeating timer and hands back a [`Subscription`].
//! Cancelling or dropping the subscription stops the timer, so ownership of
//! the subscription is ownership of the timer. [`Poller`] holds at most one
//! subscription and always cancels the current one before arming the next.
//!
//! In the browser the timer is a `gloo-timers` `Interval`; native builds get
//! an inert subscription that never ticks.

#[cfg(test)]
#[path = "poll_test.rs"]
mod poll_test;

use std::time::Duration;

/// Callback run on every tick.
pub type Tick = Box<dyn FnMut()>;

/// Handle to an armed timer. Dropping it cancels the timer.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to cancel.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Arms repeating timers.
pub trait Scheduler {
    /// Run `tick` every `period` until the returned subscription is cancelled.
    fn every(&self, period: Duration, tick: Tick) -> Subscription;
}

/// At most one active polling subscription.
#[derive(Debug, Default)]
pub struct Poller {
    active: Option<Subscription>,
}

impl Poller {
    /// Cancel the current subscription (if any), then arm a new one.
    pub fn start(&mut self, scheduler: &dyn Scheduler, period: Duration, tick: Tick) {
        self.stop();
        self.active = Some(scheduler.every(period, tick));
    }

    /// Cancel the current subscription. Returns `true` if one was active.
    pub fn stop(&mut self) -> bool {
        match self.active.take() {
            Some(subscription) => {
                subscription.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

/// Browser [`Scheduler`] backed by `setInterval`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalScheduler;

impl Scheduler for IntervalScheduler {
    fn every(&self, period: Duration, tick: Tick) -> Subscription {
        #[cfg(feature = "csr")]
        {
            let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
            let interval = gloo_timers::callback::Interval::new(millis, tick);
            Subscription::new(move || drop(interval))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (period, tick);
            Subscription::inert()
        }
    }
}
