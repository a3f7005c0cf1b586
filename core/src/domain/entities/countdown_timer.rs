//! Countdown timer bounding the validity window of a sent code.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

const TICK: Duration = Duration::from_secs(1);

/// Format seconds as `mm:ss`; minutes are not capped at 59
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

// Whole seconds left before `deadline`, rounded up
fn remaining_at(deadline: Instant, now: Instant) -> u64 {
    let left = deadline.saturating_duration_since(now);
    left.as_secs() + u64::from(left.subsec_nanos() > 0)
}

#[derive(Debug, Default)]
struct TimerInner {
    deadline: Option<Instant>,
    ticker: Option<JoinHandle<()>>,
}

/// Counts down from a fixed total once started.
///
/// The remaining time is derived from a deadline on the Tokio clock, so it
/// drops by exactly one per elapsed second and never goes negative. A single
/// tick task publishes the value to [`CountdownTimer::subscribe`] receivers
/// once per second and exits at zero; `start`, `reset` and drop abort it.
#[derive(Debug)]
pub struct CountdownTimer {
    total_seconds: u64,
    inner: Mutex<TimerInner>,
    remaining_tx: Arc<watch::Sender<u64>>,
}

impl CountdownTimer {
    /// Create a stopped timer with the given total duration
    pub fn new(total_seconds: u64) -> Self {
        let (remaining_tx, _) = watch::channel(0);
        Self {
            total_seconds,
            inner: Mutex::new(TimerInner::default()),
            remaining_tx: Arc::new(remaining_tx),
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    /// Restart from the total duration.
    ///
    /// Ticks are published from a task on the current Tokio runtime. Outside
    /// one, the deadline still applies but subscribers only see the reset to
    /// the total.
    pub fn start(&self) {
        let started_at = Instant::now();
        let deadline = started_at + Duration::from_secs(self.total_seconds);

        let mut inner = self.lock();
        if let Some(ticker) = inner.ticker.take() {
            ticker.abort();
        }
        inner.deadline = Some(deadline);
        self.remaining_tx.send_replace(self.total_seconds);

        if self.total_seconds == 0 {
            return;
        }
        let Ok(runtime) = Handle::try_current() else {
            tracing::debug!(
                event = "timer_ticks_disabled",
                total_seconds = self.total_seconds,
                "No Tokio runtime, countdown ticks are not published"
            );
            return;
        };

        let remaining_tx = Arc::clone(&self.remaining_tx);
        inner.ticker = Some(runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(started_at + TICK, TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let remaining = remaining_at(deadline, Instant::now());
                remaining_tx.send_replace(remaining);
                if remaining == 0 {
                    break;
                }
            }
        }));
    }

    /// Stop ticking and drop the remaining time to zero
    pub fn reset(&self) {
        let mut inner = self.lock();
        if let Some(ticker) = inner.ticker.take() {
            ticker.abort();
        }
        inner.deadline = None;
        self.remaining_tx.send_replace(0);
    }

    pub fn remaining_seconds(&self) -> u64 {
        match self.lock().deadline {
            Some(deadline) => remaining_at(deadline, Instant::now()),
            None => 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.remaining_seconds() > 0
    }

    /// Remaining time as `mm:ss`
    pub fn formatted(&self) -> String {
        format_mm_ss(self.remaining_seconds())
    }

    /// Observe the remaining seconds as they tick
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.remaining_tx.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, TimerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        if let Some(ticker) = self.lock().ticker.take() {
            ticker.abort();
        }
    }
}
