//! The scheduling service used by `delay` and `Throttle`, with a real
//! implementation (`ThreadTimer`) and a simulated clock (`ManualTimer`).
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// A callback handed to a `Timer`
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// A `Timer` runs callbacks later. A callback never runs before `schedule`
/// returns, and never before `delay` has elapsed. Scheduled callbacks can't be
/// cancelled.
pub trait Timer: Send + Sync {
    /// Arranges for `callback` to run once `delay` has elapsed
    fn schedule(&self, delay: Duration, callback: Callback);
}

/// `ThreadTimer` sleeps on a fresh background thread for each callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadTimer;

impl Timer for ThreadTimer {
    fn schedule(&self, delay: Duration, callback: Callback) {
        let spawned = thread::Builder::new().name("underbar-timer".to_string()).spawn(move || {
            thread::sleep(delay);
            callback();
        });
        if let Err(e) = spawned {
            tracing::error!("can't start timer thread, dropping callback: {e}");
        }
    }
}

static DEFAULT_TIMER: Lazy<Arc<ThreadTimer>> = Lazy::new(|| Arc::new(ThreadTimer));

/// The process-wide timer used when no other timer is supplied
#[must_use]
pub fn default_timer() -> Arc<dyn Timer> {
    DEFAULT_TIMER.clone()
}

/// `ManualTimer` is a simulated clock: time stands still until `advance` is
/// called, and callbacks run on the thread calling `advance`.
#[derive(Default)]
pub struct ManualTimer {
    state: Mutex<Clock>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

struct Pending {
    due: Duration,
    id: u64,
    callback: Callback,
}

impl ManualTimer {
    /// Creates a clock at time zero with nothing scheduled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How much simulated time has passed
    #[must_use]
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// The number of callbacks that haven't run yet
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Moves the clock forward by `by`, running every callback that comes due,
    /// earliest first (ties in the order they were scheduled). A callback
    /// scheduled by another callback runs in the same `advance` if it comes
    /// due in time.
    pub fn advance(&self, by: Duration) {
        let target = self.state.lock().now.saturating_add(by);
        loop {
            // Pop under the lock, run without it: callbacks may schedule more
            let next = {
                let mut clock = self.state.lock();
                let earliest = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.id))
                    .map(|(index, _)| index);
                match earliest {
                    Some(index) => {
                        let pending = clock.pending.remove(index);
                        clock.now = clock.now.max(pending.due);
                        Some(pending.callback)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };
            match next {
                Some(callback) => callback(),
                None => return,
            }
        }
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay: Duration, callback: Callback) {
        let mut clock = self.state.lock();
        let due = clock.now.saturating_add(delay);
        let id = clock.next_id;
        clock.next_id += 1;
        clock.pending.push(Pending { due, id, callback });
    }
}
