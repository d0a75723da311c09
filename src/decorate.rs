//! Function decorators. Each one wraps a function together with the private
//! state that changes how it's called:
//!
//! * `Once` calls its function the first time and replays that result forever,
//! * `Memoize` calls its function once per distinct argument list,
//! * `Throttle` calls its function at most once per cooldown window, and
//! * `delay` calls a function once, later.
//!
//! Functions of several arguments take them as a tuple: a `Memoize` over
//! `|(a, b): (i32, i32)| a + b` is called as `m.call((1, 2))`.
//!
//! The state lives behind locks or atomics, so a decorator can be shared
//! between threads whenever its function can.
use anyhow::{Context, Result};
use fxhash::FxHashMap;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::timer::{default_timer, Timer};

/// Wraps `func` so that only its first call does any work.
pub fn once<A, R, F: FnMut(A) -> R>(func: F) -> Once<A, R, F> {
    Once::new(func)
}

/// A function that runs only on its first call. Every call returns the first
/// call's result, whatever arguments it's given.
///
/// The wrapped function must not call the same `Once`: that call would wait
/// on the first one forever.
pub struct Once<A, R, F> {
    func: Mutex<F>,
    result: OnceCell<R>,
    _args: PhantomData<fn(A)>,
}

impl<A, R, F: FnMut(A) -> R> Once<A, R, F> {
    /// Wraps `func`; nothing is called until the first `call`
    pub fn new(func: F) -> Self {
        Once { func: Mutex::new(func), result: OnceCell::new(), _args: PhantomData }
    }

    /// Calls the wrapped function with `args` if this is the first call, and
    /// returns a clone of the first call's result.
    pub fn call(&self, args: A) -> R
    where
        R: Clone,
    {
        self.result
            .get_or_init(|| {
                tracing::debug!("running once-only function");
                let mut func = self.func.lock();
                (*func)(args)
            })
            .clone()
    }

    /// Has the wrapped function been called yet?
    pub fn called(&self) -> bool {
        self.result.get().is_some()
    }
}

/// Returns the memoization key for an argument list: its JSON encoding.
/// Equal argument lists always encode the same way, and lists differing in
/// any element, or in order, encode differently.
pub fn cache_key<A: Serialize + ?Sized>(args: &A) -> Result<String> {
    serde_json::to_string(args).context("can't encode arguments as a cache key")
}

/// Wraps `func` so that it's called once per distinct argument list.
pub fn memoize<A, R, F: FnMut(A) -> R>(func: F) -> Memoize<A, R, F> {
    Memoize::new(func)
}

/// A function that remembers its result for every argument list it has
/// seen. The cache is never pruned.
///
/// Cache hits don't wait for a call in progress. Misses run one at a time,
/// so the wrapped function must not call the same `Memoize`; that call would
/// deadlock.
pub struct Memoize<A, R, F> {
    func: Mutex<F>,
    cache: Mutex<FxHashMap<String, R>>,
    _args: PhantomData<fn(A)>,
}

impl<A, R, F: FnMut(A) -> R> Memoize<A, R, F> {
    /// Wraps `func` with an empty cache
    pub fn new(func: F) -> Self {
        Memoize { func: Mutex::new(func), cache: Mutex::new(FxHashMap::default()), _args: PhantomData }
    }

    /// Returns the cached result for `args`, calling the wrapped function
    /// first if these arguments haven't been seen. Fails only if `args`
    /// can't be encoded as a cache key.
    pub fn call(&self, args: A) -> Result<R>
    where
        A: Serialize,
        R: Clone,
    {
        let key = cache_key(&args)?;
        if let Some(result) = self.cached(&key) {
            tracing::trace!(%key, "memoize hit");
            return Ok(result);
        }
        let mut func = self.func.lock();
        // Another caller may have filled this key while we waited
        if let Some(result) = self.cached(&key) {
            return Ok(result);
        }
        tracing::trace!(%key, "memoize miss");
        let result = (*func)(args);
        self.cache.lock().insert(key, result.clone());
        Ok(result)
    }

    fn cached(&self, key: &str) -> Option<R>
    where
        R: Clone,
    {
        self.cache.lock().get(key).cloned()
    }

    /// The number of distinct argument lists cached so far
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Is the cache empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Calls `func(args)` once `wait` has elapsed, using the default timer. Doesn't
/// block; the eventual result is discarded.
pub fn delay<A, R>(func: impl FnOnce(A) -> R + Send + 'static, wait: Duration, args: A)
where
    A: Send + 'static,
{
    delay_with(default_timer().as_ref(), func, wait, args);
}

/// Like `delay`, but schedules the call on `timer`.
pub fn delay_with<A, R>(
    timer: &dyn Timer,
    func: impl FnOnce(A) -> R + Send + 'static,
    wait: Duration,
    args: A,
) where
    A: Send + 'static,
{
    timer.schedule(
        wait,
        Box::new(move || {
            let _ = func(args);
        }),
    );
}

/// Wraps `func` so that it runs at most once per `wait`, using the default
/// timer to end each cooldown.
pub fn throttle<A, R, F: FnMut(A) -> R>(func: F, wait: Duration) -> Throttle<A, R, F> {
    Throttle::with_timer(func, wait, default_timer())
}

/// A function that, once called, ignores further calls until a cooldown of
/// `wait` has passed. Calls during the cooldown are dropped, not queued.
pub struct Throttle<A, R, F> {
    func: Mutex<F>,
    wait: Duration,
    cooling: Arc<AtomicBool>,
    timer: Arc<dyn Timer>,
    _call: PhantomData<fn(A) -> R>,
}

impl<A, R, F: FnMut(A) -> R> Throttle<A, R, F> {
    /// Wraps `func`, with cooldowns of `wait` measured by `timer`
    pub fn with_timer(func: F, wait: Duration, timer: Arc<dyn Timer>) -> Self {
        Throttle {
            func: Mutex::new(func),
            wait,
            cooling: Arc::new(AtomicBool::new(false)),
            timer,
            _call: PhantomData,
        }
    }

    /// Calls the wrapped function and starts a cooldown, unless a cooldown is
    /// already running. Returns `Some(result)` if the function ran and `None`
    /// if the call was dropped.
    pub fn call(&self, args: A) -> Option<R> {
        if self.cooling.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err() {
            tracing::trace!("throttled call dropped");
            return None;
        }
        // The reset is scheduled first so a panicking function can't leave the
        // gate closed for good
        let cooling = Arc::clone(&self.cooling);
        self.timer.schedule(
            self.wait,
            Box::new(move || {
                tracing::debug!("throttle cooldown over");
                cooling.store(false, Ordering::Release);
            }),
        );
        let mut func = self.func.lock();
        Some((*func)(args))
    }

    /// Is a cooldown running, so that a call now would be dropped?
    pub fn cooling_down(&self) -> bool {
        self.cooling.load(Ordering::Acquire)
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use crate::timer::ManualTimer;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;
    use std::thread;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn once_calls_through_exactly_once() {
        let mut calls = 0;
        let first = once(|n: i32| {
            calls += 1;
            n * 2
        });
        assert!(!first.called());
        assert_eq!(first.call(1), 2);
        assert_eq!(first.call(5), 2);
        assert_eq!(first.call(9), 2);
        assert!(first.called());
        drop(first);
        assert_eq!(calls, 1);
    }

    #[test]
    fn once_runs_once_across_threads() {
        let calls = AtomicUsize::new(0);
        let first = once(|()| calls.fetch_add(1, Ordering::SeqCst));
        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| assert_eq!(first.call(()), 0));
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn separate_decorators_have_separate_state() {
        let a = once(|n: i32| n);
        let b = once(|n: i32| n);
        assert_eq!(a.call(1), 1);
        assert_eq!(b.call(2), 2);
    }

    #[test]
    fn cache_keys_are_order_sensitive() {
        assert_eq!(cache_key(&(1, "a")).unwrap(), cache_key(&(1, "a")).unwrap());
        assert_ne!(cache_key(&(1, 2)).unwrap(), cache_key(&(2, 1)).unwrap());
        assert_ne!(cache_key(&("1",)).unwrap(), cache_key(&(1,)).unwrap());
    }

    #[test]
    fn memoize_calls_once_per_argument_list() {
        let mut calls = Vec::new();
        let add = memoize(|(a, b): (i32, i32)| {
            calls.push((a, b));
            a + b
        });
        assert_eq!(add.call((1, 2)).unwrap(), 3);
        assert_eq!(add.call((1, 2)).unwrap(), 3);
        assert_eq!(add.call((2, 1)).unwrap(), 3);
        assert_eq!(add.len(), 2);
        drop(add);
        assert_eq!(calls, [(1, 2), (2, 1)]);
    }

    #[test]
    fn memoize_caches_falsy_results_too() {
        let calls = AtomicUsize::new(0);
        let zero = memoize(|_: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            0
        });
        assert!(zero.is_empty());
        assert_eq!(zero.call("x").unwrap(), 0);
        assert_eq!(zero.call("x").unwrap(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn memoize_serves_hits_while_a_miss_is_running() {
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let double = memoize(move |n: u32| {
            if n == 0 {
                started_tx.send(()).unwrap();
                release_rx.recv().unwrap();
            }
            n * 2
        });
        assert_eq!(double.call(5).unwrap(), 10);
        thread::scope(|scope| {
            let slow = scope.spawn(|| double.call(0).unwrap());
            started_rx.recv().unwrap();
            assert_eq!(double.call(5).unwrap(), 10);
            release_tx.send(()).unwrap();
            assert_eq!(slow.join().unwrap(), 0);
        });
        assert_eq!(double.len(), 2);
    }

    #[test]
    fn memoize_runs_once_per_key_across_threads() {
        let calls = AtomicUsize::new(0);
        let square = memoize(|n: u64| {
            calls.fetch_add(1, Ordering::SeqCst);
            n * n
        });
        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| assert_eq!(square.call(7).unwrap(), 49));
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn delay_runs_the_function_after_the_wait() {
        let timer = ManualTimer::new();
        let (tx, rx) = mpsc::channel();
        delay_with(&timer, move |(a, b): (i32, i32)| tx.send(a * b), ms(50), (6, 7));
        assert!(rx.try_recv().is_err());
        timer.advance(ms(49));
        assert!(rx.try_recv().is_err());
        timer.advance(ms(1));
        assert_eq!(rx.try_recv(), Ok(42));
    }

    #[test]
    fn delay_on_the_default_timer_doesnt_block() {
        let (tx, rx) = mpsc::channel();
        delay(move |word: &'static str| tx.send(word), ms(1), "later");
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok("later"));
    }

    #[test]
    fn throttle_drops_calls_during_the_cooldown() {
        let timer = Arc::new(ManualTimer::new());
        let calls = AtomicUsize::new(0);
        let throttled = Throttle::with_timer(
            |n: i32| {
                calls.fetch_add(1, Ordering::SeqCst);
                n
            },
            ms(100),
            timer.clone(),
        );
        assert_eq!(throttled.call(1), Some(1));
        for n in 2..=5 {
            assert_eq!(throttled.call(n), None);
        }
        assert!(throttled.cooling_down());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        timer.advance(ms(99));
        assert_eq!(throttled.call(6), None);
        timer.advance(ms(1));
        assert!(!throttled.cooling_down());
        assert_eq!(throttled.call(7), Some(7));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn throttle_with_an_endless_cooldown_stays_closed() {
        let timer = Arc::new(ManualTimer::new());
        let throttled = Throttle::with_timer(|n: i32| n, Duration::MAX, timer.clone());
        timer.advance(ms(1));
        assert_eq!(throttled.call(1), Some(1));
        timer.advance(ms(1));
        assert_eq!(throttled.call(2), None);
        assert!(throttled.cooling_down());
    }

    #[test]
    fn throttle_admits_one_caller_per_window_across_threads() {
        let timer = Arc::new(ManualTimer::new());
        let calls = AtomicUsize::new(0);
        let throttled = Throttle::with_timer(|()| calls.fetch_add(1, Ordering::SeqCst), ms(10), timer.clone());
        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| throttled.call(()));
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
