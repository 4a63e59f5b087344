//! Cancelable fixed-interval ticker.
//!
//! `Ticker::start` spawns one worker thread that calls `on_tick` every
//! `interval`. Cancellation and tick execution share one gate: a tick
//! runs while holding it, and `cancel` sets the flag under it. Once
//! `cancel` returns, no tick is running and none will ever run again.

use std::{
    sync::{Arc, Condvar, Mutex, PoisonError},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

struct Gate {
    cancelled: Mutex<bool>,
    wake:      Condvar,
}

pub struct Ticker;

impl Ticker {
    /// Start ticking. The first tick fires one full interval from now.
    pub fn start<F>(interval: Duration, mut on_tick: F) -> TickerHandle
    where
        F: FnMut() + Send + 'static,
    {
        let gate = Arc::new(Gate {
            cancelled: Mutex::new(false),
            wake:      Condvar::new(),
        });
        let worker_gate = Arc::clone(&gate);

        let worker = thread::spawn(move || {
            let gate = worker_gate;
            let mut next = Instant::now() + interval;
            let mut cancelled = gate.cancelled.lock().unwrap_or_else(PoisonError::into_inner);
            loop {
                let wait = next.saturating_duration_since(Instant::now());
                let (guard, _) = gate
                    .wake
                    .wait_timeout_while(cancelled, wait, |c| !*c)
                    .unwrap_or_else(PoisonError::into_inner);
                cancelled = guard;
                if *cancelled {
                    break;
                }
                if Instant::now() < next {
                    // Spurious early wake.
                    continue;
                }
                on_tick();
                next += interval;
                // Fell behind (slow tick or suspended host): skip, don't burst.
                let now = Instant::now();
                if next < now {
                    next = now + interval;
                }
            }
            log::debug!("ticker worker stopped");
        });

        log::info!("ticker started: interval={interval:?}");
        TickerHandle { gate, worker: Some(worker) }
    }
}

/// Owner of a running ticker. Dropping it cancels.
pub struct TickerHandle {
    gate:   Arc<Gate>,
    worker: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Stop ticking. Blocks until an in-flight tick finishes.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        {
            let mut cancelled = self
                .gate
                .cancelled
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *cancelled = true;
        }
        self.gate.wake.notify_all();
        if worker.join().is_err() {
            log::warn!("ticker worker panicked");
        }
        log::info!("ticker cancelled");
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn fires_repeatedly_then_stops_on_cancel() {
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let handle = Ticker::start(Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let deadline = Instant::now() + Duration::from_secs(5);
        while count.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }
        handle.cancel();

        let at_cancel = count.load(Ordering::SeqCst);
        assert!(at_cancel >= 3, "expected at least 3 ticks, got {at_cancel}");
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), at_cancel, "tick fired after cancel");
    }

    #[test]
    fn cancel_before_first_interval_never_ticks() {
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let handle = Ticker::start(Duration::from_secs(60), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        handle.cancel();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
