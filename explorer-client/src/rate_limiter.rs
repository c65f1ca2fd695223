//! A FIFO dispatcher pacing outbound explorer requests
//!
//! One dispatcher task owns the queue and the time of the last dispatch, so
//! no lock is needed around either: callers enqueue through a channel and
//! suspend until dispatched, in strict FIFO order. The interval is measured
//! from the start of the previous dispatch, so a slow downstream response
//! never lowers the effective rate below the configured ceiling.

use std::time::Duration;

use tokio::{
    sync::{mpsc, oneshot},
    time::Instant,
};
use tracing::debug;

/// The number of milliseconds in one second
const MILLIS_PER_SECOND: u64 = 1000;

/// A shared dispatcher enforcing a minimum interval between call starts
#[derive(Clone)]
pub struct RateLimiter {
    /// The dispatcher's FIFO queue of waiting callers
    queue: mpsc::UnboundedSender<oneshot::Sender<()>>,
}

impl RateLimiter {
    /// Create a new limiter allowing the given number of calls per second,
    /// spawning its dispatcher task on the current runtime
    pub fn new(calls_per_second: u64) -> Self {
        let interval = Duration::from_millis(MILLIS_PER_SECOND / calls_per_second.max(1));
        let (queue, waiters) = mpsc::unbounded_channel();
        tokio::spawn(dispatch_loop(waiters, interval));

        Self { queue }
    }

    /// Enqueue and suspend until dispatched
    ///
    /// Never fails: a dropped dispatcher (runtime shutdown) releases the
    /// caller immediately, and failures of the subsequent request belong to
    /// the caller, not the limiter.
    pub async fn acquire(&self) {
        let (dispatched, wait) = oneshot::channel();
        if self.queue.send(dispatched).is_err() {
            return;
        }

        let _ = wait.await;
    }
}

/// The dispatcher loop: release waiters in FIFO order, one per interval
async fn dispatch_loop(
    mut waiters: mpsc::UnboundedReceiver<oneshot::Sender<()>>,
    interval: Duration,
) {
    let mut last_dispatch: Option<Instant> = None;
    while let Some(waiter) = waiters.recv().await {
        if let Some(last) = last_dispatch {
            let elapsed = last.elapsed();
            if elapsed < interval {
                tokio::time::sleep(interval - elapsed).await;
            }
        }

        // The interval is measured from the start of this dispatch, and the
        // slot is released unconditionally: a waiter that has since been
        // dropped (e.g. its request timed out) does not block the next one
        last_dispatch = Some(Instant::now());
        let _ = waiter.send(());
    }

    debug!("rate limiter dispatcher shutting down");
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_pacing_at_configured_rate() {
        // 5 calls per second, so dispatches start 200ms apart
        let limiter = RateLimiter::new(5);

        let start = Instant::now();
        let mut dispatch_times = Vec::new();
        for _ in 0..10 {
            limiter.acquire().await;
            dispatch_times.push(start.elapsed());
        }

        // Nine intervals separate the first and tenth dispatch
        let span = dispatch_times[9] - dispatch_times[0];
        assert!(span >= Duration::from_millis(1800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_dispatch_fifo() {
        let limiter = RateLimiter::new(5);
        let order = Arc::new(Mutex::new(Vec::new()));

        // The current-thread test runtime polls each spawned task at the
        // yield point, so the enqueue order matches the spawn order
        let mut handles = Vec::new();
        for i in 0..10u32 {
            let limiter = limiter.clone();
            let order = order.clone();
            handles.push(tokio::spawn(async move {
                limiter.acquire().await;
                order.lock().unwrap().push(i);
            }));
            tokio::task::yield_now().await;
        }

        for handle in handles {
            handle.await.unwrap();
        }

        let order = order.lock().unwrap();
        assert_eq!(*order, (0..10).collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_waiter_does_not_block_queue() {
        let limiter = RateLimiter::new(5);

        // Enqueue a waiter and drop it before it is dispatched
        {
            let limiter = limiter.clone();
            let handle = tokio::spawn(async move { limiter.acquire().await });
            tokio::task::yield_now().await;
            handle.abort();
        }

        // The next caller still gets dispatched
        tokio::time::timeout(Duration::from_secs(5), limiter.acquire())
            .await
            .expect("dispatcher stalled on dropped waiter");
    }
}
