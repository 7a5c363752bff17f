// src/limiter.rs
// =============================================================================
// This module paces requests against the dictionary site.
//
// Every worker must call acquire() before talking to the renderer. The
// limiter guarantees that any two grants — across ALL workers — are at least
// the configured interval apart. It is the only throttle on request rate;
// concurrency is bounded separately by the worker count.
//
// How it works:
// - A fair async mutex guards the instant of the last grant
// - tokio's Mutex queues waiters in FIFO order, so the lock's waiter queue
//   IS our admission queue: first caller in, first grant out, no starvation
// - The holder sleeps out whatever remains of the interval, records the new
//   grant time, and releases the lock to the next waiter
//
// Rust concepts:
// - tokio::sync::Mutex: An async mutex you can hold across .await
// - Instant/Duration: Monotonic time, immune to wall-clock jumps
// =============================================================================

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

// Serializes request admission so grants stay `interval` apart
pub struct RateLimiter {
    interval: Duration,
    // None until the first grant; holding the lock while we sleep is what
    // serializes the queue, so this must be the async (tokio) mutex
    last_grant: Mutex<Option<Instant>>,
}

impl RateLimiter {
    // Creates a limiter that spaces grants by at least `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_grant: Mutex::new(None),
        }
    }

    // Waits for permission to issue one renderer request
    //
    // Resolves once the caller is granted; the grant time is recorded so the
    // next caller (possibly another worker) waits out the remaining gap.
    pub async fn acquire(&self) {
        let mut last = self.last_grant.lock().await;

        if let Some(previous) = *last {
            let since_last = previous.elapsed();
            if since_last < self.interval {
                tokio::time::sleep(self.interval - since_last).await;
            }
        }

        // Record the grant AFTER any delay, then release the lock so the
        // next queued waiter starts its own countdown from this instant
        *last = Some(Instant::now());
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio's Mutex and not std's?
//    - We sleep while holding the lock, and sleeping is an .await point
//    - std's Mutex guard can't be held across .await (it isn't Send and it
//      would block the whole thread anyway)
//    - tokio's Mutex is built for exactly this: park the task, not the thread
//
// 2. Where did the queue go?
//    - tokio's Mutex wakes waiters in the order they arrived (it's "fair")
//    - So we get FIFO admission without maintaining our own ticket list
//
// 3. Why record the grant time after the sleep?
//    - The interval is measured grant-to-grant, not enqueue-to-enqueue
//    - Recording before the sleep would let two grants land closer together
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sequential_grants_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(30));
        let start = Instant::now();

        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;

        // Three grants = two full intervals between them
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn test_concurrent_grants_are_spaced() {
        use std::sync::Arc;

        let limiter = Arc::new(RateLimiter::new(Duration::from_millis(25)));
        let times = Arc::new(std::sync::Mutex::new(Vec::new()));

        let callers = (0..4).map(|_| {
            let limiter = Arc::clone(&limiter);
            let times = Arc::clone(&times);
            async move {
                limiter.acquire().await;
                times.lock().unwrap().push(Instant::now());
            }
        });
        futures::future::join_all(callers).await;

        let mut grants = times.lock().unwrap().clone();
        grants.sort();
        for pair in grants.windows(2) {
            // A little slack below the interval for timer coarseness
            assert!(pair[1].duration_since(pair[0]) >= Duration::from_millis(20));
        }
    }

    #[tokio::test]
    async fn test_first_grant_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(60));
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
