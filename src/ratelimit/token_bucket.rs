use std::time::Instant;

use parking_lot::Mutex;

/// 令牌桶内部可变状态，只在锁内读写
#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// Continuous token bucket admission controller.
///
/// Capacity and refill rate both equal the configured requests-per-second
/// limit, so a full bucket absorbs one second of traffic at the full rate and
/// then throttles to that rate. Fractional tokens carry over between calls.
/// The bucket starts full.
///
/// Every check runs read-refill-decrement inside one critical section, so the
/// allow/deny sequence seen by concurrent callers is consistent with a single
/// total order of token updates.
#[derive(Debug)]
pub struct TokenBucket {
    capacity: f64,
    refill_rate: f64,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    /// Create a bucket for `rps` requests per second.
    ///
    /// A non-finite or negative limit is treated as 0, which denies every
    /// request.
    pub fn new(rps: f64) -> Self {
        let limit = if rps.is_finite() && rps > 0.0 { rps } else { 0.0 };
        Self {
            capacity: limit,
            refill_rate: limit,
            state: Mutex::new(BucketState {
                tokens: limit,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Try to take one token now.
    ///
    /// The clock is read while holding the lock, so refill timestamps never
    /// go backwards between concurrent callers.
    pub fn allow(&self) -> bool {
        let mut state = self.state.lock();
        let now = Instant::now();
        self.take(&mut state, now)
    }

    /// Try to take one token as of `now`.
    ///
    /// An instant at or before the last refill adds nothing and leaves the
    /// refill timestamp alone.
    pub fn allow_at(&self, now: Instant) -> bool {
        let mut state = self.state.lock();
        self.take(&mut state, now)
    }

    fn take(&self, state: &mut BucketState, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(state.last_refill);
        if !elapsed.is_zero() {
            let refill = elapsed.as_secs_f64() * self.refill_rate;
            state.tokens = (state.tokens + refill).min(self.capacity);
            state.last_refill = now;
        }

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn refill_rate(&self) -> f64 {
        self.refill_rate
    }

    /// Tokens as of the last check, without refilling.
    pub fn available_tokens(&self) -> f64 {
        self.state.lock().tokens
    }
}
