//! Per-user command cooldown using governor's keyed GCRA limiter.

use governor::clock::{Clock, DefaultClock};
use governor::middleware::NoOpMiddleware;
use governor::state::keyed::DashMapStateStore;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::{debug, instrument};

/// Idle users are pruned once the limiter tracks more than this many.
const PRUNE_THRESHOLD: usize = 1024;

/// Longest accepted cooldown window.
const MAX_WINDOW: Duration = Duration::from_secs(365 * 24 * 60 * 60);

type KeyedLimiter<C> =
    RateLimiter<i64, DashMapStateStore<i64>, C, NoOpMiddleware<<C as Clock>::Instant>>;

/// Limits how often each user may run a command.
///
/// A user gets `uses` invocations per `per` window, replenished one at a time.
/// A zero `uses` or zero window disables the cooldown.
pub struct Cooldown<C: Clock = DefaultClock> {
    limiter: Option<KeyedLimiter<C>>,
}

impl Cooldown {
    /// Create a cooldown of `uses` invocations per `per`.
    pub fn new(uses: u32, per: Duration) -> Self {
        Self::with_clock(uses, per, DefaultClock::default())
    }
}

impl<C: Clock> Cooldown<C> {
    /// Create a cooldown driven by `clock`.
    pub fn with_clock(uses: u32, per: Duration, clock: C) -> Self {
        let limiter = NonZeroU32::new(uses).and_then(|burst| {
            let period = per.min(MAX_WINDOW) / burst.get();
            Quota::with_period(period)
                .map(|quota| RateLimiter::dashmap_with_clock(quota.allow_burst(burst), clock))
        });
        Self { limiter }
    }

    /// Whether every check passes.
    pub fn is_disabled(&self) -> bool {
        self.limiter.is_none()
    }

    /// Consume one use for `user_id`, or return how long until one is available.
    #[instrument(skip(self))]
    pub fn check(&self, user_id: i64) -> Result<(), Duration> {
        let Some(limiter) = &self.limiter else {
            return Ok(());
        };

        let result = limiter.check_key(&user_id).map_err(|not_until| {
            let retry_after = not_until.wait_time_from(limiter.clock().now());
            debug!(retry_after_secs = retry_after.as_secs(), "Cooldown active");
            retry_after
        });

        if limiter.len() > PRUNE_THRESHOLD {
            limiter.retain_recent();
        }
        result
    }

    /// Number of users currently tracked.
    pub fn tracked_users(&self) -> usize {
        self.limiter.as_ref().map_or(0, |limiter| limiter.len())
    }
}
