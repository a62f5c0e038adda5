//! Retry schedule for failed endpoint requests.

use std::time::Duration;

use rand::Rng;

/// Delay before retry `attempt` (1-based).
///
/// Doubles from `base` per attempt, never exceeds `cap` before jitter, and adds
/// up to a tenth of the delay as jitter. Attempt 0 is the first request and
/// never waits.
pub fn retry_delay(attempt: u32, base: Duration, cap: Duration) -> Duration {
    let Some(exponent) = attempt.checked_sub(1) else {
        return Duration::ZERO;
    };

    let delay = base
        .checked_mul(2u32.saturating_pow(exponent.min(31)))
        .unwrap_or(cap)
        .min(cap);

    let spread = delay.as_millis() as u64 / 10;
    if spread == 0 {
        return delay;
    }
    delay + Duration::from_millis(rand::thread_rng().gen_range(0..spread))
}
