//! Exponential backoff with optional jitter.

use std::time::Duration;
use rand::Rng;

/// Calculate the delay before the `retry`-th retry (1-based).
///
/// `base_ms * 2^retry`, capped at `max_ms`, plus up to `jitter_ratio` of the
/// capped delay as random jitter.
pub fn calculate_backoff(retry: u32, base_ms: u64, max_ms: u64, jitter_ratio: f64) -> Duration {
    if retry == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(retry);
    let delay_ms = base_ms.saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(max_ms);

    let jitter_range = (capped_delay as f64 * jitter_ratio) as u64;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay + jitter)
}
