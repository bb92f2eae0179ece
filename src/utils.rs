use std::time::{Duration, Instant};

/// Logs the time spent in `l_step` since `prev` and returns the new elapsed mark.
pub(crate) fn trace(l_step: &str, detect: Instant, prev: Duration) -> Duration {
    let elapsed = detect.elapsed();
    log::trace!("TIME | Total={:.2?} | {}={:.2?}", elapsed, l_step, elapsed - prev);
    elapsed
}
