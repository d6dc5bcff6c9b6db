//! Host clock collaborator

/// Source of creation/update timestamps
///
/// Timestamps are UTC nanoseconds since the Unix epoch. The operation layer
/// calls this once per create and once per full-payload update.
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall-clock implementation backed by chrono
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        // timestamp_nanos_opt only fails past the year 2262
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(first > 0);
        assert!(second >= first);
    }
}
