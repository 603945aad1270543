//! Queue configuration
//!
//! Buffer bound and timing knobs for the toast pipeline. The stock values
//! are exposed as constants so callers and tests can reference them.

use std::time::Duration;

/// Default bound on the pending-request buffer
pub const DEFAULT_CAPACITY: usize = 5;

/// Default time an active toast stays displayed before auto-dismissal
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Default wait between dequeuing a request and displaying it
pub const DEFAULT_APPEAR_DELAY: Duration = Duration::from_millis(300);

/// Default cadence at which a progress toast accumulates progress
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for a [`ToastQueue`](crate::queue::ToastQueue)
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Maximum number of undelivered requests held while a toast is active
    ///
    /// When the buffer is full the oldest undelivered request is dropped to
    /// make room. A capacity of 0 is treated as 1.
    pub capacity: usize,
    /// How long an active toast stays displayed before auto-dismissal
    ///
    /// Also the total accumulation time for the progress strategy.
    pub dismiss_after: Duration,
    /// Wait between dequeuing a request and promoting it to active
    pub appear_delay: Duration,
    /// Interval between progress accumulation ticks
    ///
    /// A zero interval is treated as 1 ms.
    pub tick_interval: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            dismiss_after: DEFAULT_DISMISS_AFTER,
            appear_delay: DEFAULT_APPEAR_DELAY,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl QueueConfig {
    /// Create a configuration with the stock values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pending-buffer capacity
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the display duration before auto-dismissal
    pub fn dismiss_after(mut self, dismiss_after: Duration) -> Self {
        self.dismiss_after = dismiss_after;
        self
    }

    /// Set the wait before a dequeued request is displayed
    pub fn appear_delay(mut self, appear_delay: Duration) -> Self {
        self.appear_delay = appear_delay;
        self
    }

    /// Set the progress tick interval
    pub fn tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = QueueConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.dismiss_after, DEFAULT_DISMISS_AFTER);
        assert_eq!(config.appear_delay, DEFAULT_APPEAR_DELAY);
        assert_eq!(config.tick_interval, DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn test_builder_overrides() {
        let config = QueueConfig::new()
            .capacity(2)
            .dismiss_after(Duration::from_secs(2))
            .appear_delay(Duration::ZERO)
            .tick_interval(Duration::from_millis(50));
        assert_eq!(config.capacity, 2);
        assert_eq!(config.dismiss_after, Duration::from_secs(2));
        assert_eq!(config.appear_delay, Duration::ZERO);
        assert_eq!(config.tick_interval, Duration::from_millis(50));
    }
}
