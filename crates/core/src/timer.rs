//! Fall timer - a cancellable repeating task on a cooperative clock
//!
//! The game loop feeds elapsed milliseconds in; the timer reports each period
//! that has come due. Nothing runs on another thread, so a tick always
//! finishes before the next one is considered.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallTimer {
    interval_ms: u32,
    elapsed_ms: u32,
    cancelled: bool,
}

impl FallTimer {
    /// Start a timer firing every `interval_ms` (at least 1ms).
    pub fn start(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            cancelled: false,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop the timer for good. Cancelling twice is a no-op.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.elapsed_ms = 0;
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.cancelled {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
    }

    /// Consume one due period. Returns false when nothing is due or the timer is cancelled.
    pub fn fire(&mut self) -> bool {
        if self.cancelled || self.elapsed_ms < self.interval_ms {
            return false;
        }
        self.elapsed_ms -= self.interval_ms;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let mut timer = FallTimer::start(100);
        timer.advance(99);
        assert!(!timer.fire());
        timer.advance(1);
        assert!(timer.fire());
        assert!(!timer.fire());
    }

    #[test]
    fn catches_up_on_long_frames() {
        let mut timer = FallTimer::start(100);
        timer.advance(250);
        assert!(timer.fire());
        assert!(timer.fire());
        assert!(!timer.fire());
        timer.advance(50);
        assert!(timer.fire());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = FallTimer::start(10);
        timer.advance(100);
        timer.cancel();
        assert!(!timer.fire());
        timer.advance(100);
        assert!(!timer.fire());

        timer.cancel();
        assert!(timer.is_cancelled());
    }

    #[test]
    fn zero_interval_clamped() {
        assert_eq!(FallTimer::start(0).interval_ms(), 1);
    }
}
