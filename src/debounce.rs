/// Trailing-edge debouncer for free-text search input.
///
/// Each submission replaces the pending term and restarts the window;
/// the term fires once when input has paused for the full window. The
/// current time is passed in explicitly so behavior is deterministic
/// under test.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Debouncer {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a new term and restarts the window.
    pub fn submit(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some((term.into(), now));
    }

    /// Returns the pending term once the window has elapsed since the
    /// last submission, at most once per submission burst.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, submitted)) if now.duration_since(*submitted) >= self.window => {
                self.pending.take().map(|(term, _)| term)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn test_burst_fires_once_with_final_term() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);

        debouncer.submit("a", start);
        debouncer.submit("ab", start + Duration::from_millis(50));
        debouncer.submit("abc", start + Duration::from_millis(100));

        // window measured from the last keystroke
        assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(400)),
            Some("abc".to_string())
        );
        // fired once, nothing further
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_poll_before_window_keeps_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.submit("x", start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(100)), None);
        assert!(debouncer.is_pending());
    }

    #[test]
    fn test_cancel_discards_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.submit("x", start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + WINDOW), None);
    }
}
