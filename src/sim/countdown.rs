//! Pre-serve countdown timer
//!
//! Shows `start, start-1, ..., 1` and then a final "go" step, each for one
//! interval. Completing the last step reports once and rearms the timer.

#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    start: u16,
    interval_ms: f32,
    remaining_ms: f32,
    current: u16,
}

impl Countdown {
    pub fn new(start: u16, interval_ms: u32) -> Self {
        let mut countdown = Self {
            start,
            interval_ms: interval_ms.max(1) as f32,
            remaining_ms: 0.0,
            current: start,
        };
        countdown.reset();
        countdown
    }

    pub fn reset(&mut self) {
        self.remaining_ms = self.total_ms();
        self.current = self.start;
    }

    /// Full duration of the sequence including the "go" step
    pub fn total_ms(&self) -> f32 {
        f32::from(self.start + 1) * self.interval_ms
    }

    /// Step currently displayed; 0 is the "go" step
    pub fn current(&self) -> u16 {
        self.current
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    /// Advance by `delta` seconds. Returns true on the frame the sequence ends.
    pub fn update(&mut self, delta: f32) -> bool {
        self.remaining_ms -= delta * 1000.0;
        if self.remaining_ms < 0.0 {
            self.reset();
            return true;
        }
        let step = (self.remaining_ms / self.interval_ms) as u16;
        self.current = step.min(self.start);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_each_interval() {
        let mut countdown = Countdown::new(3, 600);
        assert_eq!(countdown.current(), 3);

        let mut seen = vec![countdown.current()];
        // 100 ms steps across 2.4 s
        for _ in 0..24 {
            assert!(!countdown.update(0.1));
            if seen.last() != Some(&countdown.current()) {
                seen.push(countdown.current());
            }
        }
        assert_eq!(seen, vec![3, 2, 1, 0]);

        assert!(countdown.update(0.1));
        // Rearmed for the next serve
        assert_eq!(countdown.current(), 3);
    }

    #[test]
    fn test_completes_after_total_duration() {
        let mut countdown = Countdown::new(3, 600);
        assert_eq!(countdown.total_ms(), 2400.0);
        assert!(!countdown.update(2.3));
        assert_eq!(countdown.current(), 0);
        assert!(countdown.update(0.2));
    }

    #[test]
    fn test_reset_mid_sequence() {
        let mut countdown = Countdown::new(3, 600);
        countdown.update(1.0);
        assert_eq!(countdown.current(), 2);
        countdown.reset();
        assert_eq!(countdown.current(), 3);
    }
}
