//! Pulsing alpha animation for prompt text

use crate::consts::{PULSE_MAX_ALPHA, PULSE_MIN_ALPHA, PULSE_SPEED, PULSE_START_ALPHA};

/// Alpha that bounces between `PULSE_MIN_ALPHA` and `PULSE_MAX_ALPHA`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    alpha: f32,
    velocity: f32,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            alpha: PULSE_START_ALPHA,
            velocity: PULSE_SPEED,
        }
    }
}

impl Pulse {
    pub fn update(&mut self, delta: f32) {
        if self.alpha <= PULSE_MIN_ALPHA {
            self.velocity = PULSE_SPEED;
        } else if self.alpha >= PULSE_MAX_ALPHA {
            self.velocity = -PULSE_SPEED;
        }
        self.alpha = (self.alpha + self.velocity * delta).clamp(0.0, 255.0);
    }

    pub fn alpha(&self) -> u8 {
        self.alpha as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_rises_then_falls() {
        let mut pulse = Pulse::default();
        assert_eq!(pulse.alpha(), 100);

        pulse.update(0.1);
        assert!(pulse.alpha() > 100);

        // Run long enough to hit the top and turn around
        let mut peak = 0;
        for _ in 0..60 {
            pulse.update(1.0 / 60.0);
            peak = peak.max(pulse.alpha());
        }
        assert!(peak >= 236);
        assert!(pulse.alpha() < peak);
    }

    #[test]
    fn test_pulse_stays_in_range() {
        let mut pulse = Pulse::default();
        for _ in 0..1000 {
            pulse.update(1.0 / 60.0);
            let a = pulse.alpha();
            assert!((50..=246).contains(&a), "alpha {a} out of range");
        }
    }
}
