use serde::{Deserialize, Serialize};

/// Cubic in-out easing over `t` in `[0, 1]`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Scalar tween between two values over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
}

impl Transition {
    #[must_use]
    pub const fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
        }
    }

    /// Value held once the transition has finished.
    #[must_use]
    pub const fn settled(value: f64) -> Self {
        Self::new(value, value, 0.0)
    }

    #[must_use]
    pub fn progress(self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 || !elapsed_ms.is_finite() {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(self, elapsed_ms: f64) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }

    #[must_use]
    pub fn sample(self, elapsed_ms: f64) -> f64 {
        let progress = self.progress(elapsed_ms);
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_cubic_in_out(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::{Transition, ease_cubic_in_out};
    use approx::assert_relative_eq;

    #[test]
    fn easing_is_symmetric_around_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_relative_eq!(
            ease_cubic_in_out(0.25) + ease_cubic_in_out(0.75),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn transition_clamps_outside_its_window() {
        let fade = Transition::new(0.0, 0.9, 200.0);
        assert_eq!(fade.sample(-10.0), 0.0);
        assert_relative_eq!(fade.sample(100.0), 0.45, epsilon = 1e-12);
        assert_eq!(fade.sample(500.0), 0.9);
        assert!(fade.is_finished(200.0));
        assert!(!fade.is_finished(199.0));
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        assert_eq!(Transition::new(1.0, 3.0, 0.0).sample(0.0), 3.0);
        assert_eq!(Transition::settled(2.0).sample(0.0), 2.0);
    }
}
