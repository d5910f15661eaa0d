use std::time::Duration;

/// Smoothstep approximation of the platform ease-in-out curve.
pub(crate) fn ease_in_out(progress: f64) -> f64 {
    let t = progress.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Eased move of the element center back to its resting line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OriginAnimation {
    from: f64,
    to: f64,
    started_at: f64,
    duration: f64,
}

impl OriginAnimation {
    pub(crate) fn new(from: f64, to: f64, started_at: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration: duration.as_secs_f64(),
        }
    }

    pub(crate) fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
    }

    pub(crate) fn value_at(&self, now: f64) -> f64 {
        self.from + (self.to - self.from) * ease_in_out(self.progress(now))
    }

    pub(crate) fn finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Highlight band that sweeps upward across the element, repeating forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ShimmerSweep {
    started_at: f64,
    band_height: f64,
    period: f64,
}

impl ShimmerSweep {
    pub(crate) fn new(started_at: f64, band_height: f64, period: Duration) -> Self {
        Self {
            started_at,
            band_height,
            period: period.as_secs_f64(),
        }
    }

    pub(crate) fn band_height(&self) -> f64 {
        self.band_height
    }

    /// Vertical translation of the band: `0` at the start of each cycle, down
    /// to `-band_height` at its end.
    pub(crate) fn offset_at(&self, now: f64) -> f64 {
        if self.period <= 0.0 {
            return 0.0;
        }
        let elapsed = (now - self.started_at).max(0.0);
        let cycle = (elapsed % self.period) / self.period;
        -self.band_height * cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_in_out_is_symmetric_and_bounded() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(-2.0), 0.0);
        assert_eq!(ease_in_out(3.0), 1.0);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }

    #[test]
    fn origin_animation_reaches_target_after_duration() {
        let animation = OriginAnimation::new(450.0, 500.0, 10.0, Duration::from_millis(300));

        assert_eq!(animation.value_at(10.0), 450.0);
        assert!((animation.value_at(10.15) - 475.0).abs() < 1e-6);
        assert_eq!(animation.value_at(10.3), 500.0);
        assert_eq!(animation.value_at(99.0), 500.0);
        assert!(!animation.finished(10.2));
        assert!(animation.finished(10.3));
    }

    #[test]
    fn zero_duration_animation_jumps_immediately() {
        let animation = OriginAnimation::new(420.0, 500.0, 1.0, Duration::ZERO);
        assert_eq!(animation.value_at(1.0), 500.0);
        assert!(animation.finished(1.0));
    }

    #[test]
    fn shimmer_sweep_repeats_every_period() {
        let sweep = ShimmerSweep::new(2.0, 200.0, Duration::from_millis(1500));

        assert_eq!(sweep.offset_at(2.0), 0.0);
        assert_eq!(sweep.offset_at(2.75), -100.0);
        assert_eq!(sweep.offset_at(3.5), 0.0);
        assert_eq!(sweep.offset_at(4.25), -100.0);
        assert_eq!(sweep.offset_at(1.0), 0.0);
    }
}
