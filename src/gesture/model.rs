use std::time::Duration;

use crate::geometry::LayoutMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    PressHolding,
    Dragging,
    Locked,
    Released,
}

/// Tunables of the drag mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Fraction of the container height the element may travel upward.
    pub travel_fraction: f64,
    /// Distance from the upper bound that already counts as reaching it.
    pub lock_tolerance: f64,
    pub return_duration: Duration,
}

impl GestureConfig {
    pub const DEFAULT_TRAVEL_FRACTION: f64 = 0.10;
    pub const DEFAULT_LOCK_TOLERANCE: f64 = 1.0;
    pub const DEFAULT_RETURN_DURATION: Duration = Duration::from_millis(300);
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            travel_fraction: Self::DEFAULT_TRAVEL_FRACTION,
            lock_tolerance: Self::DEFAULT_LOCK_TOLERANCE,
            return_duration: Self::DEFAULT_RETURN_DURATION,
        }
    }
}

/// State of one press-and-drag interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    origin_y: f64,
    max_travel: f64,
    center_y: f64,
    long_press_active: bool,
    lock_detection: bool,
}

impl GestureSession {
    /// Degenerate travel bounds collapse to zero and turn lock detection off.
    pub(super) fn begin(metrics: LayoutMetrics, travel_fraction: f64, center_y: f64) -> Self {
        let travel = metrics.container_height * travel_fraction;
        let lock_detection = travel.is_finite() && travel > 0.0;
        let max_travel = if lock_detection { travel } else { 0.0 };
        let origin_y = metrics.resting_center_y;
        Self {
            origin_y,
            max_travel,
            center_y: bounded(center_y, origin_y - max_travel, origin_y),
            long_press_active: true,
            lock_detection,
        }
    }

    pub fn origin_y(&self) -> f64 {
        self.origin_y
    }

    pub fn max_travel(&self) -> f64 {
        self.max_travel
    }

    pub fn min_allowed_y(&self) -> f64 {
        self.origin_y - self.max_travel
    }

    pub fn center_y(&self) -> f64 {
        self.center_y
    }

    /// Upward displacement from the resting line, within `[0, max_travel]`.
    pub fn offset(&self) -> f64 {
        self.origin_y - self.center_y
    }

    pub fn long_press_active(&self) -> bool {
        self.long_press_active
    }

    pub fn lock_detection(&self) -> bool {
        self.lock_detection
    }

    pub(super) fn contains(&self, y: f64) -> bool {
        y.is_finite() && y >= self.min_allowed_y() && y <= self.origin_y
    }

    pub(super) fn clamp(&self, y: f64) -> f64 {
        bounded(y, self.min_allowed_y(), self.origin_y)
    }

    pub(super) fn move_to(&mut self, y: f64) {
        self.center_y = y;
    }

    pub(super) fn end_press(&mut self) {
        self.long_press_active = false;
    }

    pub(super) fn reset_to_origin(&mut self) {
        self.center_y = self.origin_y;
    }
}

// `f64::clamp` panics on NaN bounds; min/max fall back to the other operand.
fn bounded(y: f64, lower: f64, upper: f64) -> f64 {
    y.max(lower).min(upper)
}
