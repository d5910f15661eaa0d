use std::time::Duration;

use crate::geometry::Point;
use crate::gesture::{GestureEvent, PresentationCommand};

use super::motion::{OriginAnimation, ShimmerSweep};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ShimmerFrame {
    pub(crate) offset: f64,
    pub(crate) band_height: f64,
}

/// Visual state of the draggable element, driven by [`PresentationCommand`]s.
///
/// Times are monotonic seconds. A new origin animation supersedes the one in
/// flight, starting from wherever the element is currently drawn.
#[derive(Debug, Clone)]
pub(crate) struct ElementPresenter {
    element_diameter: f64,
    shimmer_period: Duration,
    center_y: Option<f64>,
    return_animation: Option<OriginAnimation>,
    shimmer: Option<ShimmerSweep>,
}

impl ElementPresenter {
    pub(crate) fn new(element_diameter: f64, shimmer_period: Duration) -> Self {
        Self {
            element_diameter,
            shimmer_period,
            center_y: None,
            return_animation: None,
            shimmer: None,
        }
    }

    pub(crate) fn element_diameter(&self) -> f64 {
        self.element_diameter
    }

    pub(crate) fn apply(&mut self, command: PresentationCommand, now: f64) {
        match command {
            PresentationCommand::SetElementOffset { y } => {
                self.return_animation = None;
                self.center_y = Some(y);
            }
            PresentationCommand::AnimateElementToOrigin { y, duration } => {
                let from = self.displayed_center_y(now).unwrap_or(y);
                self.return_animation = Some(OriginAnimation::new(from, y, now, duration));
                self.center_y = Some(y);
            }
            PresentationCommand::StartShimmer { travel } => {
                let band_height = travel + self.element_diameter;
                self.shimmer = Some(ShimmerSweep::new(now, band_height, self.shimmer_period));
            }
            PresentationCommand::StopShimmer => {
                self.shimmer = None;
            }
        }
    }

    /// `None` until the first command positions the element.
    pub(crate) fn displayed_center_y(&self, now: f64) -> Option<f64> {
        match self.return_animation {
            Some(animation) => Some(animation.value_at(now)),
            None => self.center_y,
        }
    }

    pub(crate) fn shimmer_frame(&self, now: f64) -> Option<ShimmerFrame> {
        self.shimmer.map(|sweep| ShimmerFrame {
            offset: sweep.offset_at(now),
            band_height: sweep.band_height(),
        })
    }

    /// Drops a finished return animation. Returns whether a redraw is due.
    pub(crate) fn tick(&mut self, now: f64) -> bool {
        let animating = self.return_animation.is_some();
        if self
            .return_animation
            .is_some_and(|animation| animation.finished(now))
        {
            self.return_animation = None;
        }
        animating || self.shimmer.is_some()
    }
}

/// Turns the cumulative offsets of one drag sequence into per-event deltas.
///
/// Each update consumes the movement since the previous one, so summing the
/// emitted deltas gives the sequence's total offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct DragTracker {
    start: Option<Point>,
    last_offset_y: f64,
}

impl DragTracker {
    pub(crate) fn begin(&mut self, start: Point) {
        self.start = Some(start);
        self.last_offset_y = 0.0;
    }

    /// `None` outside a drag sequence.
    pub(crate) fn update(&mut self, offset_x: f64, offset_y: f64) -> Option<GestureEvent> {
        let start = self.start?;
        let delta_y = offset_y - self.last_offset_y;
        self.last_offset_y = offset_y;
        Some(GestureEvent::PanChanged {
            touch: Point::new(start.x + offset_x, start.y + offset_y),
            delta_y,
        })
    }

    /// Lifting the pointer ends the press; `None` if no sequence was open.
    pub(crate) fn end(&mut self) -> Option<GestureEvent> {
        self.start.take()?;
        self.last_offset_y = 0.0;
        Some(GestureEvent::LongPressEnded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presenter() -> ElementPresenter {
        ElementPresenter::new(100.0, Duration::from_millis(1500))
    }

    #[test]
    fn set_offset_moves_immediately() {
        let mut presenter = presenter();
        assert_eq!(presenter.displayed_center_y(0.0), None);

        presenter.apply(PresentationCommand::SetElementOffset { y: 430.0 }, 0.0);

        assert_eq!(presenter.displayed_center_y(0.0), Some(430.0));
        assert!(!presenter.tick(0.0));
    }

    #[test]
    fn origin_animation_starts_from_drawn_position() {
        let mut presenter = presenter();
        presenter.apply(PresentationCommand::SetElementOffset { y: 450.0 }, 0.0);

        presenter.apply(
            PresentationCommand::AnimateElementToOrigin {
                y: 500.0,
                duration: Duration::from_millis(300),
            },
            1.0,
        );

        assert_eq!(presenter.displayed_center_y(1.0), Some(450.0));
        assert!(presenter.tick(1.1));
        assert!(presenter.tick(1.3));
        assert_eq!(presenter.displayed_center_y(1.3), Some(500.0));
        assert!(!presenter.tick(1.4));
    }

    #[test]
    fn drag_during_return_animation_supersedes_it() {
        let mut presenter = presenter();
        presenter.apply(PresentationCommand::SetElementOffset { y: 420.0 }, 0.0);
        presenter.apply(
            PresentationCommand::AnimateElementToOrigin {
                y: 500.0,
                duration: Duration::from_millis(300),
            },
            0.0,
        );

        presenter.apply(PresentationCommand::SetElementOffset { y: 490.0 }, 0.1);

        assert_eq!(presenter.displayed_center_y(0.2), Some(490.0));
    }

    #[test]
    fn shimmer_band_spans_travel_plus_element() {
        let mut presenter = presenter();
        presenter.apply(PresentationCommand::StartShimmer { travel: 100.0 }, 5.0);

        let frame = presenter.shimmer_frame(5.75).expect("shimmer should run");
        assert_eq!(frame.band_height, 200.0);
        assert_eq!(frame.offset, -100.0);
        assert!(presenter.tick(6.0));

        presenter.apply(PresentationCommand::StopShimmer, 6.0);
        assert!(presenter.shimmer_frame(6.0).is_none());
        assert!(!presenter.tick(6.0));
    }

    fn pan_delta(event: Option<GestureEvent>) -> f64 {
        match event {
            Some(GestureEvent::PanChanged { delta_y, .. }) => delta_y,
            other => panic!("expected a pan, got {other:?}"),
        }
    }

    #[test]
    fn drag_deltas_sum_to_cumulative_offset() {
        let mut tracker = DragTracker::default();
        tracker.begin(Point::new(200.0, 560.0));

        let offsets = [-3.0, -11.5, -11.5, -40.0, -25.0, -100.0];
        let deltas: Vec<f64> = offsets
            .iter()
            .map(|offset_y| pan_delta(tracker.update(0.0, *offset_y)))
            .collect();

        assert_eq!(deltas, vec![-3.0, -8.5, 0.0, -28.5, 15.0, -75.0]);
        assert_eq!(deltas.iter().sum::<f64>(), -100.0);
    }

    #[test]
    fn pan_touch_is_start_point_plus_offset() {
        let mut tracker = DragTracker::default();
        tracker.begin(Point::new(200.0, 560.0));

        assert_eq!(
            tracker.update(4.0, -10.0),
            Some(GestureEvent::PanChanged {
                touch: Point::new(204.0, 550.0),
                delta_y: -10.0,
            })
        );
    }

    #[test]
    fn new_drag_starts_from_zero() {
        let mut tracker = DragTracker::default();
        tracker.begin(Point::new(0.0, 0.0));
        tracker.update(0.0, -60.0);
        assert_eq!(tracker.end(), Some(GestureEvent::LongPressEnded));

        tracker.begin(Point::new(0.0, 0.0));
        assert_eq!(pan_delta(tracker.update(0.0, -5.0)), -5.0);
    }

    #[test]
    fn updates_and_end_outside_a_drag_are_dropped() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.update(0.0, -5.0), None);
        assert_eq!(tracker.end(), None);

        tracker.begin(Point::new(0.0, 0.0));
        tracker.end();
        assert_eq!(tracker.end(), None);
    }
}
