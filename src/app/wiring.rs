use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Button, DrawingArea, Label};

use crate::geometry::{circle_contains, LayoutMetrics, Point};
use crate::gesture::{GestureEvent, GestureStateMachine, PresentationCommand};
use crate::lock::LockState;

use super::presenter::{DragTracker, ElementPresenter};
use super::render::{draw_scene, SceneFrame};

#[derive(Clone)]
pub(super) struct GestureContext {
    pub(super) area: DrawingArea,
    pub(super) machine: Rc<RefCell<GestureStateMachine>>,
    pub(super) presenter: Rc<RefCell<ElementPresenter>>,
    pub(super) drag: Rc<RefCell<DragTracker>>,
}

impl GestureContext {
    fn dispatch(&self, event: GestureEvent) {
        let (commands, diagnostics) = {
            let mut machine = self.machine.borrow_mut();
            let commands = machine.handle(event);
            (commands, machine.drain_diagnostics())
        };
        for diagnostic in diagnostics {
            tracing::trace!(?diagnostic, "gesture diagnostic");
        }
        self.apply(commands);
    }

    fn apply(&self, commands: Vec<PresentationCommand>) {
        if commands.is_empty() {
            return;
        }
        let now = monotonic_seconds();
        let mut presenter = self.presenter.borrow_mut();
        for command in commands {
            tracing::trace!(?command, "apply presentation command");
            presenter.apply(command, now);
        }
        self.area.queue_draw();
    }

    fn metrics(&self) -> LayoutMetrics {
        LayoutMetrics::centered(f64::from(self.area.height()))
    }

    fn scene_frame(&self, width: i32, height: i32, now: f64) -> SceneFrame {
        let presenter = self.presenter.borrow();
        SceneFrame {
            center_x: f64::from(width) / 2.0,
            center_y: presenter
                .displayed_center_y(now)
                .unwrap_or(f64::from(height) / 2.0),
            diameter: presenter.element_diameter(),
            shimmer: presenter.shimmer_frame(now),
        }
    }
}

pub(super) fn lock_status_text(locked: bool) -> String {
    format!("isLocked is {locked}")
}

pub(super) fn monotonic_seconds() -> f64 {
    gtk4::glib::monotonic_time() as f64 / 1_000_000.0
}

pub(super) fn connect_scene_drawing(context: &GestureContext) {
    let draw_context = context.clone();
    context
        .area
        .set_draw_func(move |_, cairo_context, width, height| {
            if width <= 0 || height <= 0 {
                return;
            }
            let frame = draw_context.scene_frame(width, height, monotonic_seconds());
            draw_scene(cairo_context, &frame);
        });
}

/// Long press and drag share one event sequence so both recognize at once.
///
/// The long-press recognizer stops as soon as the pointer passes the drag
/// threshold, so only the drag's end marks the finger being lifted.
pub(super) fn connect_press_and_drag_gestures(context: &GestureContext) {
    let long_press = gtk4::GestureLongPress::new();
    long_press.set_button(gtk4::gdk::BUTTON_PRIMARY);
    let drag = gtk4::GestureDrag::new();
    drag.set_button(gtk4::gdk::BUTTON_PRIMARY);
    drag.group_with(&long_press);

    let press_context = context.clone();
    long_press.connect_pressed(move |gesture, x, y| {
        let area = &press_context.area;
        let frame = press_context.scene_frame(area.width(), area.height(), monotonic_seconds());
        let center = Point::new(frame.center_x, frame.center_y);
        if !circle_contains(center, frame.diameter, Point::new(x, y)) {
            tracing::debug!(x, y, "long press outside element");
            gesture.set_state(gtk4::EventSequenceState::Denied);
            return;
        }
        let metrics = press_context.metrics();
        tracing::debug!(?metrics, "long press recognized");
        press_context.dispatch(GestureEvent::LongPressBegan { metrics });
    });

    // Emitted only before `pressed`, when no press has begun yet.
    long_press.connect_cancelled(|_| {
        tracing::debug!("long press cancelled before recognition");
    });

    let begin_context = context.clone();
    drag.connect_drag_begin(move |_, start_x, start_y| {
        begin_context
            .drag
            .borrow_mut()
            .begin(Point::new(start_x, start_y));
    });

    let update_context = context.clone();
    drag.connect_drag_update(move |_, offset_x, offset_y| {
        let event = update_context.drag.borrow_mut().update(offset_x, offset_y);
        if let Some(event) = event {
            update_context.dispatch(event);
        }
    });

    // Drag end also follows a cancelled sequence.
    let drag_end_context = context.clone();
    drag.connect_drag_end(move |_, _, _| {
        let event = drag_end_context.drag.borrow_mut().end();
        if let Some(event) = event {
            drag_end_context.dispatch(event);
        }
    });

    context.area.add_controller(long_press);
    context.area.add_controller(drag);
}

pub(super) fn connect_lock_observers(
    lock: &LockState,
    context: &GestureContext,
    status_label: &Label,
    cancel_button: &Button,
) {
    let label = status_label.clone();
    lock.subscribe(move |locked| label.set_text(&lock_status_text(locked)));

    let button = cancel_button.clone();
    lock.subscribe(move |locked| button.set_visible(locked));

    // `true` is written from inside `GestureStateMachine::handle`; only the
    // cancel path may borrow the machine here.
    let reset_context = context.clone();
    lock.subscribe(move |locked| {
        if !locked {
            reset_context.dispatch(GestureEvent::Unlocked);
        }
    });

    let cancel_lock = lock.clone();
    cancel_button.connect_clicked(move |_| {
        tracing::info!("cancel pressed; unlocking");
        cancel_lock.set(false);
    });
}

pub(super) fn connect_frame_ticks(context: &GestureContext) {
    let presenter = context.presenter.clone();
    context.area.add_tick_callback(move |area, clock| {
        let now = clock.frame_time() as f64 / 1_000_000.0;
        if presenter.borrow_mut().tick(now) {
            area.queue_draw();
        }
        gtk4::glib::ControlFlow::Continue
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::gesture::{GestureConfig, GesturePhase};

    #[test]
    fn press_stays_active_through_drag_until_pointer_lifts() {
        let lock = LockState::new();
        let mut machine = GestureStateMachine::new(GestureConfig::default(), lock.clone());
        let mut drag = DragTracker::default();

        drag.begin(Point::new(200.0, 560.0));
        machine.handle(GestureEvent::LongPressBegan {
            metrics: LayoutMetrics::centered(1000.0),
        });

        let mut emitted = Vec::new();
        for step in 1..=25 {
            let event = drag
                .update(0.0, -4.0 * f64::from(step))
                .expect("drag sequence is open");
            emitted.extend(machine.handle(event));
        }

        assert!(lock.read());
        assert_eq!(machine.phase(), GesturePhase::Locked);
        assert_eq!(emitted.len(), 25);
        assert!(!emitted.contains(&PresentationCommand::StopShimmer));
        assert!(machine.drain_diagnostics().is_empty());

        let lift = drag.end().expect("drag sequence is open");
        assert!(machine.handle(lift).is_empty());
        assert_eq!(machine.element_y(), Some(400.0));
    }

    #[test]
    fn lock_status_text_reports_state() {
        assert_eq!(lock_status_text(true), "isLocked is true");
        assert_eq!(lock_status_text(false), "isLocked is false");
    }
}
