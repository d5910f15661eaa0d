use std::collections::VecDeque;

use super::command::PresentationCommand;
use super::diagnostic::GestureDiagnostic;
use super::event::{GestureEvent, GestureEventKind, StateTransition};
use super::model::{GestureConfig, GesturePhase, GestureSession};
use crate::geometry::{LayoutMetrics, Point};
use crate::lock::LockState;

/// Long-press then drag-up gesture core.
///
/// Consumes [`GestureEvent`]s in arrival order and answers each with the
/// [`PresentationCommand`]s the frontend should apply. The only write it makes
/// to the shared [`LockState`] is `set(true)` when the element reaches its
/// upper bound.
#[derive(Debug)]
pub struct GestureStateMachine {
    config: GestureConfig,
    lock: LockState,
    phase: GesturePhase,
    session: Option<GestureSession>,
    // Outlive the session so a locked element can be reset after release.
    resting_y: Option<f64>,
    element_y: Option<f64>,
    shimmer_running: bool,
    transition_history: VecDeque<StateTransition>,
    diagnostics: VecDeque<GestureDiagnostic>,
}

// Both logs drop their oldest entries once full.
const HISTORY_CAPACITY: usize = 256;
const DIAGNOSTICS_CAPACITY: usize = 64;

impl GestureStateMachine {
    pub fn new(config: GestureConfig, lock: LockState) -> Self {
        Self {
            config,
            lock,
            phase: GesturePhase::default(),
            session: None,
            resting_y: None,
            element_y: None,
            shimmer_running: false,
            transition_history: VecDeque::with_capacity(HISTORY_CAPACITY),
            diagnostics: VecDeque::with_capacity(DIAGNOSTICS_CAPACITY),
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Last center position handed to the presentation layer.
    pub fn element_y(&self) -> Option<f64> {
        self.element_y
    }

    pub fn shimmer_running(&self) -> bool {
        self.shimmer_running
    }

    pub fn drain_diagnostics(&mut self) -> Vec<GestureDiagnostic> {
        self.diagnostics.drain(..).collect()
    }

    pub fn handle(&mut self, event: GestureEvent) -> Vec<PresentationCommand> {
        tracing::trace!(phase = ?self.phase, event = ?event, "gesture event");
        match event {
            GestureEvent::LongPressBegan { metrics } => self.begin_press(metrics),
            GestureEvent::PanChanged { touch, delta_y } => self.pan(touch, delta_y),
            GestureEvent::LongPressEnded | GestureEvent::PanEnded => self.release(event.kind()),
            GestureEvent::Unlocked => self.unlock(),
        }
    }

    fn begin_press(&mut self, metrics: LayoutMetrics) -> Vec<PresentationCommand> {
        let event = GestureEventKind::LongPressBegan;
        if self.active_session().is_some() {
            self.out_of_order(event);
            return Vec::new();
        }

        let locked = self.lock.read();
        let start_y = match self.element_y {
            Some(y) if locked => y,
            _ => metrics.resting_center_y,
        };
        let session = GestureSession::begin(metrics, self.config.travel_fraction, start_y);
        if !session.lock_detection() {
            tracing::warn!(
                container_height = metrics.container_height,
                travel_fraction = self.config.travel_fraction,
                "degenerate layout; lock detection disabled for this press"
            );
            self.record(GestureDiagnostic::DegenerateLayout {
                container_height: metrics.container_height,
            });
        }

        let mut commands = Vec::new();
        if self.element_y.is_some_and(|y| y != session.center_y()) {
            commands.push(PresentationCommand::SetElementOffset {
                y: session.center_y(),
            });
        }
        if !self.shimmer_running {
            self.shimmer_running = true;
            commands.push(PresentationCommand::StartShimmer {
                travel: session.max_travel(),
            });
        }

        self.resting_y = Some(session.origin_y());
        self.element_y = Some(session.center_y());
        self.session = Some(session);
        let next = if locked {
            GesturePhase::Locked
        } else {
            GesturePhase::PressHolding
        };
        self.transition(event, next);
        commands
    }

    fn pan(&mut self, touch: Point, delta_y: f64) -> Vec<PresentationCommand> {
        let event = GestureEventKind::PanChanged;
        let Some(mut session) = self.active_session() else {
            self.out_of_order(event);
            return Vec::new();
        };
        if self.phase == GesturePhase::PressHolding {
            self.transition(event, GesturePhase::Dragging);
        }

        // Dragging from above the element must not push it down.
        if touch.y <= session.center_y() {
            tracing::debug!(
                touch_y = touch.y,
                center_y = session.center_y(),
                "pan above center ignored"
            );
            return Vec::new();
        }

        let candidate = session.center_y() + delta_y;
        if !session.contains(candidate) {
            tracing::debug!(
                candidate,
                min = session.min_allowed_y(),
                max = session.origin_y(),
                "pan outside travel rejected"
            );
            return Vec::new();
        }

        let applied = session.clamp(candidate);
        if applied != candidate {
            tracing::warn!(requested = candidate, applied, "clamped element offset");
            self.record(GestureDiagnostic::OffsetClamped {
                requested: candidate,
                applied,
            });
        }
        session.move_to(applied);
        self.session = Some(session);
        self.element_y = Some(applied);

        let reached_bound = applied <= session.min_allowed_y() + self.config.lock_tolerance;
        if session.lock_detection() && reached_bound && !self.lock.read() {
            self.transition(event, GesturePhase::Locked);
            tracing::info!(y = applied, "gesture locked");
            self.lock.set(true);
        }

        vec![PresentationCommand::SetElementOffset { y: applied }]
    }

    fn release(&mut self, event: GestureEventKind) -> Vec<PresentationCommand> {
        let Some(mut session) = self.active_session() else {
            self.out_of_order(event);
            return Vec::new();
        };
        session.end_press();
        self.session = Some(session);

        if self.lock.read() {
            if self.phase != GesturePhase::Locked {
                self.transition(event, GesturePhase::Locked);
            }
            tracing::debug!(y = ?self.element_y, "released while locked; holding position");
            return Vec::new();
        }

        self.transition(event, GesturePhase::Released);
        let commands = self.reset_to_origin(session.origin_y());
        self.transition(event, GesturePhase::Idle);
        commands
    }

    fn unlock(&mut self) -> Vec<PresentationCommand> {
        if self.lock.read() {
            tracing::debug!("unlock notification while still locked ignored");
            return Vec::new();
        }
        let Some(origin_y) = self.resting_y else {
            return Vec::new();
        };

        let commands = self.reset_to_origin(origin_y);
        let next = match self.session.as_mut() {
            Some(session) => {
                session.reset_to_origin();
                if session.long_press_active() {
                    GesturePhase::PressHolding
                } else {
                    GesturePhase::Idle
                }
            }
            None => GesturePhase::Idle,
        };
        if self.phase != next {
            self.transition(GestureEventKind::Unlocked, next);
        }
        commands
    }

    /// Both end events route here, so already-reset state yields nothing.
    fn reset_to_origin(&mut self, origin_y: f64) -> Vec<PresentationCommand> {
        let mut commands = Vec::new();
        if self.element_y.is_some_and(|y| y != origin_y) {
            commands.push(PresentationCommand::AnimateElementToOrigin {
                y: origin_y,
                duration: self.config.return_duration,
            });
        }
        self.element_y = Some(origin_y);
        if self.shimmer_running {
            self.shimmer_running = false;
            commands.push(PresentationCommand::StopShimmer);
        }
        commands
    }

    fn active_session(&self) -> Option<GestureSession> {
        self.session.filter(GestureSession::long_press_active)
    }

    fn out_of_order(&mut self, event: GestureEventKind) {
        tracing::debug!(phase = ?self.phase, event = ?event, "ignoring out-of-order gesture event");
        self.record(GestureDiagnostic::OutOfOrderEvent { event });
    }

    fn record(&mut self, diagnostic: GestureDiagnostic) {
        if self.diagnostics.len() == DIAGNOSTICS_CAPACITY {
            self.diagnostics.pop_front();
        }
        self.diagnostics.push_back(diagnostic);
    }

    fn transition(&mut self, event: GestureEventKind, to: GesturePhase) {
        tracing::debug!(from = ?self.phase, event = ?event, to = ?to, "gesture transition");
        if self.transition_history.len() == HISTORY_CAPACITY {
            self.transition_history.pop_front();
        }
        self.transition_history
            .push_back(StateTransition::new(self.phase, event, to));
        self.phase = to;
    }
}

#[cfg(test)]
impl GestureStateMachine {
    fn history(&self) -> Vec<StateTransition> {
        self.transition_history.iter().copied().collect()
    }
}

impl std::fmt::Display for GestureStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GesturePhase::{:?}", self.phase)
    }
}
