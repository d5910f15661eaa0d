use crate::geometry::{LayoutMetrics, Point};

/// Input fed to the gesture state machine, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    LongPressBegan { metrics: LayoutMetrics },
    LongPressEnded,
    /// `delta_y` is the translation since the previous pan event, not since
    /// the gesture started.
    PanChanged { touch: Point, delta_y: f64 },
    PanEnded,
    /// The shared lock was written `false` by the cancel collaborator.
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEventKind {
    LongPressBegan,
    LongPressEnded,
    PanChanged,
    PanEnded,
    Unlocked,
}

impl GestureEvent {
    pub fn kind(&self) -> GestureEventKind {
        match self {
            Self::LongPressBegan { .. } => GestureEventKind::LongPressBegan,
            Self::LongPressEnded => GestureEventKind::LongPressEnded,
            Self::PanChanged { .. } => GestureEventKind::PanChanged,
            Self::PanEnded => GestureEventKind::PanEnded,
            Self::Unlocked => GestureEventKind::Unlocked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: super::GesturePhase,
    pub event: GestureEventKind,
    pub to: super::GesturePhase,
}

impl StateTransition {
    pub const fn new(
        from: super::GesturePhase,
        event: GestureEventKind,
        to: super::GesturePhase,
    ) -> Self {
        Self { from, event, to }
    }
}
