use super::GestureEventKind;

/// Conditions the state machine absorbs instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureDiagnostic {
    /// Travel bound was zero, negative or not finite; lock detection is off
    /// for the session.
    DegenerateLayout { container_height: f64 },
    /// Move or release with no active long press, or a repeated begin.
    OutOfOrderEvent { event: GestureEventKind },
    /// Final clamp changed an accepted position.
    OffsetClamped { requested: f64, applied: f64 },
}
