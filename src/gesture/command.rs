use std::time::Duration;

/// Side effects requested from the presentation layer. The state machine
/// never waits on them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresentationCommand {
    /// Move the element center to `y` immediately.
    SetElementOffset { y: f64 },
    /// Ease the element center back to its resting line `y`.
    AnimateElementToOrigin { y: f64, duration: Duration },
    /// `travel` is the session's upward bound, used to size the shimmer band.
    StartShimmer { travel: f64 },
    StopShimmer,
}
