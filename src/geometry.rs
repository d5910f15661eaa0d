/// Container-relative geometry shared by the gesture core and the GTK frontend.
/// `y` grows downward, so dragging up produces negative deltas.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Layout read once when a long press begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub container_height: f64,
    pub resting_center_y: f64,
}

impl LayoutMetrics {
    pub const fn new(container_height: f64, resting_center_y: f64) -> Self {
        Self {
            container_height,
            resting_center_y,
        }
    }

    /// Metrics for an element resting at the vertical middle of its container.
    pub fn centered(container_height: f64) -> Self {
        Self::new(container_height, container_height / 2.0)
    }
}

pub fn circle_contains(center: Point, diameter: f64, point: Point) -> bool {
    let radius = diameter / 2.0;
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    dx * dx + dy * dy <= radius * radius
}
