use std::f64::consts::TAU;

use gtk4::cairo;

use super::presenter::ShimmerFrame;

const ELEMENT_RGB: (f64, f64, f64) = (0.0, 0.0, 1.0);
const SHIMMER_PEAK_ALPHA: f64 = 0.5;

/// Everything needed to paint one frame of the draggable element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SceneFrame {
    pub(crate) center_x: f64,
    pub(crate) center_y: f64,
    pub(crate) diameter: f64,
    pub(crate) shimmer: Option<ShimmerFrame>,
}

impl SceneFrame {
    pub(crate) fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Top edge of the shimmer band, which starts flush with the element top.
    pub(crate) fn shimmer_top(&self, shimmer: ShimmerFrame) -> f64 {
        self.center_y - self.radius() + shimmer.offset
    }
}

pub(crate) fn draw_scene(context: &cairo::Context, frame: &SceneFrame) {
    context.save().ok();

    context.arc(frame.center_x, frame.center_y, frame.radius(), 0.0, TAU);
    let (red, green, blue) = ELEMENT_RGB;
    context.set_source_rgb(red, green, blue);
    let _ = context.fill_preserve();

    match frame.shimmer {
        Some(shimmer) => {
            context.clip();
            draw_shimmer_band(context, frame, shimmer);
        }
        None => context.new_path(),
    }

    context.restore().ok();
}

fn draw_shimmer_band(context: &cairo::Context, frame: &SceneFrame, shimmer: ShimmerFrame) {
    let top = frame.shimmer_top(shimmer);
    let bottom = top + shimmer.band_height;
    let gradient = cairo::LinearGradient::new(0.0, top, 0.0, bottom);
    gradient.add_color_stop_rgba(0.0, 1.0, 1.0, 1.0, 0.0);
    gradient.add_color_stop_rgba(0.5, 1.0, 1.0, 1.0, SHIMMER_PEAK_ALPHA);
    gradient.add_color_stop_rgba(1.0, 1.0, 1.0, 1.0, 0.0);
    if let Err(err) = context.set_source(&gradient) {
        tracing::debug!(?err, "failed to set shimmer gradient");
        return;
    }
    context.rectangle(
        frame.center_x - frame.radius(),
        top,
        frame.diameter,
        shimmer.band_height,
    );
    let _ = context.fill();
}
