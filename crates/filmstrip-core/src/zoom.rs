use crate::layout::Point;

/// How far a zoomed image may be panned along one axis before its edge would
/// pull inside the viewing slot. At scale 1 this is zero on both axes.
pub fn max_overflow(scale: f32, extent: f32) -> f32 {
    (scale * extent - extent) / 2.0
}

/// Clamp a pan offset so the scaled image never reveals the slot behind it.
pub fn clamp_pan(pan: Point, scale: f32, image: [f32; 2]) -> Point {
    let limit_x = max_overflow(scale, image[0]);
    let limit_y = max_overflow(scale, image[1]);
    Point::new(pan.x.clamp(-limit_x, limit_x), pan.y.clamp(-limit_y, limit_y))
}

/// Magnification and pan offset of the current image. Pan is kept clamped at
/// every write, so a shrinking scale drags an off-centre pan back inside the
/// tightened limits on the same call.
#[derive(Clone, Copy, Debug)]
pub struct ZoomState {
    scale: f32,
    pan: Point,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan: Point::default(),
        }
    }
}

impl ZoomState {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > 1.0
    }

    /// Back to natural size, centred.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.pan = Point::default();
    }

    /// Double-tap: natural size flips to `tap_scale`, anything else flips
    /// back to natural size. Pan recentres either way.
    pub fn toggle(&mut self, tap_scale: f32) {
        if self.scale == 1.0 {
            self.scale = tap_scale;
        } else {
            self.scale = 1.0;
        }
        self.pan = Point::default();
    }

    /// Apply a requested magnification, clamped to `[min, max]`. The pan is
    /// re-clamped against the new scale so the image edge never comes loose.
    pub fn set_scale(&mut self, requested: f32, min: f32, max: f32, image: [f32; 2]) {
        self.scale = requested.clamp(min, max);
        self.pan = clamp_pan(self.pan, self.scale, image);
    }

    /// Move the pan toward `target`, clamped against the current scale.
    pub fn pan_to(&mut self, target: Point, image: [f32; 2]) {
        self.pan = clamp_pan(target, self.scale, image);
    }
}
