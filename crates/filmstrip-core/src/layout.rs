use crate::consts::{DEFAULT_THUMB_EXTENT, DEFAULT_THUMB_STRIDE, DEFAULT_THUMB_VIEWPORT};

/// A position in host coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Bounding box of the container the widget renders into, taken once at
/// construction. Decides whether the thumbnail preview bar exists.
#[derive(Clone, Copy, Debug)]
pub struct Mount {
    pub width: f32,
    pub height: f32,
}

impl Mount {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Host-supplied measurements the engine computes scroll destinations and
/// pan clamps from. The engine never measures pixels itself; the host
/// re-syncs this whenever its geometry changes.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    /// Width of one strip slot. Slot `i` starts at `i * slot_extent`.
    pub slot_extent: f32,
    /// Visible width of the main strip.
    pub strip_viewport: f32,
    /// Distance between the left edges of adjacent thumbnails.
    pub thumb_stride: f32,
    /// Width of a single thumbnail tile.
    pub thumb_extent: f32,
    /// Visible width of the thumbnail preview bar.
    pub thumb_viewport: f32,
    /// Rendered size of the current image at scale 1, for pan clamping.
    pub image_size: [f32; 2],
}

impl Layout {
    /// Default layout for a mount: one full-width slot per image, the image
    /// filling the mount until the host reports a real rendered size.
    pub fn for_mount(mount: &Mount) -> Self {
        Self {
            slot_extent: mount.width,
            strip_viewport: mount.width,
            thumb_stride: DEFAULT_THUMB_STRIDE,
            thumb_extent: DEFAULT_THUMB_EXTENT,
            thumb_viewport: DEFAULT_THUMB_VIEWPORT,
            image_size: [mount.width, mount.height],
        }
    }
}
