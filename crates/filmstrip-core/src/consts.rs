/// Damping divisor for eased scrolling: each frame closes 1/divisor of the
/// remaining gap, giving exponential decay rather than linear motion.
pub const DEFAULT_EASING_DIVISOR: f32 = 5.0;

/// Distance (in host units) an eased scroll may sit from its destination
/// before it snaps exactly onto it and stops.
pub const DEFAULT_SNAP_EPSILON: f32 = 1.0;

/// Horizontal drag distance (in host units) beyond which a one-finger pan
/// becomes a page swipe. Drags inside the dead zone settle back without
/// changing the page.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Lower bound for the zoom scale. 1.0 means the image fits its slot; the
/// scale never goes below it.
pub const DEFAULT_MIN_ZOOM: f32 = 1.0;

/// Upper bound for the pinch zoom scale.
pub const DEFAULT_MAX_ZOOM: f32 = 5.0;

/// Scale applied by a double-tap on an unzoomed image.
pub const DEFAULT_DOUBLE_TAP_SCALE: f32 = 2.0;

/// Mount width (in host units) above which the thumbnail preview bar is
/// built. Narrower mounts get no bar.
pub const PREVIEW_BAR_MIN_MOUNT_WIDTH: f32 = 600.0;

/// Default distance between the left edges of adjacent thumbnails:
/// 50-unit tiles overlapping 3 units of border.
pub const DEFAULT_THUMB_STRIDE: f32 = 47.0;

/// Default width of a single thumbnail tile.
pub const DEFAULT_THUMB_EXTENT: f32 = 50.0;

/// Default visible width of the thumbnail preview bar.
pub const DEFAULT_THUMB_VIEWPORT: f32 = 300.0;
