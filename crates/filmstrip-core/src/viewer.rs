use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{
    DEFAULT_DOUBLE_TAP_SCALE, DEFAULT_EASING_DIVISOR, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
    DEFAULT_SNAP_EPSILON, DEFAULT_SWIPE_THRESHOLD, PREVIEW_BAR_MIN_MOUNT_WIDTH,
};
use crate::error::{FilmstripError, Result};
use crate::gesture::{Gesture, GesturePhase, MoveEffect, SwipeDirection};
use crate::layout::{Layout, Mount, Point};
use crate::scroll::ScrollChannel;
use crate::zoom::ZoomState;

/// Caller-side identifier for image data the host already holds decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// Where an image's pixels come from.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    /// Fetch and decode from a location string.
    Uri(String),
    /// Already decoded by the host; loading is never deferred for these.
    Handle(ImageHandle),
}

/// One slot of the strip. A deferred item knows its location but exposes no
/// display source until the viewer first lands on it.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageItem {
    display: Option<ImageSource>,
    deferred: Option<String>,
}

impl ImageItem {
    fn eager(source: ImageSource) -> Self {
        Self {
            display: Some(source),
            deferred: None,
        }
    }

    fn deferred(uri: String) -> Self {
        Self {
            display: None,
            deferred: Some(uri),
        }
    }

    /// The source the host should load and draw, once the item is resolved.
    pub fn display_source(&self) -> Option<&ImageSource> {
        self.display.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.display.is_some()
    }

    fn resolve(&mut self) {
        if let Some(uri) = self.deferred.take() {
            self.display = Some(ImageSource::Uri(uri));
        }
    }
}

/// Numeric knobs of the navigation feel. The defaults reproduce the stock
/// behaviour; hosts override them through [`ViewerOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Fraction of the remaining scroll gap closed per frame (`gap / divisor`).
    pub easing_divisor: f32,
    /// Horizontal travel a swipe must strictly exceed to change images.
    pub swipe_threshold: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Magnification a double tap toggles to from natural size.
    pub double_tap_scale: f32,
    /// Distance within which an eased scroll snaps onto its destination.
    pub snap_epsilon: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            easing_divisor: DEFAULT_EASING_DIVISOR,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            double_tap_scale: DEFAULT_DOUBLE_TAP_SCALE,
            snap_epsilon: DEFAULT_SNAP_EPSILON,
        }
    }
}

/// Construction-time options. `lazy` defers loading of every uri image
/// except the first and suppresses the preview bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    pub lazy: bool,
    pub tunables: Tunables,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            lazy: false,
            tunables: Tunables::default(),
        }
    }
}

/// The thumbnail rail under the strip: its own scroll channel plus the
/// highlighted tile. Present only when the mount is wide enough and loading
/// is not lazy.
#[derive(Clone, Debug)]
pub struct PreviewBar {
    channel: ScrollChannel,
    highlight: Option<usize>,
}

impl PreviewBar {
    pub fn offset(&self) -> f32 {
        self.channel.offset()
    }

    pub fn destination(&self) -> Option<f32> {
        self.channel.destination()
    }

    pub fn is_animating(&self) -> bool {
        self.channel.is_animating()
    }

    /// Index of the outlined tile, if any tile has been selected yet.
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }
}

/// The navigation engine. Owns the image list, the authoritative current
/// index, both scroll channels, and the zoom and gesture state; every way
/// of changing images funnels through [`Viewer::set_current_index`].
///
/// The viewer is headless. The host feeds it touch points, wheel deltas and
/// taps in mount-local coordinates, ticks it once per frame, and draws from
/// its read-back accessors.
#[derive(Clone, Debug)]
pub struct Viewer {
    options: ViewerOptions,
    mount: Mount,
    layout: Layout,
    items: Vec<ImageItem>,
    current_index: usize,
    counter: String,
    zoom: ZoomState,
    gesture: Gesture,
    strip: ScrollChannel,
    preview: Option<PreviewBar>,
}

impl Viewer {
    /// Build a viewer over `mount`. Fails if the mount has no usable area,
    /// since every layout decision below divides by or compares against its
    /// dimensions.
    pub fn new(options: ViewerOptions, mount: Mount) -> Result<Self> {
        if !mount.has_area() {
            return Err(FilmstripError::InvalidMount {
                width: mount.width,
                height: mount.height,
            });
        }
        let tunables = options.tunables;
        let with_preview = mount.width > PREVIEW_BAR_MIN_MOUNT_WIDTH && !options.lazy;
        let mut viewer = Self {
            options,
            mount,
            layout: Layout::for_mount(&mount),
            items: Vec::new(),
            current_index: 0,
            counter: String::from("1/0"),
            zoom: ZoomState::default(),
            gesture: Gesture::default(),
            strip: ScrollChannel::new(tunables.easing_divisor, tunables.snap_epsilon),
            preview: with_preview.then(|| PreviewBar {
                channel: ScrollChannel::new(tunables.easing_divisor, tunables.snap_epsilon),
                highlight: None,
            }),
        };
        viewer.sync_extents();
        Ok(viewer)
    }

    /// Replace the image list. Under lazy loading every uri after the first
    /// is deferred; handles are always eager.
    ///
    /// The current index is left as it stands, even past the end of a
    /// shorter list, until the caller moves it. Both scroll channels drop
    /// back to the top of their content and the preview highlight clears.
    pub fn set_image_list(&mut self, sources: Vec<ImageSource>) {
        let lazy = self.options.lazy;
        self.items = sources
            .into_iter()
            .enumerate()
            .map(|(index, source)| match source {
                ImageSource::Uri(uri) if lazy && index != 0 => ImageItem::deferred(uri),
                source => ImageItem::eager(source),
            })
            .collect();
        debug!(images = self.items.len(), "image list replaced");
        self.sync_extents();
        self.strip.set_offset(0.0);
        if let Some(preview) = &mut self.preview {
            preview.highlight = None;
            preview.channel.set_offset(0.0);
        }
        self.refresh_counter();
    }

    /// Move to `index`: the single authority for image changes. Resolves a
    /// deferred image, recentres both scroll channels on it and updates the
    /// counter and preview highlight. An out-of-range index lands on the
    /// last image; re-asserting the current index is allowed and leaves the
    /// zoom untouched while still recentring the channels.
    pub fn set_current_index(&mut self, index: usize) {
        let Some(last) = self.items.len().checked_sub(1) else {
            warn!("ignoring index change on an empty image list");
            return;
        };
        let target = if index > last {
            warn!(index, last, "index out of range, showing last image");
            last
        } else {
            index
        };
        if target != self.current_index {
            self.zoom.reset();
        }
        self.current_index = target;
        self.items[target].resolve();
        self.refresh_counter();
        if let Some(preview) = &mut self.preview {
            preview.highlight = Some(target);
            let centred = self.layout.thumb_stride * target as f32
                - self.layout.thumb_viewport / 2.0
                + self.layout.thumb_extent / 2.0;
            preview.channel.animate_to(centred);
        }
        self.strip.animate_to(self.layout.slot_extent * target as f32);
    }

    /// Step one image per wheel notch. At either end of the list the event
    /// is dropped before touching any state.
    pub fn wheel(&mut self, delta_y: f32) {
        if self.items.is_empty() {
            return;
        }
        if delta_y > 0.0 {
            if self.current_index + 1 < self.items.len() {
                self.set_current_index(self.current_index + 1);
            }
        } else if self.current_index > 0 {
            self.set_current_index(self.current_index - 1);
        }
    }

    /// Begin a touch gesture from the full contact list. A pinch start
    /// re-asserts the current index so both channels recentre under the
    /// fingers before any scaling lands.
    pub fn touch_start(&mut self, points: &[Point]) {
        let resync = self.gesture.touch_start(
            points,
            self.zoom.scale(),
            self.zoom.pan(),
            self.strip.offset(),
        );
        if resync && !self.items.is_empty() {
            self.set_current_index(self.current_index);
        }
    }

    /// Route one touch-move: pinches rescale then pan, one-finger drags move
    /// the strip at natural size and pan the image when magnified.
    pub fn touch_move(&mut self, points: &[Point]) {
        let tunables = self.options.tunables;
        match self
            .gesture
            .touch_move(points, self.zoom.scale(), tunables.swipe_threshold)
        {
            MoveEffect::None => {}
            MoveEffect::Pinch { scale, pan_target } => {
                self.zoom
                    .set_scale(scale, tunables.min_zoom, tunables.max_zoom, self.layout.image_size);
                if self.zoom.is_zoomed() {
                    self.zoom.pan_to(pan_target, self.layout.image_size);
                }
            }
            MoveEffect::DragStrip { offset } => self.strip.set_offset(offset),
            MoveEffect::PanImage { target } => self.zoom.pan_to(target, self.layout.image_size),
        }
    }

    /// Finish the gesture. A decided swipe resets the zoom and steps one
    /// image, unless the list ends there, in which case the decision is
    /// dropped. An undecided drag snaps the strip back onto the current
    /// image by re-asserting the index.
    pub fn touch_end(&mut self) {
        match self.gesture.touch_end() {
            Some(direction) => {
                self.zoom.reset();
                match direction {
                    SwipeDirection::Advance => {
                        if self.current_index + 1 < self.items.len() {
                            self.set_current_index(self.current_index + 1);
                        }
                    }
                    SwipeDirection::Retreat => {
                        if self.current_index > 0 {
                            self.set_current_index(self.current_index - 1);
                        }
                    }
                }
            }
            None => {
                if !self.items.is_empty() {
                    self.set_current_index(self.current_index);
                }
            }
        }
    }

    /// Toggle between natural size and the double-tap magnification.
    pub fn double_tap(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.zoom.toggle(self.options.tunables.double_tap_scale);
    }

    /// A click on preview tile `index` is an ordinary index change.
    pub fn thumb_click(&mut self, index: usize) {
        self.set_current_index(index);
    }

    /// Advance both scroll channels one frame. Returns true while either
    /// still animates, telling the host to keep repainting.
    pub fn tick_frame(&mut self) -> bool {
        let strip_running = self.strip.tick();
        let preview_running = match &mut self.preview {
            Some(preview) => preview.channel.tick(),
            None => false,
        };
        strip_running || preview_running
    }

    /// Adopt a new measured layout, keeping scroll offsets inside the
    /// recomputed ranges.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.sync_extents();
    }

    /// Empty the viewer: images, counter, zoom, gesture and both channels
    /// all clear. The current index deliberately survives, so a later
    /// `set_image_list` resumes where the viewer stopped. Safe to call
    /// repeatedly.
    pub fn destroy(&mut self) {
        self.items.clear();
        self.counter.clear();
        self.zoom.reset();
        self.gesture = Gesture::default();
        self.strip.reset();
        if let Some(preview) = &mut self.preview {
            preview.channel.reset();
            preview.highlight = None;
        }
        self.sync_extents();
    }

    fn refresh_counter(&mut self) {
        self.counter = format!("{}/{}", self.current_index + 1, self.items.len());
    }

    fn sync_extents(&mut self) {
        let count = self.items.len();
        self.strip
            .set_extents(self.layout.slot_extent * count as f32, self.layout.strip_viewport);
        if let Some(preview) = &mut self.preview {
            let content = if count == 0 {
                0.0
            } else {
                (count - 1) as f32 * self.layout.thumb_stride + self.layout.thumb_extent
            };
            preview.channel.set_extents(content, self.layout.thumb_viewport);
        }
    }

    // --- read-backs -------------------------------------------------------

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn mount(&self) -> Mount {
        self.mount
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&ImageItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Counter text in `shown/total` form, one-based.
    pub fn counter(&self) -> &str {
        &self.counter
    }

    pub fn strip_offset(&self) -> f32 {
        self.strip.offset()
    }

    pub fn strip_destination(&self) -> Option<f32> {
        self.strip.destination()
    }

    pub fn preview_bar(&self) -> Option<&PreviewBar> {
        self.preview.as_ref()
    }

    pub fn zoom_scale(&self) -> f32 {
        self.zoom.scale()
    }

    pub fn pan_offset(&self) -> Point {
        self.zoom.pan()
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    pub fn is_animating(&self) -> bool {
        self.strip.is_animating()
            || self.preview.as_ref().is_some_and(|preview| preview.is_animating())
    }
}
