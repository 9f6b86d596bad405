use filmstrip_core::layout::{Layout, Mount, Point};
use filmstrip_core::viewer::{ImageItem, Viewer};

use crate::textures::TextureStore;

/// Embeds a [`Viewer`] in an egui ui: feeds it touch, drag and wheel input,
/// ticks its animations, and paints the strip, counter badge and preview
/// bar. Keep one widget per viewer across frames, it carries the touch
/// bookkeeping between events.
pub struct FilmstripWidget {
    touches: Vec<(u64, Point)>,
    pointer_drag: bool,
}

impl Default for FilmstripWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl FilmstripWidget {
    pub fn new() -> Self {
        Self {
            touches: Vec::new(),
            pointer_drag: false,
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        viewer: &mut Viewer,
        textures: &mut TextureStore,
    ) -> egui::Response {
        let rect = ui.available_rect_before_wrap();
        let mut layout = Layout::for_mount(&Mount::new(rect.width(), rect.height()));
        if let Some(size) = current_image_size(viewer, textures, &layout, rect) {
            layout.image_size = size;
        }
        viewer.set_layout(layout);
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        let bar = viewer
            .preview_bar()
            .is_some()
            .then(|| preview_bar_rect(rect, viewer.layout()));

        self.handle_touches(ui, viewer, rect, bar);
        self.handle_pointer_drag(&response, viewer, rect, bar);

        if response.double_clicked() {
            let over_bar = response
                .interact_pointer_pos()
                .zip(bar)
                .is_some_and(|(pos, bar)| bar.contains(pos));
            if !over_bar {
                viewer.double_tap();
            }
        }

        if response.hovered() {
            let wheel: Vec<f32> = ui.input(|input| {
                input
                    .events
                    .iter()
                    .filter_map(|event| match event {
                        egui::Event::MouseWheel { delta, .. } => Some(delta.y),
                        _ => None,
                    })
                    .collect()
            });
            for dy in wheel {
                if dy != 0.0 {
                    // Wheel-down advances; egui reports that as negative y.
                    viewer.wheel(-dy);
                }
            }
        }

        if let Some(bar) = bar {
            let bar_response = ui.interact(bar, ui.id().with("preview_bar"), egui::Sense::click());
            if bar_response.clicked() {
                if let Some(pos) = bar_response.interact_pointer_pos() {
                    let offset = viewer.preview_bar().map_or(0.0, |preview| preview.offset());
                    let layout = *viewer.layout();
                    let hit = thumb_hit(
                        pos.x - bar.left() + offset,
                        layout.thumb_stride,
                        layout.thumb_extent,
                        viewer.len(),
                    );
                    if let Some(index) = hit {
                        viewer.thumb_click(index);
                    }
                }
            }
        }

        textures.poll(ui.ctx());
        for item in viewer.items() {
            if let Some(source) = item.display_source() {
                textures.request(source);
            }
        }

        if viewer.tick_frame() {
            ui.ctx().request_repaint();
        }

        paint(ui, rect, bar, viewer, textures);

        response
    }

    /// Replay this frame's touch events into the viewer, keeping the contact
    /// list current. Touches starting on the preview bar are left to the bar
    /// click handling. When one finger of several lifts, the gesture ends
    /// and a fresh one starts from the remaining contacts.
    fn handle_touches(
        &mut self,
        ui: &egui::Ui,
        viewer: &mut Viewer,
        rect: egui::Rect,
        bar: Option<egui::Rect>,
    ) {
        let events: Vec<(u64, egui::TouchPhase, egui::Pos2)> = ui.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Touch { id, phase, pos, .. } => Some((id.0, *phase, *pos)),
                    _ => None,
                })
                .collect()
        });
        for (id, phase, pos) in events {
            match phase {
                egui::TouchPhase::Start => {
                    if bar.is_some_and(|bar| bar.contains(pos)) {
                        continue;
                    }
                    self.upsert_touch(id, local_point(pos, rect));
                    viewer.touch_start(&self.touch_points());
                }
                egui::TouchPhase::Move => {
                    if self.update_touch(id, local_point(pos, rect)) {
                        viewer.touch_move(&self.touch_points());
                    }
                }
                egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                    if self.remove_touch(id) {
                        viewer.touch_end();
                        let remaining = self.touch_points();
                        if !remaining.is_empty() {
                            viewer.touch_start(&remaining);
                        }
                    }
                }
            }
        }
    }

    /// Mouse fallback: a primary-button drag acts as a single touch. Only
    /// active while no real touches are down, so touchscreens are not fed
    /// twice through egui's synthesized pointer.
    fn handle_pointer_drag(
        &mut self,
        response: &egui::Response,
        viewer: &mut Viewer,
        rect: egui::Rect,
        bar: Option<egui::Rect>,
    ) {
        if !self.touches.is_empty() {
            self.pointer_drag = false;
            return;
        }
        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                if !bar.is_some_and(|bar| bar.contains(pos)) {
                    self.pointer_drag = true;
                    viewer.touch_start(&[local_point(pos, rect)]);
                }
            }
        } else if self.pointer_drag && response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                viewer.touch_move(&[local_point(pos, rect)]);
            }
        } else if self.pointer_drag && response.drag_stopped_by(egui::PointerButton::Primary) {
            self.pointer_drag = false;
            viewer.touch_end();
        }
    }

    fn upsert_touch(&mut self, id: u64, point: Point) {
        match self.touches.iter_mut().find(|(touch_id, _)| *touch_id == id) {
            Some(entry) => entry.1 = point,
            None => self.touches.push((id, point)),
        }
    }

    fn update_touch(&mut self, id: u64, point: Point) -> bool {
        match self.touches.iter_mut().find(|(touch_id, _)| *touch_id == id) {
            Some(entry) => {
                entry.1 = point;
                true
            }
            None => false,
        }
    }

    fn remove_touch(&mut self, id: u64) -> bool {
        let before = self.touches.len();
        self.touches.retain(|(touch_id, _)| *touch_id != id);
        self.touches.len() != before
    }

    fn touch_points(&self) -> Vec<Point> {
        self.touches.iter().map(|(_, point)| *point).collect()
    }
}

/// On-screen size of the current image inside its slot, once its texture is
/// up. Pan clamping tracks what is actually drawn rather than the mount.
fn current_image_size(
    viewer: &Viewer,
    textures: &TextureStore,
    layout: &Layout,
    rect: egui::Rect,
) -> Option<[f32; 2]> {
    let item = viewer.item(viewer.current_index())?;
    let texture = textures.get(item.display_source()?)?;
    let size = texture.size_vec2();
    Some(fit_size([size.x, size.y], [layout.slot_extent, rect.height()]))
}

fn preview_bar_rect(rect: egui::Rect, layout: &Layout) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(
            rect.center().x - layout.thumb_viewport / 2.0,
            rect.bottom() - layout.thumb_extent,
        ),
        egui::vec2(layout.thumb_viewport, layout.thumb_extent),
    )
}

fn paint(
    ui: &egui::Ui,
    rect: egui::Rect,
    bar: Option<egui::Rect>,
    viewer: &Viewer,
    textures: &TextureStore,
) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(204));
    paint_strip(&painter, rect, viewer, textures);
    if !viewer.counter().is_empty() {
        paint_counter(&painter, rect, viewer.counter());
    }
    if let Some(bar) = bar {
        paint_preview_bar(&painter, bar, viewer, textures);
    }
}

fn paint_strip(painter: &egui::Painter, rect: egui::Rect, viewer: &Viewer, textures: &TextureStore) {
    let slot = viewer.layout().slot_extent;
    if slot <= 0.0 {
        return;
    }
    let offset = viewer.strip_offset();
    let zoom = viewer.zoom_scale();
    let pan = viewer.pan_offset();
    for (index, item) in viewer.items().iter().enumerate() {
        let left = rect.left() + index as f32 * slot - offset;
        if left + slot < rect.left() || left > rect.right() {
            continue;
        }
        let Some(source) = item.display_source() else {
            continue;
        };
        let slot_rect = egui::Rect::from_min_size(
            egui::pos2(left, rect.top()),
            egui::vec2(slot, rect.height()),
        );
        let Some(texture) = textures.get(source) else {
            if let Some(message) = textures.failure(source) {
                painter.text(
                    slot_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    message,
                    egui::FontId::proportional(12.0),
                    egui::Color32::from_gray(100),
                );
            }
            continue;
        };
        let texture_size = texture.size_vec2();
        let fitted = fit_size(
            [texture_size.x, texture_size.y],
            [slot_rect.width(), slot_rect.height()],
        );
        // Zoom and pan only ever apply to the image being viewed.
        let (center, size) = if index == viewer.current_index() {
            (
                slot_rect.center() + egui::vec2(pan.x, pan.y),
                egui::vec2(fitted[0] * zoom, fitted[1] * zoom),
            )
        } else {
            (slot_rect.center(), egui::vec2(fitted[0], fitted[1]))
        };
        painter.image(
            texture.id(),
            egui::Rect::from_center_size(center, size),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}

fn paint_counter(painter: &egui::Painter, rect: egui::Rect, text: &str) {
    let radius = 12.5;
    let center = egui::pos2(rect.left() + 10.0 + radius, rect.bottom() - 10.0 - radius);
    painter.circle_filled(center, radius, egui::Color32::from_black_alpha(128));
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(12.0),
        egui::Color32::WHITE,
    );
}

fn paint_preview_bar(
    painter: &egui::Painter,
    bar: egui::Rect,
    viewer: &Viewer,
    textures: &TextureStore,
) {
    let Some(preview) = viewer.preview_bar() else {
        return;
    };
    let painter = painter.with_clip_rect(bar);
    painter.rect_filled(bar, 0.0, egui::Color32::from_gray(238));
    let layout = viewer.layout();
    let highlight = preview.highlight();
    let mut highlighted_tile = None;
    for (index, item) in viewer.items().iter().enumerate() {
        let left = bar.left() + index as f32 * layout.thumb_stride - preview.offset();
        if left + layout.thumb_extent < bar.left() || left > bar.right() {
            continue;
        }
        let tile = egui::Rect::from_min_size(
            egui::pos2(left, bar.top()),
            egui::vec2(layout.thumb_extent, layout.thumb_extent),
        );
        if highlight == Some(index) {
            highlighted_tile = Some((tile, item));
            continue;
        }
        paint_tile(&painter, tile, item, textures, false);
    }
    // The selected tile paints last so its outline sits on top of the
    // overlapping neighbours.
    if let Some((tile, item)) = highlighted_tile {
        paint_tile(&painter, tile, item, textures, true);
    }
}

fn paint_tile(
    painter: &egui::Painter,
    tile: egui::Rect,
    item: &ImageItem,
    textures: &TextureStore,
    highlighted: bool,
) {
    match item.display_source().and_then(|source| textures.get(source)) {
        Some(texture) => {
            let size = texture.size_vec2();
            let uv = uv_cover([size.x, size.y], [tile.width(), tile.height()]);
            painter.image(texture.id(), tile, uv, egui::Color32::WHITE);
        }
        None => {
            painter.rect_filled(tile, 0.0, egui::Color32::from_gray(221));
        }
    }
    let stroke_color = if highlighted {
        egui::Color32::WHITE
    } else {
        egui::Color32::from_gray(170)
    };
    painter.rect_stroke(
        tile,
        0.0,
        egui::Stroke::new(3.0, stroke_color),
        egui::epaint::StrokeKind::Inside,
    );
}

/// Shrink an image to fit inside `bounds`, never growing it.
fn fit_size(image: [f32; 2], bounds: [f32; 2]) -> [f32; 2] {
    if image[0] <= 0.0 || image[1] <= 0.0 {
        return [0.0, 0.0];
    }
    let ratio = (bounds[0] / image[0]).min(bounds[1] / image[1]).min(1.0);
    [image[0] * ratio, image[1] * ratio]
}

/// Uv crop that fills a tile with the middle of an image, cutting the
/// overflowing axis.
fn uv_cover(image: [f32; 2], tile: [f32; 2]) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if image[0] <= 0.0 || image[1] <= 0.0 || tile[0] <= 0.0 || tile[1] <= 0.0 {
        return full;
    }
    let image_aspect = image[0] / image[1];
    let tile_aspect = tile[0] / tile[1];
    if image_aspect > tile_aspect {
        let kept = tile_aspect / image_aspect;
        egui::Rect::from_min_max(
            egui::pos2((1.0 - kept) / 2.0, 0.0),
            egui::pos2((1.0 + kept) / 2.0, 1.0),
        )
    } else {
        let kept = image_aspect / tile_aspect;
        egui::Rect::from_min_max(
            egui::pos2(0.0, (1.0 - kept) / 2.0),
            egui::pos2(1.0, (1.0 + kept) / 2.0),
        )
    }
}

/// Map an x position in bar content coordinates to the tile under it.
/// Strides overlap by a few units; in the overlap the later tile wins, the
/// same way the topmost of two stacked tiles takes the click.
fn thumb_hit(content_x: f32, stride: f32, extent: f32, count: usize) -> Option<usize> {
    if count == 0 || content_x < 0.0 || stride <= 0.0 {
        return None;
    }
    let index = (content_x / stride).floor() as usize;
    if index < count {
        return Some(index);
    }
    // The last tile sticks out past its stride slot.
    let last = count - 1;
    (content_x <= last as f32 * stride + extent).then_some(last)
}

fn local_point(pos: egui::Pos2, rect: egui::Rect) -> Point {
    Point::new(pos.x - rect.left(), pos.y - rect.top())
}
