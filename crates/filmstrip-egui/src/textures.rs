use std::collections::HashMap;
use std::sync::mpsc;

use filmstrip_core::viewer::{ImageHandle, ImageSource};
use tracing::warn;

enum DecodeResult {
    Decoded { uri: String, image: egui::ColorImage },
    Failed { uri: String, message: String },
}

/// Where a requested uri stands.
pub enum TextureState {
    Loading,
    Ready(egui::TextureHandle),
    Failed(String),
}

/// GPU textures for the viewer's image sources. Uri sources are decoded on a
/// background thread and uploaded as results arrive; handle sources are
/// registered directly by the host.
pub struct TextureStore {
    job_tx: mpsc::Sender<String>,
    result_rx: mpsc::Receiver<DecodeResult>,
    by_uri: HashMap<String, TextureState>,
    by_handle: HashMap<ImageHandle, egui::TextureHandle>,
}

impl TextureStore {
    pub fn new(ctx: &egui::Context) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<String>();
        let (result_tx, result_rx) = mpsc::channel();
        spawn_decoder(job_rx, result_tx, ctx.clone());
        Self {
            job_tx,
            result_rx,
            by_uri: HashMap::new(),
            by_handle: HashMap::new(),
        }
    }

    /// Queue a source for decoding unless it has been seen before.
    /// Requesting is idempotent, so callers can re-request every visible
    /// source each frame.
    pub fn request(&mut self, source: &ImageSource) {
        let ImageSource::Uri(uri) = source else {
            return;
        };
        if self.by_uri.contains_key(uri) {
            return;
        }
        self.by_uri.insert(uri.clone(), TextureState::Loading);
        let _ = self.job_tx.send(uri.clone());
    }

    /// Hand over an already-uploaded texture for a handle source.
    pub fn register_handle(&mut self, handle: ImageHandle, texture: egui::TextureHandle) {
        self.by_handle.insert(handle, texture);
    }

    /// Drain finished decodes and upload them. Call once per frame.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                DecodeResult::Decoded { uri, image } => {
                    let texture = ctx.load_texture(&uri, image, egui::TextureOptions::LINEAR);
                    self.by_uri.insert(uri, TextureState::Ready(texture));
                }
                DecodeResult::Failed { uri, message } => {
                    warn!("Failed to decode {uri}: {message}");
                    self.by_uri.insert(uri, TextureState::Failed(message));
                }
            }
        }
    }

    pub fn get(&self, source: &ImageSource) -> Option<&egui::TextureHandle> {
        match source {
            ImageSource::Uri(uri) => match self.by_uri.get(uri) {
                Some(TextureState::Ready(texture)) => Some(texture),
                _ => None,
            },
            ImageSource::Handle(handle) => self.by_handle.get(handle),
        }
    }

    /// Decode failure for a source, if one has been recorded.
    pub fn failure(&self, source: &ImageSource) -> Option<&str> {
        match source {
            ImageSource::Uri(uri) => match self.by_uri.get(uri) {
                Some(TextureState::Failed(message)) => Some(message),
                _ => None,
            },
            ImageSource::Handle(_) => None,
        }
    }
}

/// Spawn the decoder thread. Jobs come in as uris, finished frames go back
/// over the result channel with a repaint request so the UI picks them up.
fn spawn_decoder(
    job_rx: mpsc::Receiver<String>,
    result_tx: mpsc::Sender<DecodeResult>,
    ctx: egui::Context,
) {
    std::thread::Builder::new()
        .name("filmstrip-decoder".into())
        .spawn(move || {
            while let Ok(uri) = job_rx.recv() {
                let result = match decode(&uri) {
                    Ok(image) => DecodeResult::Decoded { uri, image },
                    Err(err) => DecodeResult::Failed {
                        uri,
                        message: err.to_string(),
                    },
                };
                let _ = result_tx.send(result);
                ctx.request_repaint();
            }
        })
        .expect("Failed to spawn decoder thread");
}

fn decode(uri: &str) -> image::ImageResult<egui::ColorImage> {
    let decoded = image::open(uri)?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_flat_samples().as_slice(),
    ))
}
