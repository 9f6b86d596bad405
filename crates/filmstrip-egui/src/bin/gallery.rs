use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use tracing::{error, info};

use filmstrip_egui::textures::TextureStore;
use filmstrip_egui::widget::FilmstripWidget;
use filmstrip_egui::{ImageSource, Mount, Tunables, Viewer, ViewerOptions};

const WINDOW_SIZE: [f32; 2] = [1024.0, 768.0];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

/// Gallery description file: image paths relative to the file itself, plus
/// the viewer options to open them with.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GalleryManifest {
    images: Vec<PathBuf>,
    lazy: bool,
    tunables: Tunables,
}

struct GalleryApp {
    viewer: Viewer,
    widget: FilmstripWidget,
    textures: TextureStore,
    status: String,
}

impl GalleryApp {
    fn new(ctx: &egui::Context, source: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut options = ViewerOptions::default();
        let mut sources = Vec::new();
        let mut status = String::from("No images loaded");

        if let Some(path) = source {
            let loaded = if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml")) {
                load_manifest(&path).map(|(manifest_options, list)| {
                    options = manifest_options;
                    list
                })
            } else {
                scan_folder(&path)
            };
            match loaded {
                Ok(list) => {
                    info!("Loaded {} images from {}", list.len(), path.display());
                    status = format!("{} images from {}", list.len(), path.display());
                    sources = list;
                }
                Err(err) => {
                    error!("Failed to load {}: {err:#}", path.display());
                    status = format!("Failed to load {}: {err:#}", path.display());
                }
            }
        }

        let mut viewer = Viewer::new(options, Mount::new(WINDOW_SIZE[0], WINDOW_SIZE[1]))
            .context("create viewer")?;
        if !sources.is_empty() {
            viewer.set_image_list(sources);
            viewer.set_current_index(0);
        }

        Ok(Self {
            viewer,
            widget: FilmstripWidget::new(),
            textures: TextureStore::new(ctx),
            status,
        })
    }

    fn open_folder(&mut self, folder: &Path) {
        match scan_folder(folder) {
            Ok(sources) => {
                info!("Loaded {} images from {}", sources.len(), folder.display());
                self.status = format!("{} images from {}", sources.len(), folder.display());
                self.viewer.set_image_list(sources);
                if !self.viewer.is_empty() {
                    self.viewer.set_current_index(0);
                }
            }
            Err(err) => {
                error!("Failed to read {}: {err:#}", folder.display());
                self.status = format!("Failed to read {}: {err:#}", folder.display());
            }
        }
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("gallery_controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open Folder…").clicked() {
                    if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                        self.open_folder(&folder);
                    }
                }
                ui.separator();
                ui.label(&self.status);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.widget.show(ui, &mut self.viewer, &mut self.textures);
        });
    }
}

fn load_manifest(path: &Path) -> anyhow::Result<(ViewerOptions, Vec<ImageSource>)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    let manifest: GalleryManifest =
        toml::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    let base = path.parent().unwrap_or(Path::new("."));
    let sources = manifest
        .images
        .iter()
        .map(|image| {
            let resolved = if image.is_absolute() {
                image.clone()
            } else {
                base.join(image)
            };
            ImageSource::Uri(resolved.display().to_string())
        })
        .collect();
    let options = ViewerOptions {
        lazy: manifest.lazy,
        tunables: manifest.tunables,
    };
    Ok((options, sources))
}

fn scan_folder(folder: &Path) -> anyhow::Result<Vec<ImageSource>> {
    let mut paths = Vec::new();
    for entry in
        std::fs::read_dir(folder).with_context(|| format!("read {}", folder.display()))?
    {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if is_image {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths
        .into_iter()
        .map(|path| ImageSource::Uri(path.display().to_string()))
        .collect())
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let source = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size([480.0, 360.0])
            .with_title("Filmstrip Gallery"),
        ..Default::default()
    };

    eframe::run_native(
        "filmstrip-gallery",
        options,
        Box::new(move |cc| Ok(Box::new(GalleryApp::new(&cc.egui_ctx, source)?))),
    )
}
