pub mod textures;
pub mod widget;

pub use filmstrip_core::layout::Mount;
pub use filmstrip_core::viewer::{ImageHandle, ImageSource, Tunables, Viewer, ViewerOptions};
