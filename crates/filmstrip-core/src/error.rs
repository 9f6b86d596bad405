use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilmstripError {
    #[error("mount does not resolve to a usable area: {width}x{height}")]
    InvalidMount { width: f32, height: f32 },
}

pub type Result<T> = std::result::Result<T, FilmstripError>;
