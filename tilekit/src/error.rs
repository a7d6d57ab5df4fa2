//! Errors which can happen in various parts of the library.

use lyon::tessellation::TessellationError;
use thiserror::Error;

use crate::{
    io::{oscimap2::EncodeError, source::FetchError, DecodeError},
    theme::ThemeError,
    tile::LoadError,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid theme")]
    Theme(#[from] ThemeError),
    #[error("failed to decode tile")]
    Decode(#[from] DecodeError),
    #[error("failed to encode tile")]
    Encode(#[from] EncodeError),
    #[error("failed to fetch tile")]
    Fetch(#[from] FetchError),
    #[error("failed to load tile")]
    Load(#[from] LoadError),
    #[error("tessellation failed: {0:?}")]
    Tessellation(TessellationError),
    #[error("invalid settings")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("tile worker {0} panicked")]
    WorkerPanicked(usize),
}

impl From<TessellationError> for Error {
    fn from(e: TessellationError) -> Self {
        Error::Tessellation(e)
    }
}
