//! Handles IO related processing: fetching raw tiles and decoding them into map elements.

use thiserror::Error;

use crate::{coords::TileCoords, element::MapElement};

pub mod oscimap2;
pub mod pbf;
pub mod pipeline;
pub mod source;

/// Failures which abort the decoding of a whole tile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of data at byte {0}")]
    Truncated(usize),
    #[error("invalid varint at byte {0}")]
    InvalidVarint(usize),
    #[error("packed field starting at byte {0} does not fit its length")]
    InvalidPackedSize(usize),
    #[error("invalid utf-8 string at byte {0}")]
    InvalidString(usize),
    #[error("unknown tile field {tag} at byte {position}")]
    UnknownField { tag: u32, position: usize },
    #[error("unsupported wire type {0}")]
    UnsupportedWireType(u32),
    #[error("decoding was cancelled")]
    Cancelled,
}

/// Receives the elements of a tile while it is decoded.
pub trait TileDataSink {
    /// Called once per decoded element. The element is reused for the next feature, clone it to
    /// keep it.
    fn process(&mut self, element: &MapElement);

    /// Polled between elements. Decoding stops with [`DecodeError::Cancelled`] once this
    /// returns true.
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> TileDataSink for F
where
    F: FnMut(&MapElement),
{
    fn process(&mut self, element: &MapElement) {
        (self)(element)
    }
}

/// Turns the raw bytes of a tile into map elements.
pub trait TileDecoder: Send {
    fn decode(
        &mut self,
        coords: &TileCoords,
        data: &[u8],
        sink: &mut dyn TileDataSink,
    ) -> Result<(), DecodeError>;
}
