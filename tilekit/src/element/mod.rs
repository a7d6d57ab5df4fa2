//! In-memory representation of decoded map features.

mod map_element;
mod tag;

pub use map_element::{GeometryType, MapElement, DEFAULT_LAYER};
pub use tag::{
    SealedTagSet, Tag, TagSet, KEY_HEIGHT, KEY_HOUSE_NUMBER, KEY_MIN_HEIGHT, KEY_NAME, KEY_REF,
};
