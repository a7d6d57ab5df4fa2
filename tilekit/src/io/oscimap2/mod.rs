//! Decoder for the oscimap2 tile format.
//!
//! A tile starts with a 4 byte big-endian length followed by varint tagged fields. The tile
//! level fields declare the tile-local tags and introduce one element each:
//!
//! | tag | field        | content                                             |
//! |-----|--------------|-----------------------------------------------------|
//! | 1   | `NUM_TAGS`   | number of tile-local tags                           |
//! | 2   | `TAG_KEYS`   | packed indices into [`tags::KEYS`]                  |
//! | 3   | `TAG_VALUES` | one string per field, appended in order             |
//! | 11  | `LINE`       | length delimited element                            |
//! | 12  | `POLY`       | length delimited element                            |
//! | 13  | `POINT`      | length delimited element                            |
//!
//! Element tag references below [`tags::MAX`] index [`tags::TAGS`], references at or above
//! [`tags::LIMIT`] index the tile-local tags.

use log::debug;
use thiserror::Error;

use crate::{
    coords::{TileCoords, DEFAULT_TILE_SIZE, REFERENCE_TILE_SIZE},
    element::{GeometryType, MapElement, Tag, KEY_NAME},
    io::{pbf::PbfReader, DecodeError, TileDataSink, TileDecoder},
    settings::LoaderSettings,
};

mod encoder;
pub mod tags;

pub use encoder::{EncodeError, Oscimap2Encoder};

pub(crate) const TAG_TILE_NUM_TAGS: u32 = 1;
pub(crate) const TAG_TILE_TAG_KEYS: u32 = 2;
pub(crate) const TAG_TILE_TAG_VALUES: u32 = 3;
pub(crate) const TAG_TILE_LINE: u32 = 11;
pub(crate) const TAG_TILE_POLY: u32 = 12;
pub(crate) const TAG_TILE_POINT: u32 = 13;

pub(crate) const TAG_ELEM_NUM_INDICES: u32 = 1;
pub(crate) const TAG_ELEM_TAGS: u32 = 11;
pub(crate) const TAG_ELEM_INDEX: u32 = 12;
pub(crate) const TAG_ELEM_COORDS: u32 = 13;
pub(crate) const TAG_ELEM_LAYER: u32 = 21;
pub(crate) const TAG_ELEM_HEIGHT: u32 = 31;
pub(crate) const TAG_ELEM_MIN_HEIGHT: u32 = 32;
pub(crate) const TAG_ELEM_PRIORITY: u32 = 41;

/// Reasons for skipping a single element. The rest of the tile is still decoded.
#[derive(Error, Debug)]
enum ElementError {
    #[error("tag reference {0} is not defined")]
    InvalidTag(u32),
    #[error("element has an empty tag list")]
    NoTags,
    #[error("element declares no index")]
    NoIndex,
    #[error("index has {actual} entries but {expected} were declared")]
    IndexCount { expected: usize, actual: usize },
    #[error("expected {expected} points but read {actual}")]
    CoordinateCount { expected: usize, actual: usize },
    #[error(transparent)]
    Read(#[from] DecodeError),
}

/// Index of a static tag.
pub fn tag_index(key: &str, value: &str) -> Option<u32> {
    tags::TAGS
        .iter()
        .position(|tag| tag.key == key && tag.value == value)
        .map(|index| index as u32)
}

/// Index of a key tile-local tags may use.
pub fn key_index(key: &str) -> Option<u32> {
    tags::KEYS
        .iter()
        .position(|k| *k == key)
        .map(|index| index as u32)
}

/// Streaming oscimap2 decoder. One instance is owned by each worker; the element and tag
/// buffers are reused across tiles.
pub struct Oscimap2Decoder {
    scale: f32,
    element: MapElement,
    tile_tags: Vec<Option<Tag>>,
    tag_keys: Vec<u32>,
    scratch: Vec<u32>,
}

impl Default for Oscimap2Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE)
    }
}

impl Oscimap2Decoder {
    pub fn new(tile_size: u32) -> Self {
        Self::with_scale(REFERENCE_TILE_SIZE as f32 / tile_size.max(1) as f32)
    }

    pub fn from_settings(settings: &LoaderSettings) -> Self {
        Self::with_scale(settings.coordinate_scale())
    }

    /// `scale` divides the encoded coordinates.
    pub fn with_scale(scale: f32) -> Self {
        Self {
            scale,
            element: MapElement::new(),
            tile_tags: Vec::with_capacity(20),
            tag_keys: Vec::with_capacity(20),
            scratch: Vec::with_capacity(100),
        }
    }

    fn decode_tile_tag(&mut self, coords: &TileCoords, value: String, num_tags: usize) {
        let current = self.tile_tags.len();

        if current >= num_tags || current >= self.tag_keys.len() {
            debug!("{coords} tag value {value:?} exceeds the declared tag count {num_tags}");
            return;
        }

        let key_index = self.tag_keys[current] as usize;
        let tag = match tags::KEYS.get(key_index) {
            Some(key) => Some(Tag::new(*key, value, *key != KEY_NAME)),
            None => {
                debug!("{coords} tag {current} refers to unknown key {key_index}");
                None
            }
        };

        self.tile_tags.push(tag);
    }

    fn decode_element_tags(&mut self, reader: &mut PbfReader) -> Result<(), ElementError> {
        reader.read_packed_u32(&mut self.scratch)?;

        self.element.tags.clear();
        for &reference in &self.scratch {
            let tag = if reference < tags::MAX {
                tags::TAGS[reference as usize].clone()
            } else {
                reference
                    .checked_sub(tags::LIMIT)
                    .and_then(|local| self.tile_tags.get(local as usize))
                    .and_then(|tag| tag.clone())
                    .ok_or(ElementError::InvalidTag(reference))?
            };
            // The element tag set is never sealed while decoding.
            let _ = self.element.tags.push(tag);
        }

        if self.element.tags.is_empty() {
            return Err(ElementError::NoTags);
        }
        Ok(())
    }

    fn decode_element_fields(
        &mut self,
        reader: &mut PbfReader,
        geometry_type: GeometryType,
    ) -> Result<(), ElementError> {
        let mut index_count = 1usize;
        let mut coord_count = 0usize;

        self.element.clear();
        if geometry_type.is_point() {
            coord_count = 1;
            self.element.index.push(2);
        }

        while reader.has_data() {
            let value = reader.read_varint32()?;
            if value == 0 {
                break;
            }

            match value >> 3 {
                TAG_ELEM_TAGS => self.decode_element_tags(reader)?,
                TAG_ELEM_NUM_INDICES => index_count = reader.read_varint32()? as usize,
                TAG_ELEM_INDEX => {
                    reader.read_packed_u32(&mut self.scratch)?;
                    if self.scratch.len() > index_count {
                        return Err(ElementError::IndexCount {
                            expected: index_count,
                            actual: self.scratch.len(),
                        });
                    }

                    self.element.index.clear();
                    coord_count = 0;
                    for &count in &self.scratch {
                        coord_count += count as usize;
                        self.element.index.push((count as i32).saturating_mul(2));
                    }
                }
                TAG_ELEM_COORDS => {
                    let count =
                        reader.read_interleaved_points(self.scale, &mut self.element.points)?;
                    if count != coord_count {
                        return Err(ElementError::CoordinateCount {
                            expected: coord_count,
                            actual: count,
                        });
                    }
                }
                TAG_ELEM_LAYER => self.element.layer = reader.read_varint32()? as i32,
                TAG_ELEM_HEIGHT => self.element.height = reader.read_varint32()? as i32,
                TAG_ELEM_MIN_HEIGHT => self.element.min_height = reader.read_varint32()? as i32,
                TAG_ELEM_PRIORITY => self.element.priority = reader.read_varint32()? as i32,
                tag => {
                    debug!("skipping unknown element field {tag}");
                    reader.skip(value & 7)?;
                }
            }
        }

        if index_count == 0 || self.element.index.is_empty() {
            return Err(ElementError::NoIndex);
        }

        if self.element.num_points() != coord_count {
            return Err(ElementError::CoordinateCount {
                expected: coord_count,
                actual: self.element.num_points(),
            });
        }

        self.element.geometry_type = geometry_type;
        Ok(())
    }

    /// Decodes one element. Element level problems skip the element, only a length running
    /// past the end of the tile fails the tile.
    fn decode_element(
        &mut self,
        coords: &TileCoords,
        reader: &mut PbfReader,
        geometry_type: GeometryType,
        sink: &mut dyn TileDataSink,
    ) -> Result<(), DecodeError> {
        let end = reader.read_field_end()?;
        let limit = reader.limit();
        reader.set_limit(end)?;

        let result = self.decode_element_fields(reader, geometry_type);

        reader.set_limit(limit)?;
        reader.seek(end);

        match result {
            Ok(()) => sink.process(&self.element),
            Err(err) => debug!("{coords} skipping {geometry_type:?} element: {err}"),
        }
        Ok(())
    }
}

impl TileDecoder for Oscimap2Decoder {
    #[tracing::instrument(skip_all)]
    fn decode(
        &mut self,
        coords: &TileCoords,
        data: &[u8],
        sink: &mut dyn TileDataSink,
    ) -> Result<(), DecodeError> {
        let mut reader = PbfReader::new(data);

        let length = reader.read_u32_be()? as usize;
        reader.set_limit(reader.position().saturating_add(length))?;

        self.tile_tags.clear();
        self.tag_keys.clear();
        let mut num_tags = 0usize;

        while reader.has_data() {
            let position = reader.position();
            let value = reader.read_varint32()?;
            if value == 0 {
                break;
            }

            match value >> 3 {
                TAG_TILE_NUM_TAGS => num_tags = reader.read_varint32()? as usize,
                TAG_TILE_TAG_KEYS => {
                    reader.read_packed_u32(&mut self.tag_keys)?;
                    if self.tag_keys.len() > num_tags {
                        return Err(DecodeError::InvalidPackedSize(position));
                    }
                }
                TAG_TILE_TAG_VALUES => {
                    let value = reader.read_string()?;
                    self.decode_tile_tag(coords, value, num_tags);
                }
                tag @ (TAG_TILE_LINE | TAG_TILE_POLY | TAG_TILE_POINT) => {
                    if sink.is_cancelled() {
                        return Err(DecodeError::Cancelled);
                    }

                    let geometry_type = match tag {
                        TAG_TILE_LINE => GeometryType::Line,
                        TAG_TILE_POLY => GeometryType::Polygon,
                        _ => GeometryType::Point,
                    };
                    self.decode_element(coords, &mut reader, geometry_type, sink)?;
                }
                tag => {
                    debug!("{coords} invalid field {tag} in tile");
                    return Err(DecodeError::UnknownField { tag, position });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bytes::BufMut;
    use prost::encoding::encode_varint;

    use crate::{
        coords::TileCoords,
        element::{GeometryType, MapElement, Tag},
        io::{
            oscimap2::{
                key_index, tag_index, tags, Oscimap2Decoder, Oscimap2Encoder, TAG_ELEM_TAGS,
                TAG_TILE_NUM_TAGS, TAG_TILE_POINT, TAG_TILE_TAG_KEYS, TAG_TILE_TAG_VALUES,
            },
            DecodeError, TileDecoder,
        },
    };

    fn decode(data: &[u8]) -> Result<Vec<MapElement>, DecodeError> {
        let mut elements = Vec::new();
        let mut sink = |element: &MapElement| elements.push(element.clone());
        Oscimap2Decoder::new(256).decode(&TileCoords::from((0, 0, 0)), data, &mut sink)?;
        Ok(elements)
    }

    fn element(geometry_type: GeometryType, points: &[(f32, f32)], tags: &[Tag]) -> MapElement {
        let mut element = MapElement::new();
        element.start(geometry_type);
        for (x, y) in points {
            element.add_point(*x, *y);
        }
        for tag in tags {
            element.tags.push(tag.clone()).unwrap();
        }
        element
    }

    fn with_prefix(body: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.put_u32(body.len() as u32);
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn test_static_tables() {
        assert_eq!(tags::TAGS.len(), tags::MAX as usize);
        assert_eq!(tag_index("building", "yes"), Some(0));
        assert!(tag_index("natural", "water").is_some());
        assert!(key_index("name").is_some());
        assert_eq!(key_index("no such key"), None);
    }

    #[test]
    fn test_decode_elements() {
        let mut encoder = Oscimap2Encoder::new(256);
        let mut water = element(
            GeometryType::Polygon,
            &[(0.0, 0.0), (128.0, 0.0), (128.0, 128.0), (0.0, 128.0)],
            &[Tag::fixed("natural", "water")],
        );
        water.layer = 3;
        encoder.add_element(&water).unwrap();
        encoder
            .add_element(&element(
                GeometryType::Line,
                &[(10.0, 10.0), (200.5, 10.0)],
                &[
                    Tag::fixed("highway", "residential"),
                    Tag::new("name", "Leopoldstraße", false),
                ],
            ))
            .unwrap();
        encoder
            .add_element(&element(
                GeometryType::Point,
                &[(64.0, 32.0)],
                &[Tag::fixed("amenity", "cafe"), Tag::new("addr:housenumber", "7", true)],
            ))
            .unwrap();

        let elements = decode(&encoder.finish()).unwrap();
        assert_eq!(elements.len(), 3);

        assert_eq!(elements[0].geometry_type, GeometryType::Polygon);
        assert_eq!(elements[0].index, vec![8]);
        assert_eq!(elements[0].layer, 3);
        assert_eq!(elements[0].points[2], 128.0);
        assert_eq!(elements[0].tags.value("natural"), Some("water"));

        assert_eq!(elements[1].geometry_type, GeometryType::Line);
        assert_eq!(elements[1].points, vec![10.0, 10.0, 200.5, 10.0]);
        let name = elements[1].tags.get("name").unwrap();
        assert_eq!(name.value, "Leopoldstraße");
        assert!(!name.variable);

        assert_eq!(elements[2].geometry_type, GeometryType::Point);
        assert_eq!(elements[2].index, vec![2]);
        assert_eq!(elements[2].point(0), Some((64.0, 32.0)));
        assert!(elements[2].tags.get("addr:housenumber").unwrap().variable);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let mut encoder = Oscimap2Encoder::new(256);
        encoder
            .add_element(&element(
                GeometryType::Line,
                &[(1.0, 1.0), (2.0, 3.0), (5.0, 8.0)],
                &[Tag::fixed("highway", "primary")],
            ))
            .unwrap();
        let data = encoder.finish();

        assert_eq!(decode(&data).unwrap(), decode(&data).unwrap());
    }

    #[test]
    fn test_tag_value_beyond_declared_count() {
        let key = key_index("name").unwrap() as u64;

        let mut body = Vec::new();
        encode_varint((TAG_TILE_NUM_TAGS << 3) as u64, &mut body);
        encode_varint(1, &mut body);
        encode_varint(((TAG_TILE_TAG_KEYS << 3) | 2) as u64, &mut body);
        encode_varint(1, &mut body);
        encode_varint(key, &mut body);
        for value in ["first", "second"] {
            encode_varint(((TAG_TILE_TAG_VALUES << 3) | 2) as u64, &mut body);
            encode_varint(value.len() as u64, &mut body);
            body.extend_from_slice(value.as_bytes());
        }

        let mut encoder = Oscimap2Encoder::new(256);
        encoder
            .add_element(&element(
                GeometryType::Point,
                &[(1.0, 1.0)],
                &[Tag::fixed("amenity", "cafe")],
            ))
            .unwrap();
        let tile = encoder.finish();
        // skip the length prefix and the empty tag table of the encoded tile
        body.extend_from_slice(&tile[4..]);

        let elements = decode(&with_prefix(&body)).unwrap();
        assert_eq!(elements.len(), 1);
    }

    #[test]
    fn test_invalid_tag_skips_element() {
        let mut encoder = Oscimap2Encoder::new(256);
        encoder
            .add_element(&element(
                GeometryType::Point,
                &[(1.0, 1.0)],
                &[Tag::fixed("amenity", "cafe")],
            ))
            .unwrap();
        let valid = encoder.finish();

        let mut body = Vec::new();
        // element referencing tile-local tag 5 which does not exist
        let mut element = Vec::new();
        encode_varint(((TAG_ELEM_TAGS << 3) | 2) as u64, &mut element);
        encode_varint(2, &mut element);
        encode_varint((tags::LIMIT + 5) as u64, &mut element);
        encode_varint(((TAG_TILE_POINT << 3) | 2) as u64, &mut body);
        encode_varint(element.len() as u64, &mut body);
        body.extend_from_slice(&element);
        body.extend_from_slice(&valid[4..]);

        let elements = decode(&with_prefix(&body)).unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].tags.value("amenity"), Some("cafe"));
    }

    #[test]
    fn test_structural_errors_fail_tile() {
        let mut body = Vec::new();
        encode_varint((7u32 << 3) as u64, &mut body);
        encode_varint(1, &mut body);
        assert!(matches!(
            decode(&with_prefix(&body)),
            Err(DecodeError::UnknownField { tag: 7, .. })
        ));

        let mut encoder = Oscimap2Encoder::new(256);
        encoder
            .add_element(&element(
                GeometryType::Line,
                &[(1.0, 1.0), (20.0, 20.0)],
                &[Tag::fixed("highway", "primary")],
            ))
            .unwrap();
        let data = encoder.finish();
        let truncated = with_prefix(&data[4..data.len() - 2]);
        assert!(matches!(decode(&truncated), Err(DecodeError::Truncated(_))));
        assert!(matches!(decode(&data[..2]), Err(DecodeError::Truncated(0))));
    }

    #[test]
    fn test_cancelled() {
        struct Cancelled;

        impl crate::io::TileDataSink for Cancelled {
            fn process(&mut self, _element: &MapElement) {
                panic!("no element expected");
            }

            fn is_cancelled(&self) -> bool {
                true
            }
        }

        let mut encoder = Oscimap2Encoder::new(256);
        encoder
            .add_element(&element(
                GeometryType::Point,
                &[(1.0, 1.0)],
                &[Tag::fixed("amenity", "cafe")],
            ))
            .unwrap();

        let result = Oscimap2Decoder::new(256).decode(
            &TileCoords::from((0, 0, 0)),
            &encoder.finish(),
            &mut Cancelled,
        );
        assert_eq!(result, Err(DecodeError::Cancelled));
    }
}
