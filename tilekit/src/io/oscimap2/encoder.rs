//! Writes oscimap2 tiles.

use std::collections::HashMap;

use bytes::BufMut;
use prost::encoding::encode_varint;
use thiserror::Error;

use crate::{
    coords::REFERENCE_TILE_SIZE,
    element::{GeometryType, MapElement, DEFAULT_LAYER},
    io::{
        oscimap2::{
            key_index, tag_index, tags, TAG_ELEM_COORDS, TAG_ELEM_HEIGHT, TAG_ELEM_INDEX,
            TAG_ELEM_LAYER, TAG_ELEM_MIN_HEIGHT, TAG_ELEM_NUM_INDICES, TAG_ELEM_PRIORITY,
            TAG_ELEM_TAGS, TAG_TILE_LINE, TAG_TILE_NUM_TAGS, TAG_TILE_POINT, TAG_TILE_POLY,
            TAG_TILE_TAG_KEYS, TAG_TILE_TAG_VALUES,
        },
        pbf::{zigzag_encode, WIRE_LENGTH_DELIMITED, WIRE_VARINT},
    },
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("tag key {0:?} is neither static nor a known tile tag key")]
    UnknownKey(String),
    #[error("cannot encode an element without geometry type")]
    MissingGeometryType,
    #[error("element has no points")]
    NoPoints,
}

fn write_field_key(buf: &mut Vec<u8>, tag: u32, wire_type: u32) {
    encode_varint(((tag << 3) | wire_type) as u64, buf);
}

fn write_varint_field(buf: &mut Vec<u8>, tag: u32, value: u64) {
    write_field_key(buf, tag, WIRE_VARINT);
    encode_varint(value, buf);
}

fn write_packed_field(buf: &mut Vec<u8>, tag: u32, values: impl IntoIterator<Item = u32>) {
    let mut packed = Vec::new();
    for value in values {
        encode_varint(value as u64, &mut packed);
    }
    write_bytes_field(buf, tag, &packed);
}

fn write_bytes_field(buf: &mut Vec<u8>, tag: u32, bytes: &[u8]) {
    write_field_key(buf, tag, WIRE_LENGTH_DELIMITED);
    encode_varint(bytes.len() as u64, buf);
    buf.put_slice(bytes);
}

/// Accumulates elements and produces the bytes of one tile. Tags found in the static table are
/// referenced directly, all other tags become tile-local tags.
pub struct Oscimap2Encoder {
    scale: f32,
    tile_tags: Vec<(u32, String)>,
    tile_tag_lookup: HashMap<(u32, String), u32>,
    elements: Vec<u8>,
}

impl Oscimap2Encoder {
    pub fn new(tile_size: u32) -> Self {
        Self {
            scale: REFERENCE_TILE_SIZE as f32 / tile_size.max(1) as f32,
            tile_tags: Vec::new(),
            tile_tag_lookup: HashMap::new(),
            elements: Vec::new(),
        }
    }

    fn tag_reference(&mut self, key: &str, value: &str) -> Result<u32, EncodeError> {
        if let Some(index) = tag_index(key, value) {
            return Ok(index);
        }

        let key = key_index(key).ok_or_else(|| EncodeError::UnknownKey(key.to_string()))?;
        let next = self.tile_tags.len() as u32;
        let local = *self
            .tile_tag_lookup
            .entry((key, value.to_string()))
            .or_insert_with(|| next);
        if local == next {
            self.tile_tags.push((key, value.to_string()));
        }

        Ok(tags::LIMIT + local)
    }

    pub fn add_element(&mut self, element: &MapElement) -> Result<(), EncodeError> {
        let tile_tag = match element.geometry_type {
            GeometryType::None => return Err(EncodeError::MissingGeometryType),
            GeometryType::Point => TAG_TILE_POINT,
            GeometryType::Line => TAG_TILE_LINE,
            GeometryType::Polygon => TAG_TILE_POLY,
        };
        if element.points.is_empty() {
            return Err(EncodeError::NoPoints);
        }

        let mut references = Vec::with_capacity(element.tags.len());
        for tag in &element.tags {
            references.push(self.tag_reference(&tag.key, &tag.value)?);
        }

        let mut body = Vec::new();
        if !references.is_empty() {
            write_packed_field(&mut body, TAG_ELEM_TAGS, references);
        }

        let ring_lengths: Vec<u32> = element
            .ring_lengths()
            .map(|length| (length / 2) as u32)
            .collect();
        let single_point = element.geometry_type.is_point() && element.num_points() == 1;
        if !single_point {
            if ring_lengths.len() != 1 {
                write_varint_field(&mut body, TAG_ELEM_NUM_INDICES, ring_lengths.len() as u64);
            }
            write_packed_field(&mut body, TAG_ELEM_INDEX, ring_lengths);
        }

        let mut coords = Vec::new();
        let mut last = [0i32; 2];
        for (i, value) in element.points.iter().enumerate() {
            let axis = i & 1;
            let scaled = (value * self.scale).round() as i32;
            encode_varint(zigzag_encode(scaled - last[axis]) as u64, &mut coords);
            last[axis] = scaled;
        }
        write_bytes_field(&mut body, TAG_ELEM_COORDS, &coords);

        if element.layer != DEFAULT_LAYER {
            write_varint_field(&mut body, TAG_ELEM_LAYER, element.layer.max(0) as u64);
        }
        if element.height != 0 {
            write_varint_field(&mut body, TAG_ELEM_HEIGHT, element.height.max(0) as u64);
        }
        if element.min_height != 0 {
            write_varint_field(&mut body, TAG_ELEM_MIN_HEIGHT, element.min_height.max(0) as u64);
        }
        if element.priority != 0 {
            write_varint_field(&mut body, TAG_ELEM_PRIORITY, element.priority.max(0) as u64);
        }

        write_bytes_field(&mut self.elements, tile_tag, &body);
        Ok(())
    }

    /// Writes the length prefix, the tile-local tag table and all elements.
    pub fn finish(self) -> Vec<u8> {
        let mut body = Vec::new();

        if !self.tile_tags.is_empty() {
            write_varint_field(&mut body, TAG_TILE_NUM_TAGS, self.tile_tags.len() as u64);
            write_packed_field(
                &mut body,
                TAG_TILE_TAG_KEYS,
                self.tile_tags.iter().map(|(key, _)| *key),
            );
            for (_, value) in &self.tile_tags {
                write_bytes_field(&mut body, TAG_TILE_TAG_VALUES, value.as_bytes());
            }
        }
        body.extend_from_slice(&self.elements);

        let mut data = Vec::with_capacity(body.len() + 4);
        data.put_u32(body.len() as u32);
        data.extend_from_slice(&body);
        data
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        coords::TileCoords,
        element::{GeometryType, MapElement, Tag},
        io::{
            oscimap2::{tags, EncodeError, Oscimap2Decoder, Oscimap2Encoder},
            TileDecoder,
        },
    };

    fn point(tags: &[Tag]) -> MapElement {
        let mut element = MapElement::new();
        element.start(GeometryType::Point);
        element.add_point(8.0, 16.0);
        for tag in tags {
            element.tags.push(tag.clone()).unwrap();
        }
        element
    }

    fn decode(data: &[u8]) -> Vec<Vec<(String, String)>> {
        let mut decoded = Vec::new();
        let mut sink = |element: &MapElement| {
            decoded.push(
                element
                    .tags
                    .iter()
                    .map(|tag| (tag.key.to_string(), tag.value.to_string()))
                    .collect(),
            )
        };
        Oscimap2Decoder::new(256)
            .decode(&TileCoords::from((0, 0, 0)), data, &mut sink)
            .unwrap();
        decoded
    }

    #[test]
    fn test_static_tags() {
        let mut encoder = Oscimap2Encoder::new(256);
        for tag in tags::TAGS.iter() {
            encoder.add_element(&point(std::slice::from_ref(tag))).unwrap();
        }
        assert!(encoder.tile_tags.is_empty());

        let decoded = decode(&encoder.finish());
        assert_eq!(decoded.len(), tags::TAGS.len());
        for (tag, decoded) in tags::TAGS.iter().zip(&decoded) {
            assert_eq!(
                decoded,
                &vec![(tag.key.to_string(), tag.value.to_string())],
                "{}={}",
                tag.key,
                tag.value
            );
        }
    }

    #[test]
    fn test_mixed_tags() {
        let elements = [
            point(&[
                Tag::fixed("amenity", "restaurant"),
                Tag::new("name", "Zur Post", true),
            ]),
            point(&[
                Tag::new("name", "Zur Post", true),
                Tag::new("surface", "cobblestone:flattened", false),
                Tag::fixed("building", "yes"),
            ]),
            point(&[Tag::new("name", "Marienplatz", true)]),
        ];
        let mut encoder = Oscimap2Encoder::new(256);
        for element in &elements {
            encoder.add_element(element).unwrap();
        }
        assert_eq!(encoder.tile_tags.len(), 3);

        let decoded = decode(&encoder.finish());
        let expected: Vec<Vec<(String, String)>> = elements
            .iter()
            .map(|element| {
                element
                    .tags
                    .iter()
                    .map(|tag| (tag.key.to_string(), tag.value.to_string()))
                    .collect()
            })
            .collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_tile_tags_are_shared() {
        let mut encoder = Oscimap2Encoder::new(256);
        for _ in 0..2 {
            let mut element = MapElement::new();
            element.start(GeometryType::Point);
            element.add_point(1.0, 1.0);
            element.tags.push(Tag::new("name", "Marienplatz", false)).unwrap();
            encoder.add_element(&element).unwrap();
        }
        assert_eq!(encoder.tile_tags.len(), 1);
    }

    #[test]
    fn test_unknown_key() {
        let mut encoder = Oscimap2Encoder::new(256);
        let mut element = MapElement::new();
        element.start(GeometryType::Point);
        element.add_point(1.0, 1.0);
        element.tags.push(Tag::new("colour", "red", true)).unwrap();

        assert_eq!(
            encoder.add_element(&element),
            Err(EncodeError::UnknownKey("colour".to_string()))
        );
    }
}
