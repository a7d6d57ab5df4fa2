//! Cursor for reading protobuf-like varint streams.

use bytes::Buf;
use prost::encoding::decode_varint;

use crate::io::DecodeError;

pub const WIRE_VARINT: u32 = 0;
pub const WIRE_FIXED64: u32 = 1;
pub const WIRE_LENGTH_DELIMITED: u32 = 2;
pub const WIRE_FIXED32: u32 = 5;

pub fn zigzag_decode(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

pub fn zigzag_encode(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Reads from a byte slice while tracking the current position and a limit which must not be
/// crossed. Nested fields narrow the limit to their own end offset.
pub struct PbfReader<'a> {
    data: &'a [u8],
    position: usize,
    limit: usize,
}

impl<'a> PbfReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            limit: data.len(),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Restricts reading to `limit`, which has to lie within the data.
    pub fn set_limit(&mut self, limit: usize) -> Result<(), DecodeError> {
        if limit > self.data.len() {
            return Err(DecodeError::Truncated(self.position));
        }
        self.limit = limit;
        Ok(())
    }

    pub fn has_data(&self) -> bool {
        self.position < self.limit
    }

    /// Moves the cursor to `position`, clamped to the data.
    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.data.len());
    }

    fn available(&self) -> &'a [u8] {
        if self.position >= self.limit {
            &[]
        } else {
            &self.data[self.position..self.limit]
        }
    }

    pub fn read_u32_be(&mut self) -> Result<u32, DecodeError> {
        let mut buf = self.available();
        if buf.remaining() < 4 {
            return Err(DecodeError::Truncated(self.position));
        }
        let value = buf.get_u32();
        self.position += 4;
        Ok(value)
    }

    pub fn read_varint(&mut self) -> Result<u64, DecodeError> {
        let mut buf = self.available();
        if !buf.has_remaining() {
            return Err(DecodeError::Truncated(self.position));
        }
        let before = buf.remaining();
        let value =
            decode_varint(&mut buf).map_err(|_| DecodeError::InvalidVarint(self.position))?;
        self.position += before - buf.remaining();
        Ok(value)
    }

    /// Reads a varint and keeps its lower 32 bits.
    pub fn read_varint32(&mut self) -> Result<u32, DecodeError> {
        self.read_varint().map(|value| value as u32)
    }

    /// Reads a length prefix and returns the end offset of the field it introduces.
    pub fn read_field_end(&mut self) -> Result<usize, DecodeError> {
        let start = self.position;
        let length = self.read_varint()?;
        let end = (self.position as u64).saturating_add(length);
        if end > self.limit as u64 {
            return Err(DecodeError::Truncated(start));
        }
        Ok(end as usize)
    }

    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        let start = self.position;
        let end = self.read_field_end()?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidString(start))
    }

    /// Reads a packed varint array, replacing the content of `out`.
    pub fn read_packed_u32(&mut self, out: &mut Vec<u32>) -> Result<(), DecodeError> {
        let start = self.position;
        let end = self.read_field_end()?;
        let limit = self.limit;
        self.limit = end;

        out.clear();
        let result = (|| -> Result<(), DecodeError> {
            while self.position < end {
                out.push(self.read_varint32()?);
            }
            Ok(())
        })();

        self.limit = limit;
        result.map_err(|err| match err {
            DecodeError::InvalidVarint(_) | DecodeError::Truncated(_) => {
                DecodeError::InvalidPackedSize(start)
            }
            err => err,
        })
    }

    /// Reads packed zigzag encoded coordinate deltas as interleaved x/y pairs divided by
    /// `scale`. Replaces the content of `out` and returns the number of points read.
    pub fn read_interleaved_points(
        &mut self,
        scale: f32,
        out: &mut Vec<f32>,
    ) -> Result<usize, DecodeError> {
        let start = self.position;
        let end = self.read_field_end()?;
        let limit = self.limit;
        self.limit = end;

        out.clear();
        let mut last = [0i32; 2];
        let result = (|| -> Result<(), DecodeError> {
            let mut axis = 0;
            while self.position < end {
                let delta = zigzag_decode(self.read_varint32()?);
                last[axis] = last[axis].wrapping_add(delta);
                out.push(last[axis] as f32 / scale);
                axis ^= 1;
            }
            Ok(())
        })();

        self.limit = limit;
        result.map_err(|err| match err {
            DecodeError::InvalidVarint(_) | DecodeError::Truncated(_) => {
                DecodeError::InvalidPackedSize(start)
            }
            err => err,
        })?;

        Ok(out.len() / 2)
    }

    /// Skips the value of a field with the given wire type.
    pub fn skip(&mut self, wire_type: u32) -> Result<(), DecodeError> {
        let skip = match wire_type {
            WIRE_VARINT => return self.read_varint().map(|_| ()),
            WIRE_FIXED64 => 8,
            WIRE_FIXED32 => 4,
            WIRE_LENGTH_DELIMITED => {
                let end = self.read_field_end()?;
                self.position = end;
                return Ok(());
            }
            wire_type => return Err(DecodeError::UnsupportedWireType(wire_type)),
        };

        if self.position + skip > self.limit {
            return Err(DecodeError::Truncated(self.position));
        }
        self.position += skip;
        Ok(())
    }
}
