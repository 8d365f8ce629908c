//! Tagged field encoding.
//!
//! Every field is written as a varint key `(field << 3) | wire_type`
//! followed by its payload: a varint for [`WireType::Varint`], or a varint
//! length plus raw bytes for [`WireType::LengthDelimited`].

use crate::core::error::{HoeffdingError, Result};
use std::io::{self, Read};

/// Payload encoding of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    /// Unsigned LEB128 integer
    Varint = 0,
    /// Length-prefixed bytes
    LengthDelimited = 2,
}

impl WireType {
    /// Decodes the low three bits of a key.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(WireType::Varint),
            2 => Some(WireType::LengthDelimited),
            _ => None,
        }
    }
}

/// Appends `value` as a varint.
pub fn put_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Reads a varint from a stream. Returns `None` on a clean end of input.
pub fn read_varint<R: Read>(r: &mut R) -> Result<Option<u64>> {
    let mut value = 0u64;
    let mut byte = [0u8; 1];

    for i in 0..10 {
        if r.read(&mut byte)? == 0 {
            if i == 0 {
                return Ok(None);
            }
            return Err(unexpected_eof());
        }
        value |= u64::from(byte[0] & 0x7f) << (7 * i);
        if byte[0] < 0x80 {
            return Ok(Some(value));
        }
    }
    Err(HoeffdingError::serialization("varint overflows 64 bits"))
}

pub(crate) fn unexpected_eof() -> HoeffdingError {
    io::Error::new(io::ErrorKind::UnexpectedEof, "unexpected end of tree stream").into()
}

/// Buffer of encoded fields.
#[derive(Debug, Default)]
pub struct FieldWriter {
    buf: Vec<u8>,
}

impl FieldWriter {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    fn put_key(&mut self, field: u64, wire: WireType) {
        put_varint(&mut self.buf, (field << 3) | wire as u64);
    }

    /// Appends a varint field.
    pub fn varint(&mut self, field: u64, value: u64) {
        self.put_key(field, WireType::Varint);
        put_varint(&mut self.buf, value);
    }

    /// Appends a length-delimited field.
    pub fn bytes(&mut self, field: u64, data: &[u8]) {
        self.put_key(field, WireType::LengthDelimited);
        put_varint(&mut self.buf, data.len() as u64);
        self.buf.extend_from_slice(data);
    }

    /// Encoded fields.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

/// Cursor over encoded fields.
#[derive(Debug)]
pub struct FieldReader<'a> {
    data: &'a [u8],
}

impl<'a> FieldReader<'a> {
    /// Reads fields from `data`.
    pub fn new(data: &'a [u8]) -> Self {
        FieldReader { data }
    }

    /// Next field key as `(field, wire_bits)`, `None` once exhausted.
    pub fn key(&mut self) -> Result<Option<(u64, u8)>> {
        Ok(read_varint(&mut self.data)?.map(|key| (key >> 3, (key & 0x7) as u8)))
    }

    /// Reads a varint payload.
    pub fn varint(&mut self) -> Result<u64> {
        read_varint(&mut self.data)?.ok_or_else(unexpected_eof)
    }

    /// Reads a length-delimited payload.
    pub fn bytes(&mut self) -> Result<&'a [u8]> {
        let len = usize::try_from(self.varint()?)
            .map_err(|_| HoeffdingError::serialization("field length exceeds address space"))?;
        if len > self.data.len() {
            return Err(unexpected_eof());
        }
        let (head, tail) = self.data.split_at(len);
        self.data = tail;
        Ok(head)
    }
}

/// Checks the wire type of a known field.
pub fn expect_wire(tag: u64, actual: u8, expected: WireType) -> Result<()> {
    if WireType::from_bits(actual) == Some(expected) {
        Ok(())
    } else {
        Err(HoeffdingError::WireType {
            tag,
            expected: expected as u8,
            actual,
        })
    }
}
