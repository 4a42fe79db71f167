//! Binary payload stored per barcode.
//!
//! Layout (all multi-byte floats little-endian):
//!
//! ```text
//! version   uvarint   (= SCHEMA_VERSION)
//! name_len  uvarint
//! name      [u8; name_len]  UTF-8
//! kcal      f32
//! protein   f32
//! fat       f32
//! carbs     f32
//! ```
//!
//! Unknown nutrients are written as the quiet NaN `0x7FC00000`; any NaN read
//! back decodes to `None`. The barcode is the store key and never appears in
//! the payload.

use crate::error::CodecError;
use crate::product::Product;

/// Payload schema version written by [`Product::encode`].
pub const SCHEMA_VERSION: u64 = 1;

/// Bit pattern written for an unknown nutrient.
pub const UNKNOWN_BITS: u32 = 0x7FC0_0000;

const MAX_VARINT_LEN: usize = 10;

impl Product {
    /// Serialize name and nutrients into the versioned payload.
    pub fn encode(&self) -> Vec<u8> {
        let name = self.name.as_bytes();
        let mut out = Vec::with_capacity(2 + name.len() + 16);

        put_uvarint(SCHEMA_VERSION, &mut out);
        put_uvarint(name.len() as u64, &mut out);
        out.extend_from_slice(name);

        for value in [
            self.kcal_100g,
            self.protein_100g,
            self.fat_100g,
            self.carbs_100g,
        ] {
            put_nutrient(value, &mut out);
        }
        out
    }

    /// Parse a payload produced by [`Product::encode`].
    ///
    /// The barcode is supplied by the caller since it is the store key.
    pub fn decode(barcode: impl Into<String>, bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = PayloadReader { buf: bytes };

        let version = reader.uvarint("version")?;
        if version != SCHEMA_VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }

        let name_len = reader.uvarint("name length")?;
        let name_bytes = reader.take(name_len, "name")?;
        let name = std::str::from_utf8(name_bytes)?.to_string();

        let kcal_100g = reader.nutrient("kcal")?;
        let protein_100g = reader.nutrient("protein")?;
        let fat_100g = reader.nutrient("fat")?;
        let carbs_100g = reader.nutrient("carbs")?;

        if !reader.buf.is_empty() {
            return Err(CodecError::TrailingBytes(reader.buf.len()));
        }

        Ok(Self {
            barcode: barcode.into(),
            name,
            kcal_100g,
            protein_100g,
            fat_100g,
            carbs_100g,
        })
    }
}

/// Append `x` as an unsigned LEB128 varint.
pub fn put_uvarint(mut x: u64, out: &mut Vec<u8>) {
    while x >= 0x80 {
        out.push(((x as u8) & 0x7F) | 0x80);
        x >>= 7;
    }
    out.push(x as u8);
}

fn put_nutrient(value: Option<f32>, out: &mut Vec<u8>) {
    let bits = match value {
        Some(v) if !v.is_nan() => v.to_bits(),
        _ => UNKNOWN_BITS,
    };
    out.extend_from_slice(&bits.to_le_bytes());
}

struct PayloadReader<'a> {
    buf: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    fn uvarint(&mut self, field: &'static str) -> Result<u64, CodecError> {
        let mut value = 0u64;
        let mut shift = 0u32;
        for (i, &byte) in self.buf.iter().enumerate() {
            if i == MAX_VARINT_LEN {
                return Err(CodecError::VarintOverflow(field));
            }
            if byte < 0x80 {
                // The tenth byte may only carry the top bit of a u64.
                if i == MAX_VARINT_LEN - 1 && byte > 1 {
                    return Err(CodecError::VarintOverflow(field));
                }
                self.buf = &self.buf[i + 1..];
                return Ok(value | (u64::from(byte) << shift));
            }
            value |= u64::from(byte & 0x7F) << shift;
            shift += 7;
        }
        Err(CodecError::Truncated(field))
    }

    fn take(&mut self, len: u64, field: &'static str) -> Result<&'a [u8], CodecError> {
        let len = usize::try_from(len).map_err(|_| CodecError::Truncated(field))?;
        if len > self.buf.len() {
            return Err(CodecError::Truncated(field));
        }
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    fn nutrient(&mut self, field: &'static str) -> Result<Option<f32>, CodecError> {
        let bytes = self.take(4, field)?;
        let bits = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let value = f32::from_bits(bits);
        Ok((!value.is_nan()).then_some(value))
    }
}
