//! Generic CBOR tree codec.
//!
//! This module is the byte-level collaborator underneath the DAG-CBOR
//! mappers: it frames a [`CborValue`] tree to and from RFC 8949 bytes
//! without knowing anything about the DAG-CBOR profile. Profile rules
//! (tag whitelist, float validity, map-key discipline) live in the mapper
//! layer; what the framer does enforce is structural well-formedness,
//! definite lengths, resource limits, and, in the canonical flavor,
//! shortest-form heads and 64-bit floats.
//!
//! Indefinite-length items are rejected in both flavors; the profile has no
//! use for them and accepting them would allow multiple encodings of the
//! same value.

use crate::error::{CborError, CborErrorCode};
use crate::limits::DecodeLimits;
use crate::utf8;
use crate::wire;

/// A generic CBOR data item, one variant per wire shape.
///
/// Major types 0–7 map onto the variants as follows: `Unsigned` (0),
/// `Negative` (1, storing the encoded magnitude `n` for the value
/// `-1 - n`), `Bytes` (2), `Text` (3), `Array` (4), `Map` (5, entry order
/// preserved), `Tag` (6), and `Bool`/`Null`/`Simple`/`Float` (7).
#[derive(Debug, Clone, PartialEq)]
pub enum CborValue {
    /// Major type 0: a non-negative integer.
    Unsigned(u64),
    /// Major type 1: the negative integer `-1 - n`, storing `n`.
    Negative(u64),
    /// Major type 2: a byte string.
    Bytes(Vec<u8>),
    /// Major type 3: a UTF-8 text string.
    Text(String),
    /// Major type 4: an array.
    Array(Vec<CborValue>),
    /// Major type 5: a map; entry order is preserved as encoded.
    Map(Vec<(CborValue, CborValue)>),
    /// Major type 6: a tagged item.
    Tag(u64, Box<CborValue>),
    /// Major type 7: `true` or `false`.
    Bool(bool),
    /// Major type 7: `null`.
    Null,
    /// Major type 7: a simple value other than `true`/`false`/`null`,
    /// e.g. `undefined` (23).
    Simple(u8),
    /// Major type 7: a float, widened to binary64 on decode.
    Float(f64),
}

/// Serialize one CBOR item to a fresh byte vector.
///
/// Floats are always emitted in the 64-bit form; integer and length heads
/// always use their shortest encoding.
///
/// # Errors
///
/// Returns `CborError` if a length exceeds the `u64` range or the tree
/// contains an unencodable simple value.
pub fn to_bytes(value: &CborValue) -> Result<Vec<u8>, CborError> {
    let mut out = Vec::new();
    write_value(&mut out, value)?;
    Ok(out)
}

/// Serialize one CBOR item, appending to a caller-supplied buffer.
///
/// Bytes already in `buf` are left untouched; on error the buffer may hold
/// a partial item.
///
/// # Errors
///
/// As [`to_bytes`].
pub fn to_bytes_buffer(buf: &mut Vec<u8>, value: &CborValue) -> Result<(), CborError> {
    write_value(buf, value)
}

fn write_value(out: &mut Vec<u8>, value: &CborValue) -> Result<(), CborError> {
    match value {
        CborValue::Unsigned(v) => wire::write_head(out, 0, *v),
        CborValue::Negative(n) => wire::write_head(out, 1, *n),
        CborValue::Bytes(b) => {
            wire::write_len(out, 2, b.len())?;
            out.extend_from_slice(b);
        }
        CborValue::Text(s) => {
            wire::write_len(out, 3, s.len())?;
            out.extend_from_slice(s.as_bytes());
        }
        CborValue::Array(items) => {
            wire::write_len(out, 4, items.len())?;
            for item in items {
                write_value(out, item)?;
            }
        }
        CborValue::Map(entries) => {
            wire::write_len(out, 5, entries.len())?;
            for (k, v) in entries {
                write_value(out, k)?;
                write_value(out, v)?;
            }
        }
        CborValue::Tag(tag, inner) => {
            wire::write_head(out, 6, *tag);
            write_value(out, inner)?;
        }
        CborValue::Bool(b) => out.push(if *b { 0xf5 } else { 0xf4 }),
        CborValue::Null => out.push(0xf6),
        CborValue::Simple(v) => write_simple(out, *v)?,
        CborValue::Float(f) => {
            out.push(0xfb);
            out.extend_from_slice(&f.to_bits().to_be_bytes());
        }
    }
    Ok(())
}

fn write_simple(out: &mut Vec<u8>, v: u8) -> Result<(), CborError> {
    match v {
        // 20..=22 have dedicated variants; emitting them here keeps the
        // framer total over its own value type.
        0..=23 => out.push(0xe0 | v),
        24..=31 => {
            return Err(CborError::new(
                CborErrorCode::ReservedSimpleValue,
                out.len(),
            ));
        }
        _ => {
            out.push(0xf8);
            out.push(v);
        }
    }
    Ok(())
}

/// Deserialize exactly one CBOR item.
///
/// Accepts any head width for integers and lengths and any float width
/// (widening to binary64). Trailing bytes after the item are rejected.
///
/// # Errors
///
/// Returns `CborError` on malformed input, indefinite lengths, trailing
/// bytes, or when a [`DecodeLimits`] threshold is exceeded.
pub fn from_bytes(data: &[u8], limits: DecodeLimits) -> Result<CborValue, CborError> {
    decode_single(data, limits, false)
}

/// Deserialize exactly one CBOR item, rejecting non-canonical encodings.
///
/// On top of [`from_bytes`], every integer and length head must use its
/// shortest form and floats must be 64-bit.
///
/// # Errors
///
/// As [`from_bytes`], plus `NonCanonicalEncoding` / `NonCanonicalFloat`.
pub fn from_bytes_canonical(data: &[u8], limits: DecodeLimits) -> Result<CborValue, CborError> {
    decode_single(data, limits, true)
}

fn decode_single(
    data: &[u8],
    limits: DecodeLimits,
    canonical: bool,
) -> Result<CborValue, CborError> {
    if data.len() > limits.max_input_bytes {
        return Err(CborError::new(CborErrorCode::MessageLenLimitExceeded, 0));
    }
    let mut reader = Reader {
        data,
        pos: 0,
        items: 0,
        limits,
        canonical,
    };
    let value = reader.decode_value(limits.max_depth)?;
    if reader.pos != data.len() {
        return Err(CborError::new(CborErrorCode::TrailingBytes, reader.pos));
    }
    Ok(value)
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    items: usize,
    limits: DecodeLimits,
    canonical: bool,
}

impl Reader<'_> {
    fn read_arg(&mut self, ai: u8, off: usize) -> Result<u64, CborError> {
        if self.canonical {
            wire::read_uint_canonical(self.data, &mut self.pos, ai, off)
        } else {
            wire::read_uint(self.data, &mut self.pos, ai, off)
        }
    }

    fn read_len(&mut self, ai: u8, off: usize) -> Result<usize, CborError> {
        if ai == 31 {
            return Err(CborError::new(
                CborErrorCode::IndefiniteLengthForbidden,
                off,
            ));
        }
        let len = self.read_arg(ai, off)?;
        wire::len_to_usize(len, off)
    }

    /// Capacity hint capped by the remaining input: every item costs at
    /// least one byte, so a hostile length header cannot balloon memory.
    fn capacity_hint(&self, len: usize) -> usize {
        len.min(self.data.len().saturating_sub(self.pos))
    }

    fn decode_value(&mut self, depth: usize) -> Result<CborValue, CborError> {
        let off = self.pos;
        if depth == 0 {
            return Err(CborError::new(CborErrorCode::DepthLimitExceeded, off));
        }
        self.items += 1;
        if self.items > self.limits.max_total_items {
            return Err(CborError::new(CborErrorCode::TotalItemsLimitExceeded, off));
        }

        let ib = wire::read_u8(self.data, &mut self.pos)?;
        let major = ib >> 5;
        let ai = ib & 0x1f;

        match major {
            0 => Ok(CborValue::Unsigned(self.read_arg(ai, off)?)),
            1 => Ok(CborValue::Negative(self.read_arg(ai, off)?)),
            2 => {
                let len = self.read_len(ai, off)?;
                let bytes = wire::read_exact(self.data, &mut self.pos, len)?;
                Ok(CborValue::Bytes(bytes.to_vec()))
            }
            3 => {
                let len = self.read_len(ai, off)?;
                let bytes = wire::read_exact(self.data, &mut self.pos, len)?;
                let text = utf8::validate(bytes)
                    .map_err(|()| CborError::new(CborErrorCode::Utf8Invalid, off))?;
                Ok(CborValue::Text(text.to_owned()))
            }
            4 => {
                let len = self.read_len(ai, off)?;
                let mut items = Vec::with_capacity(self.capacity_hint(len));
                for _ in 0..len {
                    items.push(self.decode_value(depth - 1)?);
                }
                Ok(CborValue::Array(items))
            }
            5 => {
                let len = self.read_len(ai, off)?;
                let mut entries = Vec::with_capacity(self.capacity_hint(len));
                for _ in 0..len {
                    let key = self.decode_value(depth - 1)?;
                    let value = self.decode_value(depth - 1)?;
                    entries.push((key, value));
                }
                Ok(CborValue::Map(entries))
            }
            6 => {
                let tag = self.read_arg(ai, off)?;
                let inner = self.decode_value(depth - 1)?;
                Ok(CborValue::Tag(tag, Box::new(inner)))
            }
            _ => self.decode_simple(ai, off),
        }
    }

    fn decode_simple(&mut self, ai: u8, off: usize) -> Result<CborValue, CborError> {
        match ai {
            0..=19 => Ok(CborValue::Simple(ai)),
            20 => Ok(CborValue::Bool(false)),
            21 => Ok(CborValue::Bool(true)),
            22 => Ok(CborValue::Null),
            23 => Ok(CborValue::Simple(23)),
            24 => {
                let v = wire::read_u8(self.data, &mut self.pos)?;
                // RFC 8949 §3.3: two-byte simple values below 32 are invalid.
                if v < 32 {
                    return Err(CborError::new(CborErrorCode::ReservedSimpleValue, off));
                }
                Ok(CborValue::Simple(v))
            }
            25 => {
                if self.canonical {
                    return Err(CborError::new(CborErrorCode::NonCanonicalFloat, off));
                }
                let bits = wire::read_be_u16(self.data, &mut self.pos)?;
                Ok(CborValue::Float(wire::f16_to_f64(bits)))
            }
            26 => {
                if self.canonical {
                    return Err(CborError::new(CborErrorCode::NonCanonicalFloat, off));
                }
                let bits = wire::read_be_u32(self.data, &mut self.pos)?;
                Ok(CborValue::Float(f64::from(f32::from_bits(bits))))
            }
            27 => {
                let bits = wire::read_be_u64(self.data, &mut self.pos)?;
                Ok(CborValue::Float(f64::from_bits(bits)))
            }
            28..=30 => Err(CborError::new(CborErrorCode::ReservedAdditionalInfo, off)),
            // 31 is the "break" stop code; it only pairs with indefinite
            // lengths, which this codec forbids.
            _ => Err(CborError::new(
                CborErrorCode::IndefiniteLengthForbidden,
                off,
            )),
        }
    }
}
