use crate::cbor::CborValue;
use crate::error::DecodeError;
use crate::link;
use crate::order;
use crate::value::{Ipld, IpldMap};

/// Map a generic CBOR tree into the data model, rejecting every construct
/// DAG-CBOR disallows.
///
/// Map arrival order is not required to be canonical; entries are sorted on
/// the way in, so decoded maps are always canonically ordered. Duplicate
/// keys are rejected either way.
///
/// # Errors
///
/// Returns a [`DecodeError`] for foreign tags, non-text map keys, duplicate
/// keys, malformed CID payloads, non-finite floats, and unsupported simple
/// values.
pub fn from_cbor(value: CborValue) -> Result<Ipld, DecodeError> {
    map_value(value, false)
}

/// As [`from_cbor`], but additionally require canonical map order on
/// arrival.
///
/// # Errors
///
/// As [`from_cbor`], plus [`DecodeError::NonCanonical`] when a map's keys
/// are not already sorted.
pub fn from_cbor_canonical(value: CborValue) -> Result<Ipld, DecodeError> {
    map_value(value, true)
}

fn map_value(value: CborValue, canonical: bool) -> Result<Ipld, DecodeError> {
    match value {
        CborValue::Unsigned(v) => Ok(Ipld::Integer(i128::from(v))),
        CborValue::Negative(n) => Ok(Ipld::Integer(-1 - i128::from(n))),
        CborValue::Bytes(b) => Ok(Ipld::Bytes(b)),
        CborValue::Text(s) => Ok(Ipld::String(s)),
        CborValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(map_value(item, canonical)?);
            }
            Ok(Ipld::List(out))
        }
        CborValue::Map(entries) => map_entries(entries, canonical),
        CborValue::Tag(link::TAG_LINK, inner) => link::decode_link(&inner).map(Ipld::Link),
        CborValue::Tag(tag, _) => Err(DecodeError::InvalidTag(tag)),
        CborValue::Bool(b) => Ok(Ipld::Bool(b)),
        CborValue::Null => Ok(Ipld::Null),
        CborValue::Simple(v) => Err(DecodeError::UnsupportedPrimitive(if v == 23 {
            "undefined".to_owned()
        } else {
            format!("simple value {v}")
        })),
        CborValue::Float(f) => {
            if f.is_finite() {
                Ok(Ipld::Float(f))
            } else {
                Err(DecodeError::FloatConversion(format!(
                    "float must be finite, got {f}"
                )))
            }
        }
    }
}

fn map_entries(
    entries: Vec<(CborValue, CborValue)>,
    canonical: bool,
) -> Result<Ipld, DecodeError> {
    let mut out = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let CborValue::Text(key) = key else {
            return Err(DecodeError::InvalidMapKey(
                "map key must be a text string".to_owned(),
            ));
        };
        out.push((key, map_value(value, canonical)?));
    }

    if canonical {
        for w in out.windows(2) {
            if w[0].0 == w[1].0 {
                return Err(DecodeError::InvalidMapKey(format!(
                    "duplicate key {:?}",
                    w[0].0
                )));
            }
            if !order::is_strictly_increasing(&w[0].0, &w[1].0) {
                return Err(DecodeError::NonCanonical(format!(
                    "map keys out of order near {:?}",
                    w[1].0
                )));
            }
        }
    } else {
        order::sort_entries(&mut out);
        if let Some(key) = order::find_duplicate(&out) {
            return Err(DecodeError::InvalidMapKey(format!(
                "duplicate key {key:?}"
            )));
        }
    }

    Ok(Ipld::Map(IpldMap::from_entries(out)))
}
