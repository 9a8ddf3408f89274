use crate::cbor::CborValue;
use crate::error::EncodeError;
use crate::link;
use crate::order;
use crate::value::Ipld;

/// Map a value tree into a generic CBOR tree, enforcing every DAG-CBOR
/// restriction.
///
/// Structural recursion, left to right and depth first; the first violation
/// aborts. Map entries are sorted into canonical order on the way through,
/// so callers may build maps in any order. The input is never mutated.
///
/// # Errors
///
/// Returns [`EncodeError::InvalidValue`] for an integer outside
/// `[-2^64, 2^64 - 1]` or a non-finite float, and
/// [`EncodeError::InvalidMapKey`] for duplicate map keys.
pub fn to_cbor(value: &Ipld) -> Result<CborValue, EncodeError> {
    match value {
        Ipld::Null => Ok(CborValue::Null),
        Ipld::Bool(b) => Ok(CborValue::Bool(*b)),
        Ipld::Integer(v) => encode_integer(*v),
        Ipld::Float(f) => {
            if f.is_finite() {
                Ok(CborValue::Float(*f))
            } else {
                Err(EncodeError::InvalidValue(format!(
                    "float must be finite, got {f}"
                )))
            }
        }
        Ipld::String(s) => Ok(CborValue::Text(s.clone())),
        Ipld::Bytes(b) => Ok(CborValue::Bytes(b.clone())),
        Ipld::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(to_cbor(item)?);
            }
            Ok(CborValue::Array(out))
        }
        Ipld::Map(map) => encode_map(map.entries()),
        Ipld::Link(cid) => Ok(link::encode_link(cid)),
    }
}

/// Non-negative integers use major type 0, negative ones major type 1.
fn encode_integer(v: i128) -> Result<CborValue, EncodeError> {
    if v >= 0 {
        u64::try_from(v).map(CborValue::Unsigned).map_err(|_| {
            EncodeError::InvalidValue(format!("integer {v} exceeds 2^64 - 1"))
        })
    } else {
        u64::try_from(-1 - v).map(CborValue::Negative).map_err(|_| {
            EncodeError::InvalidValue(format!("integer {v} is below -2^64"))
        })
    }
}

fn encode_map(entries: &[(String, Ipld)]) -> Result<CborValue, EncodeError> {
    let mut sorted: Vec<(&str, &Ipld)> = entries
        .iter()
        .map(|(k, v)| (k.as_str(), v))
        .collect();
    sorted.sort_by(|(a, _), (b, _)| order::cmp_keys(a, b));

    if let Some(w) = sorted.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(EncodeError::InvalidMapKey(format!(
            "duplicate key {:?}",
            w[0].0
        )));
    }

    let mut out = Vec::with_capacity(sorted.len());
    for (key, value) in sorted {
        out.push((CborValue::Text(key.to_owned()), to_cbor(value)?));
    }
    Ok(CborValue::Map(out))
}
