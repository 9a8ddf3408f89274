use crate::cbor;
use crate::decode;
use crate::encode;
use crate::error::{DecodeError, EncodeError};
use crate::limits::DecodeLimits;
use crate::value::Ipld;

/// Encode a value tree to canonical DAG-CBOR bytes.
///
/// # Errors
///
/// Returns [`EncodeError`] if the value violates the profile or the framer
/// fails.
pub fn to_bytes(value: &Ipld) -> Result<Vec<u8>, EncodeError> {
    let tree = encode::to_cbor(value)?;
    let bytes = cbor::to_bytes(&tree)?;
    Ok(bytes)
}

/// Encode a value tree, appending the bytes to a caller-supplied buffer.
///
/// The one "streaming" convenience this crate offers: existing bytes in
/// `buf` are left untouched.
///
/// # Errors
///
/// As [`to_bytes`]. Profile violations are detected before anything is
/// written.
pub fn to_bytes_buffer(buf: &mut Vec<u8>, value: &Ipld) -> Result<(), EncodeError> {
    let tree = encode::to_cbor(value)?;
    cbor::to_bytes_buffer(buf, &tree)?;
    Ok(())
}

/// Decode one complete DAG-CBOR item.
///
/// Decode limits are derived from the input length
/// ([`DecodeLimits::for_bytes`]); trailing bytes are rejected. Maps that
/// arrive unsorted are canonicalised; use [`from_bytes_canonical`] to
/// reject them instead.
///
/// # Errors
///
/// Returns [`DecodeError`] on malformed bytes or any profile violation.
pub fn from_bytes(data: &[u8]) -> Result<Ipld, DecodeError> {
    from_bytes_with_limits(data, DecodeLimits::for_bytes(data.len()))
}

/// Decode one complete DAG-CBOR item under explicit resource limits.
///
/// # Errors
///
/// As [`from_bytes`].
pub fn from_bytes_with_limits(data: &[u8], limits: DecodeLimits) -> Result<Ipld, DecodeError> {
    let tree = cbor::from_bytes(data, limits)?;
    decode::from_cbor(tree)
}

/// Decode one complete DAG-CBOR item, rejecting non-canonical input.
///
/// On top of [`from_bytes`], every head must use its shortest form, floats
/// must be 64-bit, and map keys must already be in canonical order.
///
/// # Errors
///
/// As [`from_bytes`], plus [`DecodeError::NonCanonical`] and the framer's
/// non-canonical codes.
pub fn from_bytes_canonical(data: &[u8]) -> Result<Ipld, DecodeError> {
    from_bytes_canonical_with_limits(data, DecodeLimits::for_bytes(data.len()))
}

/// Decode one complete DAG-CBOR item canonically, under explicit limits.
///
/// # Errors
///
/// As [`from_bytes_canonical`].
pub fn from_bytes_canonical_with_limits(
    data: &[u8],
    limits: DecodeLimits,
) -> Result<Ipld, DecodeError> {
    let tree = cbor::from_bytes_canonical(data, limits)?;
    decode::from_cbor_canonical(tree)
}

/// Compute the CIDv1 of a value's canonical encoding (dag-cbor, SHA-256).
///
/// # Errors
///
/// Returns [`EncodeError`] if the value does not encode.
#[cfg(feature = "sha2")]
#[cfg_attr(docsrs, doc(cfg(feature = "sha2")))]
pub fn cid_of(value: &Ipld) -> Result<cid::Cid, EncodeError> {
    use sha2::{Digest, Sha256};

    // Multicodec codes for dag-cbor and sha2-256.
    const DAG_CBOR: u64 = 0x71;
    const SHA2_256: u64 = 0x12;

    let bytes = to_bytes(value)?;
    let digest = Sha256::digest(&bytes);
    let hash = multihash::Multihash::<64>::wrap(SHA2_256, digest.as_slice())
        .map_err(|_| EncodeError::InvalidValue("digest does not fit a multihash".to_owned()))?;
    Ok(cid::Cid::new_v1(DAG_CBOR, hash))
}
