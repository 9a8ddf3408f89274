use cid::Cid;

use crate::cbor::CborValue;
use crate::error::DecodeError;

/// The CBOR tag reserved by IPLD for CID links.
pub const TAG_LINK: u64 = 42;

/// The multibase "identity" prefix: the bytes that follow are already
/// binary.
pub const MULTIBASE_IDENTITY: u8 = 0x00;

/// Frame a CID as tag 42 over an identity-prefixed byte string.
pub fn encode_link(cid: &Cid) -> CborValue {
    let binary = cid.to_bytes();
    let mut payload = Vec::with_capacity(binary.len() + 1);
    payload.push(MULTIBASE_IDENTITY);
    payload.extend_from_slice(&binary);
    CborValue::Tag(TAG_LINK, Box::new(CborValue::Bytes(payload)))
}

/// Unframe a tag-42 payload back into a CID.
///
/// The payload must be a byte string whose first byte is the identity
/// multibase prefix; the remainder is parsed as a binary CID.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidCid`] if the payload is not a byte string,
/// carries a non-identity multibase prefix, or fails CID parsing.
pub fn decode_link(payload: &CborValue) -> Result<Cid, DecodeError> {
    let CborValue::Bytes(bytes) = payload else {
        return Err(DecodeError::InvalidCid(
            "tag 42 payload must be a byte string".to_owned(),
        ));
    };
    let Some((&base, binary)) = bytes.split_first() else {
        return Err(DecodeError::InvalidCid("empty CID payload".to_owned()));
    };
    if base != MULTIBASE_IDENTITY {
        return Err(DecodeError::InvalidCid(format!(
            "unsupported multibase prefix {base:#04x}, expected identity"
        )));
    }
    Cid::try_from(binary).map_err(|err| DecodeError::InvalidCid(err.to_string()))
}
