//! # dagcbor
//!
//! Encoding and decoding for **DAG-CBOR**, the deterministic IPLD profile of
//! CBOR (RFC 8949) used by content-addressed systems, plus a small value-path
//! query language over decoded trees.
//!
//! ## Design principles
//!
//! - **One valid encoding per value.**
//!   Map entries are emitted in canonical order (key byte length, then raw
//!   UTF-8 bytes), integers and lengths use their shortest heads, floats are
//!   always 64-bit, and the only permitted tag is 42 (CID links). Logically
//!   equal values therefore encode to byte-identical output.
//! - **The encoder canonicalises, the decoder enforces.**
//!   Callers may build maps in any order; [`to_bytes`] sorts them. The
//!   decoder rejects everything the profile forbids (foreign tags, non-text
//!   map keys, duplicate keys, `NaN`/infinities, reserved simple values) and
//!   always produces canonically ordered maps.
//! - **Absence is a value, not an error.**
//!   The query layer ([`Ipld::get`] and the typed accessors) distinguishes
//!   *missing*, *null*, and *type mismatch* without exception machinery.
//!
//! ## Example
//!
//! ```
//! use dagcbor::{from_bytes, ipld, to_bytes};
//!
//! let value = ipld!({
//!     "users": [
//!         {"name": "alice", "admin": true},
//!         {"name": "bob", "admin": false},
//!     ],
//! });
//!
//! let bytes = to_bytes(&value)?;
//! let decoded = from_bytes(&bytes)?;
//!
//! assert_eq!(decoded.get_as_text("users[0].name")?, "alice");
//! assert!(!decoded.get_as_bool("users[1].admin")?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature flags
//!
//! - `sha2` *(default)*: enables [`cid_of`], which computes the CIDv1
//!   (dag-cbor, SHA-256) of a value's canonical encoding.
//! - `simdutf8`: SIMD-accelerated UTF-8 validation of decoded text strings.
//!
//! ## Strictness profiles
//!
//! [`from_bytes`] accepts any well-formed single CBOR item that maps into the
//! DAG-CBOR data model, canonicalising map order on the way in. The
//! `*_canonical` variants additionally reject inputs that are not already in
//! canonical form (non-minimal heads, 16/32-bit floats, unsorted maps).
//!
//! ## Safety
//!
//! This crate forbids `unsafe` code.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod cbor;
mod codec;
mod decode;
mod encode;
mod error;
mod limits;
mod link;
mod macros;
mod order;
mod path;
mod query;
mod utf8;
mod value;
mod wire;

pub use crate::cbor::CborValue;
pub use crate::codec::{
    from_bytes, from_bytes_canonical, from_bytes_canonical_with_limits, from_bytes_with_limits,
    to_bytes, to_bytes_buffer,
};
pub use crate::decode::{from_cbor, from_cbor_canonical};
pub use crate::encode::to_cbor;
pub use crate::error::{CborError, CborErrorCode, DecodeError, EncodeError, QueryError};
pub use crate::limits::{DecodeLimits, DEFAULT_MAX_DEPTH};
pub use crate::link::{MULTIBASE_IDENTITY, TAG_LINK};
pub use crate::path::{parse_path, Step};
pub use crate::value::{Ipld, IpldKind, IpldMap};

#[cfg(feature = "sha2")]
pub use crate::codec::cid_of;
