use core::fmt;

/// A structured code identifying why the CBOR framer rejected or failed to
/// produce a byte stream.
///
/// This enum is intentionally stable and string-free so that hot-path
/// dispatch never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CborErrorCode {
    /// Unexpected end-of-input while decoding.
    UnexpectedEof,
    /// Arithmetic overflow while computing a length or offset.
    LengthOverflow,
    /// Input contains trailing bytes after the single CBOR data item.
    TrailingBytes,

    /// Nesting depth limit exceeded.
    DepthLimitExceeded,
    /// Total decoded items limit exceeded.
    TotalItemsLimitExceeded,
    /// Total input length exceeds the configured limit.
    MessageLenLimitExceeded,

    /// Reserved additional-information value (28..=30) was used.
    ReservedAdditionalInfo,
    /// Indefinite-length encoding was used; the profile forbids it.
    IndefiniteLengthForbidden,
    /// Non-shortest integer/length head (canonical profile only).
    NonCanonicalEncoding,
    /// A 16- or 32-bit float head (canonical profile only).
    NonCanonicalFloat,

    /// Invalid UTF-8 in a text string.
    Utf8Invalid,
    /// A two-byte simple value below 32, or an unencodable simple value.
    ReservedSimpleValue,
}

/// A CBOR framing error with a stable code and the byte offset where it was
/// detected.
///
/// Encoding errors report the number of bytes emitted before the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CborError {
    /// The error code.
    pub code: CborErrorCode,
    /// Byte offset into the input (or output) where the error was detected.
    pub offset: usize,
}

impl CborError {
    /// Construct an error at `offset`.
    #[inline]
    #[must_use]
    pub const fn new(code: CborErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }
}

impl fmt::Display for CborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.code {
            CborErrorCode::UnexpectedEof => "unexpected end of input",
            CborErrorCode::LengthOverflow => "length overflow",
            CborErrorCode::TrailingBytes => "trailing bytes after single CBOR item",
            CborErrorCode::DepthLimitExceeded => "nesting depth limit exceeded",
            CborErrorCode::TotalItemsLimitExceeded => "total items limit exceeded",
            CborErrorCode::MessageLenLimitExceeded => "input length exceeds decode limits",
            CborErrorCode::ReservedAdditionalInfo => "reserved additional info value",
            CborErrorCode::IndefiniteLengthForbidden => "indefinite length forbidden",
            CborErrorCode::NonCanonicalEncoding => "non-canonical integer/length encoding",
            CborErrorCode::NonCanonicalFloat => "float must use the 64-bit encoding",
            CborErrorCode::Utf8Invalid => "text must be valid UTF-8",
            CborErrorCode::ReservedSimpleValue => "reserved simple value",
        };
        write!(f, "cbor error at {}: {msg}", self.offset)
    }
}

impl std::error::Error for CborError {}

/// An error raised while mapping a value tree into CBOR for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// A scalar violates the profile: integer outside `[-2^64, 2^64 - 1]` or
    /// a non-finite float.
    InvalidValue(String),
    /// A map contains duplicate keys.
    InvalidMapKey(String),
    /// Map keys were not in canonical order.
    ///
    /// Not currently produced: the encoder sorts entries itself. The variant
    /// is kept so that a future validating encoder remains additive.
    UnsortedMapKeys,
    /// The CBOR framer failed to serialize the mapped tree.
    Cbor(CborError),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(reason) => write!(f, "invalid value: {reason}"),
            Self::InvalidMapKey(reason) => write!(f, "invalid map key: {reason}"),
            Self::UnsortedMapKeys => write!(f, "map keys not in canonical order"),
            Self::Cbor(err) => write!(f, "cbor encoding failed: {err}"),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cbor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CborError> for EncodeError {
    fn from(err: CborError) -> Self {
        Self::Cbor(err)
    }
}

/// An error raised while mapping decoded CBOR back into the data model.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// A tag other than 42 appeared.
    InvalidTag(u64),
    /// A map key was not a text string, or a map held duplicate keys.
    InvalidMapKey(String),
    /// A tag-42 payload was not a byte string, used a multibase prefix other
    /// than identity, or failed CID parsing.
    InvalidCid(String),
    /// A major-type-7 simple value other than `true`, `false`, `null`, or a
    /// float (e.g. `undefined`).
    UnsupportedPrimitive(String),
    /// `NaN` or an infinity was encountered.
    FloatConversion(String),
    /// An integer did not fit the permitted range.
    ///
    /// Unreachable with the in-crate framer, whose heads are 64-bit; kept
    /// for framer-independent exhaustiveness.
    IntegerOutOfRange(String),
    /// Input was well-formed but not canonical (canonical profile only).
    NonCanonical(String),
    /// The CBOR framer rejected the byte stream.
    Cbor(CborError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTag(tag) => write!(f, "invalid tag: {tag}"),
            Self::InvalidMapKey(reason) => write!(f, "invalid map key: {reason}"),
            Self::InvalidCid(reason) => write!(f, "invalid CID: {reason}"),
            Self::UnsupportedPrimitive(reason) => write!(f, "unsupported primitive: {reason}"),
            Self::FloatConversion(reason) => write!(f, "float conversion: {reason}"),
            Self::IntegerOutOfRange(reason) => write!(f, "integer out of range: {reason}"),
            Self::NonCanonical(reason) => write!(f, "non-canonical input: {reason}"),
            Self::Cbor(err) => write!(f, "cbor decoding failed: {err}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cbor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CborError> for DecodeError {
    fn from(err: CborError) -> Self {
        Self::Cbor(err)
    }
}

/// The outcome of a required typed accessor.
///
/// Structural absence is not an error for [`Ipld::get`](crate::Ipld::get);
/// it becomes one only when a typed accessor demanded a present value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// The path resolved to nothing and the accessor required presence.
    PathNotFound,
    /// The path resolved to a value of a different kind.
    TypeMismatch,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathNotFound => write!(f, "path not found"),
            Self::TypeMismatch => write!(f, "type mismatch"),
        }
    }
}

impl std::error::Error for QueryError {}
