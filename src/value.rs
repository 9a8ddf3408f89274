use cid::Cid;

use crate::error::EncodeError;
use crate::order;

/// The DAG-CBOR data model.
///
/// A tree of exactly nine kinds. Trees are immutable once built: no codec or
/// query operation mutates its input.
///
/// ```
/// use dagcbor::Ipld;
///
/// let v = Ipld::from("hello");
/// assert_eq!(v.as_str(), Some("hello"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Ipld {
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    ///
    /// The permitted range is `[-2^64, 2^64 - 1]`: CBOR's full unsigned
    /// range plus its one-step-negative range, which is wider than IPLD's
    /// formal 64-bit bound. The range is checked when encoding, not here.
    Integer(i128),
    /// An IEEE-754 binary64 float.
    ///
    /// Must be finite and non-NaN to encode; always emitted as 64-bit.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// An opaque byte sequence.
    Bytes(Vec<u8>),
    /// An ordered sequence of values.
    List(Vec<Ipld>),
    /// A map with text keys; see [`IpldMap`].
    Map(IpldMap),
    /// A link to another block, by content identifier.
    Link(Cid),
}

/// The kind of an [`Ipld`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpldKind {
    /// [`Ipld::Null`].
    Null,
    /// [`Ipld::Bool`].
    Bool,
    /// [`Ipld::Integer`].
    Integer,
    /// [`Ipld::Float`].
    Float,
    /// [`Ipld::String`].
    String,
    /// [`Ipld::Bytes`].
    Bytes,
    /// [`Ipld::List`].
    List,
    /// [`Ipld::Map`].
    Map,
    /// [`Ipld::Link`].
    Link,
}

impl Ipld {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> IpldKind {
        match self {
            Self::Null => IpldKind::Null,
            Self::Bool(_) => IpldKind::Bool,
            Self::Integer(_) => IpldKind::Integer,
            Self::Float(_) => IpldKind::Float,
            Self::String(_) => IpldKind::String,
            Self::Bytes(_) => IpldKind::Bytes,
            Self::List(_) => IpldKind::List,
            Self::Map(_) => IpldKind::Map,
            Self::Link(_) => IpldKind::Link,
        }
    }

    /// Returns `true` iff this value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean payload, if this is a bool.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer.
    #[inline]
    #[must_use]
    pub const fn as_integer(&self) -> Option<i128> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a float.
    #[inline]
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the byte payload, if this is a byte sequence.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the elements, if this is a list.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Ipld]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the map, if this is a map.
    #[inline]
    #[must_use]
    pub const fn as_map(&self) -> Option<&IpldMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the link payload, if this is a link.
    #[inline]
    #[must_use]
    pub const fn as_link(&self) -> Option<&Cid> {
        match self {
            Self::Link(cid) => Some(cid),
            _ => None,
        }
    }

    /// Return a copy of this value with every map recursively sorted into
    /// canonical order.
    ///
    /// Two values that encode to the same bytes canonicalise to equal trees,
    /// so this is the normal form for structural comparison. Values produced
    /// by [`from_bytes`](crate::from_bytes) are already canonical.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidMapKey`] if any map holds duplicate
    /// keys.
    pub fn canonicalize(&self) -> Result<Self, EncodeError> {
        match self {
            Self::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(item.canonicalize()?);
                }
                Ok(Self::List(out))
            }
            Self::Map(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (k, v) in map.iter() {
                    entries.push((k.clone(), v.canonicalize()?));
                }
                order::sort_entries(&mut entries);
                if let Some(key) = order::find_duplicate(&entries) {
                    return Err(EncodeError::InvalidMapKey(format!("duplicate key {key:?}")));
                }
                Ok(Self::Map(IpldMap { entries }))
            }
            other => Ok(other.clone()),
        }
    }
}

/// A DAG-CBOR map: an ordered sequence of `(key, value)` pairs.
///
/// Entry order is semantically significant: after decoding it is the
/// canonical key order, and equality compares entries in order. This is
/// deliberately not a hash or tree map: DAG-CBOR maps are typically small,
/// and lookup is a linear scan for the first matching key.
///
/// Duplicate keys are representable here (insertion never fails); the
/// encoder rejects them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IpldMap {
    pub(crate) entries: Vec<(String, Ipld)>,
}

impl IpldMap {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create an empty map with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Wrap an existing vector of entries, preserving its order.
    #[must_use]
    pub const fn from_entries(entries: Vec<(String, Ipld)>) -> Self {
        Self { entries }
    }

    /// Append an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Ipld>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Returns the value for the first entry matching `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Ipld> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` iff the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, Ipld)> {
        self.entries.iter()
    }

    /// Iterate over values in entry order.
    pub fn values(&self) -> impl Iterator<Item = &Ipld> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Borrow the entries in order.
    #[must_use]
    pub fn entries(&self) -> &[(String, Ipld)] {
        &self.entries
    }

    /// Consume the map and return its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<(String, Ipld)> {
        self.entries
    }
}

impl FromIterator<(String, Ipld)> for IpldMap {
    fn from_iter<I: IntoIterator<Item = (String, Ipld)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for IpldMap {
    type Item = (String, Ipld);
    type IntoIter = std::vec::IntoIter<(String, Ipld)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<bool> for Ipld {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Ipld {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Ipld {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<&str> for Ipld {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Ipld {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&[u8]> for Ipld {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Ipld {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<Ipld>> for Ipld {
    fn from(value: Vec<Ipld>) -> Self {
        Self::List(value)
    }
}

impl From<IpldMap> for Ipld {
    fn from(value: IpldMap) -> Self {
        Self::Map(value)
    }
}

impl From<Cid> for Ipld {
    fn from(value: Cid) -> Self {
        Self::Link(value)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for Ipld {
            fn from(value: $t) -> Self {
                Self::Integer(i128::from(value))
            }
        }
    )*};
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);
