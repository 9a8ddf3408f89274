//! Path evaluation and typed accessors over decoded trees.
//!
//! Lookup never throws structure problems at the caller: a missing key or
//! index is simply absent, and the typed accessors report absence and
//! kind mismatches as ordinary values of [`QueryError`].

use std::borrow::Cow;

use cid::Cid;

use crate::error::QueryError;
use crate::path::{parse_path, Step};
use crate::value::{Ipld, IpldMap};

fn eval<'a>(value: &'a Ipld, steps: &[Step]) -> Option<Cow<'a, Ipld>> {
    let Some((step, rest)) = steps.split_first() else {
        return Some(Cow::Borrowed(value));
    };
    match (step, value) {
        (Step::Key(key), Ipld::Map(map)) => map.get(key).and_then(|v| eval(v, rest)),
        (Step::Index(index), Ipld::List(items)) => {
            items.get(*index).and_then(|v| eval(v, rest))
        }
        (Step::Wildcard, Ipld::Map(map)) => Some(Cow::Owned(Ipld::List(
            map.values()
                .filter_map(|v| eval(v, rest))
                .map(Cow::into_owned)
                .collect(),
        ))),
        (Step::Wildcard, Ipld::List(items)) => Some(Cow::Owned(Ipld::List(
            items
                .iter()
                .filter_map(|v| eval(v, rest))
                .map(Cow::into_owned)
                .collect(),
        ))),
        _ => None,
    }
}

fn resolve<'a>(
    value: &'a Ipld,
    path: &str,
    allow_missing: bool,
) -> Result<Option<Cow<'a, Ipld>>, QueryError> {
    match eval(value, &parse_path(path)) {
        None if allow_missing => Ok(None),
        None => Err(QueryError::PathNotFound),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => Ok(Some(v)),
    }
}

macro_rules! impl_accessor {
    ($kind:literal, $ty:ty, $required:ident, $nullable:ident, $extract:expr) => {
        #[doc = concat!("Resolve `path` and return ", $kind, ".")]
        ///
        /// A present `null` cannot satisfy a required accessor.
        ///
        /// # Errors
        ///
        /// `PathNotFound` if the path resolves to nothing; `TypeMismatch`
        /// if it resolves to null or to a different kind.
        pub fn $required(&self, path: &str) -> Result<$ty, QueryError> {
            self.$nullable(path, false)?.ok_or(QueryError::TypeMismatch)
        }

        #[doc = concat!("Resolve `path` and return ", $kind, ", or `None` for null.")]
        ///
        /// Returns `Ok(None)` for a present `null`, and for an absent path
        /// when `allow_missing` is set.
        ///
        /// # Errors
        ///
        /// `PathNotFound` if the path resolves to nothing and
        /// `allow_missing` is unset; `TypeMismatch` if it resolves to a
        /// different kind.
        pub fn $nullable(
            &self,
            path: &str,
            allow_missing: bool,
        ) -> Result<Option<$ty>, QueryError> {
            match resolve(self, path, allow_missing)? {
                None => Ok(None),
                Some(v) => $extract(v.as_ref())
                    .map(Some)
                    .ok_or(QueryError::TypeMismatch),
            }
        }
    };
}

impl Ipld {
    /// Resolve a path against this value.
    ///
    /// Returns `None` when the path selects nothing. Plain key/index
    /// descent borrows from `self`; a wildcard collects the non-absent
    /// results of the remaining steps per child into a fresh list, which is
    /// always present (possibly empty). A chained wildcard flattens one
    /// level per wildcard; nested lists of lists stay nested.
    ///
    /// ```
    /// use dagcbor::ipld;
    ///
    /// let v = ipld!({"users": [{"name": "alice"}, {"name": "bob"}]});
    /// let names = v.get("users[*].name").unwrap();
    /// assert_eq!(names.into_owned(), ipld!(["alice", "bob"]));
    /// assert!(v.get("users[7].name").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Cow<'_, Ipld>> {
        self.at(&parse_path(path))
    }

    /// Resolve a pre-parsed step sequence against this value.
    ///
    /// Same semantics as [`get`](Self::get).
    #[must_use]
    pub fn at(&self, steps: &[Step]) -> Option<Cow<'_, Ipld>> {
        eval(self, steps)
    }

    /// Returns `true` iff the path resolves to `null`, or resolves to
    /// nothing while `allow_missing` is set.
    #[must_use]
    pub fn is_null_at(&self, path: &str, allow_missing: bool) -> bool {
        eval(self, &parse_path(path)).map_or(allow_missing, |v| v.is_null())
    }

    impl_accessor!(
        "a non-negative integer",
        u64,
        get_as_nat,
        get_as_nullable_nat,
        |v: &Ipld| match v {
            Ipld::Integer(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    );

    impl_accessor!(
        "an integer",
        i128,
        get_as_int,
        get_as_nullable_int,
        Ipld::as_integer
    );

    impl_accessor!(
        "a float",
        f64,
        get_as_float,
        get_as_nullable_float,
        // Integers widen to f64; everything else is a mismatch.
        |v: &Ipld| match v {
            Ipld::Float(f) => Some(*f),
            #[allow(clippy::cast_precision_loss)]
            Ipld::Integer(i) => Some(*i as f64),
            _ => None,
        }
    );

    impl_accessor!("a bool", bool, get_as_bool, get_as_nullable_bool, Ipld::as_bool);

    impl_accessor!(
        "a string",
        String,
        get_as_text,
        get_as_nullable_text,
        |v: &Ipld| v.as_str().map(str::to_owned)
    );

    impl_accessor!(
        "a byte sequence",
        Vec<u8>,
        get_as_bytes,
        get_as_nullable_bytes,
        |v: &Ipld| v.as_bytes().map(<[u8]>::to_vec)
    );

    impl_accessor!(
        "a list",
        Vec<Ipld>,
        get_as_list,
        get_as_nullable_list,
        |v: &Ipld| v.as_list().map(<[Ipld]>::to_vec)
    );

    impl_accessor!(
        "a map",
        IpldMap,
        get_as_map,
        get_as_nullable_map,
        |v: &Ipld| v.as_map().cloned()
    );

    impl_accessor!(
        "a link",
        Cid,
        get_as_link,
        get_as_nullable_link,
        |v: &Ipld| v.as_link().cloned()
    );
}
