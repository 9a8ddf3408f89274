//! Value construction macros.

/// Construct an [`Ipld`](crate::Ipld) tree using a JSON-like literal
/// syntax.
///
/// `null`, booleans, numbers, strings, byte vectors, CIDs, arrays, and
/// maps are supported; map keys may be identifiers, string literals, or
/// parenthesised expressions. Compound expressions used as values must be
/// parenthesised.
///
/// ```
/// use dagcbor::ipld;
///
/// let v = ipld!({
///     "name": "alice",
///     "age": 36,
///     "tags": ["admin", "ops"],
///     "shadow": null,
/// });
/// assert_eq!(v.get_as_nat("age"), Ok(36));
/// ```
#[macro_export]
macro_rules! ipld {
    ($($tt:tt)+) => {
        $crate::__ipld_value!($($tt)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ipld_value {
    (null) => { $crate::Ipld::Null };
    (true) => { $crate::Ipld::Bool(true) };
    (false) => { $crate::Ipld::Bool(false) };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Ipld::List(::std::vec![ $( $crate::__ipld_value!($elem) ),* ])
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut __map = $crate::IpldMap::new();
        $( __map.insert($crate::__ipld_key!($key), $crate::__ipld_value!($value)); )*
        $crate::Ipld::Map(__map)
    }};

    // fallback: convert arbitrary expressions via `From`
    ($other:expr) => { $crate::Ipld::from($other) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ipld_key {
    (($key:expr)) => { $key };
    ($key:ident) => { ::core::stringify!($key) };
    ($key:literal) => { $key };
}
