use core::cmp::Ordering;

use crate::value::Ipld;

/// Compare two map keys by the DAG-CBOR canonical ordering rule.
///
/// Canonical ordering is:
/// 1) the key with the shorter UTF-8 encoding sorts first, then
/// 2) lexicographic comparison of the UTF-8 bytes.
///
/// Consequences: `"z" < "aa"` (length wins), `"A" < "Z" < "a"` (case is
/// byte-ordered), and a two-byte key such as `"é"` follows every one-byte
/// key.
#[inline]
#[must_use]
pub fn cmp_keys(a: &str, b: &str) -> Ordering {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => a.as_bytes().cmp(b.as_bytes()),
        other => other,
    }
}

/// Returns true iff `prev < curr` under canonical key ordering.
#[inline]
#[must_use]
pub fn is_strictly_increasing(prev: &str, curr: &str) -> bool {
    cmp_keys(prev, curr) == Ordering::Less
}

/// Sort map entries into canonical order.
///
/// Duplicate keys are kept; they end up adjacent and are caught by
/// [`find_duplicate`].
pub fn sort_entries(entries: &mut [(String, Ipld)]) {
    entries.sort_by(|(a, _), (b, _)| cmp_keys(a, b));
}

/// Scan canonically sorted entries for a duplicate key.
///
/// Returns the offending key, if any. Entries must already be sorted so
/// that equal keys are adjacent.
#[must_use]
pub fn find_duplicate<'a>(entries: &'a [(String, Ipld)]) -> Option<&'a str> {
    entries
        .windows(2)
        .find(|w| w[0].0 == w[1].0)
        .map(|w| w[0].0.as_str())
}
