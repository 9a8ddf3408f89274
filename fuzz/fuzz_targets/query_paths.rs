#![no_main]

use libfuzzer_sys::fuzz_target;

use dagcbor::{from_bytes_with_limits, parse_path, DecodeLimits};

fuzz_target!(|data: &[u8]| {
    // First byte splits the input into a path string and a CBOR document.
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = usize::from(split).min(rest.len());
    let (path, doc) = rest.split_at(split);

    let Ok(path) = std::str::from_utf8(path) else {
        return;
    };
    let steps = parse_path(path);

    let limits = DecodeLimits {
        max_input_bytes: doc.len(),
        max_depth: 64,
        max_total_items: 1 << 16,
    };
    if let Ok(value) = from_bytes_with_limits(doc, limits) {
        let _ = value.at(&steps);
        let _ = value.get_as_nullable_int(path, true);
        let _ = value.is_null_at(path, true);
    }
});
