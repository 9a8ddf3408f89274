#![no_main]

use libfuzzer_sys::fuzz_target;

use dagcbor::{from_bytes_canonical_with_limits, from_bytes_with_limits, DecodeLimits};

fn fuzz_limits(input_len: usize) -> DecodeLimits {
    // Keep limits tight enough to avoid pathological allocations while still exploring structure.
    let max = input_len.min(1 << 20);
    DecodeLimits {
        max_input_bytes: max,
        max_depth: 64,
        max_total_items: 1 << 16,
    }
}

fuzz_target!(|data: &[u8]| {
    let limits = fuzz_limits(data.len());
    let _ = from_bytes_with_limits(data, limits);
    let _ = from_bytes_canonical_with_limits(data, limits);
});
