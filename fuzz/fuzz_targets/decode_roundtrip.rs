#![no_main]

use libfuzzer_sys::fuzz_target;

use dagcbor::{from_bytes, from_bytes_with_limits, to_bytes, DecodeLimits};

fn fuzz_limits(input_len: usize) -> DecodeLimits {
    let max = input_len.min(1 << 20);
    DecodeLimits {
        max_input_bytes: max,
        max_depth: 64,
        max_total_items: 1 << 16,
    }
}

fuzz_target!(|data: &[u8]| {
    let limits = fuzz_limits(data.len());
    if let Ok(value) = from_bytes_with_limits(data, limits) {
        // Whatever decodes must re-encode to a canonical fixed point.
        let bytes = to_bytes(&value).expect("decoded value must re-encode");
        let again = from_bytes(&bytes).expect("canonical bytes must decode");
        assert_eq!(again, value);
        assert_eq!(to_bytes(&again).expect("stable re-encode"), bytes);
    }
});
