// Property-based tests for canonical roundtrips.
//
// Strategies are intentionally conservative in size/depth to keep CI fast.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use cid::Cid;
use dagcbor::{from_bytes, from_bytes_canonical, parse_path, to_bytes, Ipld};
use multihash::Multihash;
use proptest::prelude::*;

fn sample_cid(seed: u8) -> Cid {
    let hash = Multihash::<64>::wrap(0x12, &[seed; 32]).expect("digest fits");
    Cid::new_v1(0x71, hash)
}

fn arb_key() -> impl Strategy<Value = String> {
    let ascii = proptest::collection::vec(proptest::char::range('a', 'z'), 0..=12)
        .prop_map(|chars| chars.into_iter().collect::<String>());
    let unicode = proptest::collection::vec(proptest::char::range('\u{00a1}', '\u{00ff}'), 1..=6)
        .prop_map(|chars| chars.into_iter().collect::<String>());

    prop_oneof![
        6 => ascii,
        1 => unicode,
    ]
}

fn arb_leaf() -> impl Strategy<Value = Ipld> {
    let int_any = ((-(1_i128 << 64))..=((1_i128 << 64) - 1)).prop_map(Ipld::Integer);
    let int_boundaries = prop_oneof![
        Just(Ipld::Integer(0)),
        Just(Ipld::Integer(23)),
        Just(Ipld::Integer(24)),
        Just(Ipld::Integer((1 << 64) - 1)),
        Just(Ipld::Integer(-1)),
        Just(Ipld::Integer(-(1 << 64))),
    ];
    let float = any::<f64>()
        .prop_filter_map("finite floats only", |f| {
            f.is_finite().then(|| Ipld::Float(f))
        });

    prop_oneof![
        1 => Just(Ipld::Null),
        2 => any::<bool>().prop_map(Ipld::Bool),
        6 => int_any,
        1 => int_boundaries,
        3 => float,
        4 => arb_key().prop_map(Ipld::String),
        3 => proptest::collection::vec(any::<u8>(), 0..=24).prop_map(Ipld::Bytes),
        1 => any::<u8>().prop_map(|seed| Ipld::Link(sample_cid(seed))),
    ]
}

fn arb_value() -> impl Strategy<Value = Ipld> {
    arb_leaf().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..8).prop_map(Ipld::List),
            proptest::collection::btree_map(arb_key(), inner, 0..8)
                .prop_map(|m: BTreeMap<String, Ipld>| Ipld::Map(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn roundtrip_canonicalises(v in arb_value()) {
        let bytes = to_bytes(&v).unwrap();
        let decoded = from_bytes(&bytes).unwrap();
        prop_assert_eq!(&decoded, &v.canonicalize().unwrap());

        // Re-encoding a decoded value is byte-stable, and the encoder's
        // output always passes the canonical profile.
        prop_assert_eq!(&to_bytes(&decoded).unwrap(), &bytes);
        prop_assert_eq!(from_bytes_canonical(&bytes).unwrap(), decoded);
    }

    #[test]
    fn encoding_ignores_entry_order(entries in proptest::collection::btree_map(arb_key(), arb_leaf(), 0..12)) {
        let forward: Ipld = Ipld::Map(entries.clone().into_iter().collect());
        let reverse: Ipld = Ipld::Map(entries.into_iter().rev().collect());
        prop_assert_eq!(to_bytes(&forward).unwrap(), to_bytes(&reverse).unwrap());
    }

    #[test]
    fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = from_bytes(&bytes);
        let _ = from_bytes_canonical(&bytes);
    }

    #[test]
    fn decoded_values_reencode(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        if let Ok(v) = from_bytes(&bytes) {
            // Whatever decodes must re-encode; lenient inputs may shrink
            // to their canonical form, which then decodes identically.
            let reenc = to_bytes(&v).unwrap();
            prop_assert_eq!(from_bytes(&reenc).unwrap(), v);
        }
    }

    #[test]
    fn path_parser_never_panics(path in ".{0,64}") {
        let _ = parse_path(&path);
    }

    #[test]
    fn queries_never_panic(v in arb_value(), path in "[a-c.\\[\\]*0-9]{0,24}") {
        let _ = v.get(&path);
        let _ = v.get_as_nullable_int(&path, true);
        let _ = v.is_null_at(&path, true);
    }
}
