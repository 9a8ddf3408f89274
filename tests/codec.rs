use dagcbor::{
    from_bytes, from_bytes_with_limits, ipld, to_bytes, to_bytes_buffer, CborErrorCode,
    DecodeError, DecodeLimits, EncodeError, Ipld, IpldMap,
};

#[test]
fn scalar_roundtrips() {
    for v in [
        Ipld::Null,
        Ipld::Bool(true),
        Ipld::Bool(false),
        Ipld::Integer(0),
        Ipld::Integer(-1),
        Ipld::Float(1.5),
        Ipld::String("hello".to_owned()),
        Ipld::Bytes(vec![0xde, 0xad]),
    ] {
        let bytes = to_bytes(&v).unwrap();
        assert_eq!(from_bytes(&bytes).unwrap(), v);
    }
}

#[test]
fn integer_wire_format() {
    // Shortest heads on both sides of every width boundary.
    let cases: &[(i128, &[u8])] = &[
        (0, &[0x00]),
        (1, &[0x01]),
        (23, &[0x17]),
        (24, &[0x18, 24]),
        (
            i128::from(i64::MAX),
            &[0x1b, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        ),
        (
            (1 << 64) - 1,
            &[0x1b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        ),
        (-1, &[0x20]),
        (-24, &[0x37]),
        (-25, &[0x38, 24]),
        (
            i128::from(i64::MIN),
            &[0x3b, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        ),
        (
            -(1 << 64),
            &[0x3b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        ),
    ];

    for (value, expected) in cases {
        let bytes = to_bytes(&Ipld::Integer(*value)).unwrap();
        assert_eq!(&bytes, expected, "encoding of {value}");
        assert_eq!(from_bytes(&bytes).unwrap(), Ipld::Integer(*value));
    }
}

#[test]
fn integer_out_of_range_rejected() {
    for v in [1_i128 << 64, (1 << 64) + 7, -(1_i128 << 64) - 1, i128::MIN] {
        let err = to_bytes(&Ipld::Integer(v)).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidValue(_)), "{v}");
    }
}

#[test]
fn floats_are_always_binary64() {
    let bytes = to_bytes(&Ipld::Float(1.5)).unwrap();
    assert_eq!(bytes, [0xfb, 0x3f, 0xf8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);

    let bytes = to_bytes(&Ipld::Float(0.0)).unwrap();
    assert_eq!(bytes[0], 0xfb);
    assert_eq!(bytes.len(), 9);
}

#[test]
fn non_finite_floats_rejected_on_encode() {
    for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = to_bytes(&Ipld::Float(v)).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidValue(_)));
    }
}

#[test]
fn non_finite_floats_rejected_on_decode() {
    // float64 NaN
    let nan64 = [0xfb, 0x7f, 0xf8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    assert!(matches!(
        from_bytes(&nan64).unwrap_err(),
        DecodeError::FloatConversion(_)
    ));

    // float16 +Infinity widens before the profile check fires
    let inf16 = [0xf9, 0x7c, 0x00];
    assert!(matches!(
        from_bytes(&inf16).unwrap_err(),
        DecodeError::FloatConversion(_)
    ));

    // float32 -Infinity
    let neg_inf32 = [0xfa, 0xff, 0x80, 0x00, 0x00];
    assert!(matches!(
        from_bytes(&neg_inf32).unwrap_err(),
        DecodeError::FloatConversion(_)
    ));
}

#[test]
fn finite_small_floats_widen() {
    // float16 1.0
    assert_eq!(from_bytes(&[0xf9, 0x3c, 0x00]).unwrap(), Ipld::Float(1.0));
    // float32 0.5
    assert_eq!(
        from_bytes(&[0xfa, 0x3f, 0x00, 0x00, 0x00]).unwrap(),
        Ipld::Float(0.5)
    );
}

#[test]
fn empty_containers_roundtrip() {
    let cases: &[(Ipld, &[u8])] = &[
        (Ipld::Bytes(Vec::new()), &[0x40]),
        (Ipld::String(String::new()), &[0x60]),
        (Ipld::List(Vec::new()), &[0x80]),
        (Ipld::Map(IpldMap::new()), &[0xa0]),
    ];
    for (value, expected) in cases {
        let bytes = to_bytes(value).unwrap();
        assert_eq!(&bytes, expected);
        assert_eq!(&from_bytes(&bytes).unwrap(), value);
    }
}

#[test]
fn duplicate_keys_rejected_on_encode() {
    let mut map = IpldMap::new();
    map.insert("key", 1);
    map.insert("key", 2);
    let err = to_bytes(&Ipld::Map(map)).unwrap_err();
    assert!(matches!(err, EncodeError::InvalidMapKey(_)));

    // Nested one level down.
    let mut inner = IpldMap::new();
    inner.insert("k", 1);
    inner.insert("k", 2);
    let outer = ipld!({"ok": true, "bad": (Ipld::Map(inner))});
    let err = to_bytes(&outer).unwrap_err();
    assert!(matches!(err, EncodeError::InvalidMapKey(_)));
}

#[test]
fn duplicate_keys_rejected_on_decode() {
    // {"a": 1, "a": 2}
    let bytes = [0xa2, 0x61, 0x61, 0x01, 0x61, 0x61, 0x02];
    let err = from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidMapKey(_)));
}

#[test]
fn foreign_tags_rejected() {
    // tag 0 around 0
    let err = from_bytes(&[0xc0, 0x00]).unwrap_err();
    assert_eq!(err, DecodeError::InvalidTag(0));

    // tag 41 around an empty text string
    let err = from_bytes(&[0xd8, 0x29, 0x60]).unwrap_err();
    assert_eq!(err, DecodeError::InvalidTag(41));

    // tag 43 around a byte string
    let err = from_bytes(&[0xd8, 0x2b, 0x41, 0x00]).unwrap_err();
    assert_eq!(err, DecodeError::InvalidTag(43));
}

#[test]
fn non_text_map_keys_rejected() {
    // {1: 1}
    let int_key = [0xa1, 0x01, 0x01];
    // {h'61': 1}
    let bytes_key = [0xa1, 0x41, 0x61, 0x01];
    // {false: 1}
    let bool_key = [0xa1, 0xf4, 0x01];

    for bytes in [&int_key[..], &bytes_key[..], &bool_key[..]] {
        let err = from_bytes(bytes).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidMapKey(_)));
    }
}

#[test]
fn undefined_and_reserved_simples_rejected() {
    // undefined
    let err = from_bytes(&[0xf7]).unwrap_err();
    assert!(matches!(err, DecodeError::UnsupportedPrimitive(_)));

    // simple(42)
    let err = from_bytes(&[0xf8, 0x2a]).unwrap_err();
    assert!(matches!(err, DecodeError::UnsupportedPrimitive(_)));
}

#[test]
fn malformed_inputs_fail_without_panic() {
    let cases: &[&[u8]] = &[
        &[],
        &[0xff, 0xff, 0xff],
        &[0x1f],
        &[0x98],             // array header missing its length byte
        &[0x62, 0x61],       // text shorter than its header claims
        &[0x63, 0xff, 0xfe, 0xfd], // invalid UTF-8 text
        &[0x5f],             // indefinite-length bytes
        &[0x9f],             // indefinite-length array
    ];
    for bytes in cases {
        assert!(
            matches!(from_bytes(bytes).unwrap_err(), DecodeError::Cbor(_)),
            "{bytes:?}"
        );
    }
}

#[test]
fn trailing_bytes_rejected() {
    let err = from_bytes(&[0x01, 0x00]).unwrap_err();
    match err {
        DecodeError::Cbor(inner) => assert_eq!(inner.code, CborErrorCode::TrailingBytes),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn depth_limit_guards_nesting() {
    let mut limits = DecodeLimits::for_bytes(2);
    limits.max_depth = 1;

    // A scalar fits at depth 1; [1] needs depth 2.
    assert!(from_bytes_with_limits(&[0x01], limits).is_ok());
    let err = from_bytes_with_limits(&[0x81, 0x01], limits).unwrap_err();
    match err {
        DecodeError::Cbor(inner) => assert_eq!(inner.code, CborErrorCode::DepthLimitExceeded),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn adversarial_nesting_is_rejected() {
    // 200 nested arrays exceed the default depth limit without overflowing
    // the stack.
    let mut bytes = vec![0x81; 200];
    bytes.push(0x01);
    let err = from_bytes(&bytes).unwrap_err();
    match err {
        DecodeError::Cbor(inner) => assert_eq!(inner.code, CborErrorCode::DepthLimitExceeded),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn buffer_encoding_appends() {
    let mut buf = vec![0xaa, 0xbb];
    to_bytes_buffer(&mut buf, &ipld!([1, 2])).unwrap();
    assert_eq!(buf, [0xaa, 0xbb, 0x82, 0x01, 0x02]);
}

#[test]
fn composite_roundtrip() {
    let value = ipld!({
        "title": "block",
        "size": 1024,
        "ratio": 0.25,
        "pinned": true,
        "parent": null,
        "payload": (Ipld::Bytes(vec![0x00, 0x01, 0x02])),
        "children": [{"id": 1}, {"id": 2}],
    });

    let bytes = to_bytes(&value).unwrap();
    let decoded = from_bytes(&bytes).unwrap();
    assert_eq!(decoded, value.canonicalize().unwrap());
    assert_eq!(to_bytes(&decoded).unwrap(), bytes);
}

#[test]
fn nested_violations_surface() {
    // An inner failure aborts even when everything around it is fine.
    let value = ipld!({"ok": [1, 2, 3], "bad": (Ipld::Float(f64::NAN))});
    assert!(to_bytes(&value).is_err());

    let value = ipld!([[[{"deep": (Ipld::Integer(1 << 70))}]]]);
    assert!(to_bytes(&value).is_err());
}
