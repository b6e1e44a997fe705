use pulse_json::{ConfigError, Emitter, TRUNCATED_OBJECT, TRUNCATED_PROPERTY};

#[test]
fn zero_depth_hint_is_rejected() {
    let err = Emitter::new(64, 0).unwrap_err();
    assert_eq!(err, ConfigError::ZeroDepth);
}

#[test]
fn marker_constants_are_bit_exact() {
    assert_eq!(TRUNCATED_OBJECT, "{\"(truncated)\":true}");
    assert_eq!(TRUNCATED_OBJECT.len(), 20);
    assert_eq!(TRUNCATED_PROPERTY, "\"(truncated)\":true");
    assert_eq!(TRUNCATED_PROPERTY.len(), 18);
}

#[test]
fn array_truncation_at_capacity_50() {
    let mut e = Emitter::new(50, 2).unwrap();
    assert!(e.open_array());
    let mut i = 0;
    while e.int(i) {
        i += 1;
    }
    assert_eq!(i, 12);
    assert!(e.is_truncated());
    let out = e.finish();
    assert_eq!(out, "[0,1,2,3,4,5,6,7,8,9,10,11,{\"(truncated)\":true}]");
    assert!(out.len() <= 50);
}

#[test]
fn object_truncation_at_capacity_50() {
    let mut e = Emitter::new(50, 4).unwrap();
    assert!(e.open_object());
    for i in 0.. {
        if !e.open_property(&i.to_string()) {
            break;
        }
        assert!(e.int(i));
        assert!(e.close_token());
    }
    assert!(e.is_truncated());
    let out = e.finish();
    assert_eq!(out, "{\"0\":0,\"1\":1,\"2\":2,\"3\":3,\"(truncated)\":true}");
    assert!(out.len() <= 50);
}

#[test]
fn capacity_is_raised_to_the_marker_length() {
    let mut e = Emitter::new(0, 1).unwrap();
    assert_eq!(e.capacity(), TRUNCATED_OBJECT.len());
    assert!(!e.int(42));
    assert_eq!(e.finish(), TRUNCATED_OBJECT);
}

#[test]
fn empty_document() {
    let mut e = Emitter::new(64, 2).unwrap();
    assert!(e.is_empty());
    assert_eq!(e.finish(), "");
}

#[test]
fn root_scalar_document() {
    let mut e = Emitter::new(64, 2).unwrap();
    assert!(e.int(42));
    assert_eq!(e.finish(), "42");
}

#[test]
fn mixed_document() {
    let mut e = Emitter::new(256, 8).unwrap();
    assert!(e.open_object());
    assert!(e.open_property("name"));
    assert!(e.text("pulse"));
    assert!(e.close_token());
    assert!(e.open_property("count"));
    assert!(e.int(-3));
    assert!(e.close_token());
    assert!(e.open_property("flags"));
    assert!(e.open_array());
    assert!(e.bool(true));
    assert!(e.null());
    assert!(e.uint(7));
    assert!(e.close_token());
    assert!(e.close_token());
    assert_eq!(
        e.finish(),
        "{\"name\":\"pulse\",\"count\":-3,\"flags\":[true,null,7]}"
    );
}

#[test]
fn finish_closes_everything() {
    let mut e = Emitter::new(128, 8).unwrap();
    assert!(e.open_object());
    assert!(e.open_property("a"));
    assert!(e.open_array());
    assert!(e.int(1));
    assert_eq!(e.finish(), "{\"a\":[1]}");
}

#[test]
fn unwritten_property_closes_as_null() {
    let mut e = Emitter::new(64, 4).unwrap();
    assert!(e.open_object());
    assert!(e.open_property("a"));
    assert!(e.close_token());
    assert_eq!(e.finish(), "{\"a\":null}");
}

#[test]
fn close_token_at_root_is_a_noop() {
    let mut e = Emitter::new(64, 2).unwrap();
    assert!(!e.close_token());
    assert!(e.int(1));
    assert!(!e.close_token());
    assert_eq!(e.finish(), "1");
}

#[test]
fn integer_boundaries() {
    let mut e = Emitter::new(64, 2).unwrap();
    assert!(e.open_array());
    assert!(e.int(i64::MIN));
    assert!(e.uint(u64::MAX));
    assert_eq!(e.finish(), "[-9223372036854775808,18446744073709551615]");
}

#[test]
fn float_shortest_roundtrip_form() {
    let mut e = Emitter::new(128, 2).unwrap();
    assert!(e.open_array());
    assert!(e.float(1.5));
    assert!(e.float(1.0));
    assert!(e.float(-0.0));
    assert!(e.float(0.1));
    assert!(e.float32(0.1_f32));
    assert_eq!(e.finish(), "[1.5,1,-0,0.1,0.1]");
}

#[test]
fn string_escape_table() {
    let mut e = Emitter::new(256, 2).unwrap();
    assert!(e.text("q\" b\\ \u{0008}\u{000C}\n\r\t / é"));
    assert_eq!(e.finish(), "\"q\\\" b\\\\ \\b\\f\\n\\r\\t / é\"");
}

#[test]
fn control_ranges_escape_as_uppercase_hex() {
    let mut e = Emitter::new(256, 2).unwrap();
    assert!(e.text("\u{0000}\u{001F}\u{007F}\u{009F}\u{00A0}"));
    assert_eq!(e.finish(), "\"\\u0000\\u001F\\u007F\\u009F\u{00A0}\"");
}

#[test]
fn optional_text() {
    let mut e = Emitter::new(64, 2).unwrap();
    assert!(e.open_array());
    assert!(e.opt_text(Some("a")));
    assert!(e.opt_text(None));
    assert_eq!(e.finish(), "[\"a\",null]");
}

#[test]
fn ungrammatical_writes_reject_without_truncating() {
    let mut e = Emitter::new(128, 4).unwrap();

    // A property needs an enclosing object.
    assert!(!e.open_property("a"));
    // A bare value cannot follow a complete root value.
    assert!(e.int(1));
    assert!(!e.int(2));
    assert!(!e.open_array());
    assert!(!e.is_truncated());
    assert_eq!(e.finish(), "1");

    e.clear();
    assert!(e.open_object());
    // Objects take properties, not bare values or containers.
    assert!(!e.int(1));
    assert!(!e.open_array());
    assert!(e.open_property("a"));
    assert!(e.int(1));
    // A property holds exactly one value.
    assert!(!e.int(2));
    assert!(!e.is_truncated());
    assert!(e.close_token());
    // Arrays take values, not properties.
    assert!(e.open_property("b"));
    assert!(e.open_array());
    assert!(!e.open_property("c"));
    assert!(!e.is_truncated());
    assert_eq!(e.finish(), "{\"a\":1,\"b\":[]}");
}

#[test]
fn truncation_is_sticky() {
    let mut e = Emitter::new(24, 2).unwrap();
    assert!(e.open_array());
    while e.int(0) {}
    assert!(e.is_truncated());
    assert!(!e.open_array());
    assert!(!e.open_object());
    assert!(!e.open_property("x"));
    assert!(!e.null());
    assert!(!e.bool(true));
    assert!(!e.text("x"));
    let out = e.finish();
    assert!(out.len() <= 24);
    assert_eq!(out, "[0,{\"(truncated)\":true}]");
}

#[test]
fn truncation_inside_property_value_slot() {
    // The property's pending colon takes the truncated object as its value.
    let mut e = Emitter::new(27, 4).unwrap();
    assert!(e.open_object());
    assert!(e.open_property("a"));
    assert!(!e.text("a long string that cannot fit"));
    assert!(e.is_truncated());
    assert_eq!(e.finish(), "{\"a\":{\"(truncated)\":true}}");
}

#[test]
fn oversized_property_name_truncates_the_object() {
    let mut e = Emitter::new(32, 4).unwrap();
    assert!(e.open_object());
    assert!(!e.open_property("a property name that cannot fit"));
    assert!(e.is_truncated());
    assert_eq!(e.finish(), "{\"(truncated)\":true}");
}

#[test]
fn clear_retains_the_allocation_and_restarts() {
    let mut e = Emitter::new(64, 4).unwrap();
    assert!(e.open_array());
    assert!(e.int(1));
    assert_eq!(e.finish(), "[1]");

    e.clear();
    assert!(e.is_empty());
    assert!(!e.is_truncated());
    assert!(e.open_object());
    assert_eq!(e.finish(), "{}");

    e.clear();
    e.clear();
    assert_eq!(e.finish(), "");
}

#[test]
fn try_resize_respects_the_reserve() {
    let mut e = Emitter::new(32, 2).unwrap();
    assert!(e.open_array());
    assert!(e.int(1234567));
    // Live content plus reserve no longer fits in 16.
    assert!(!e.try_resize(16));
    assert_eq!(e.capacity(), 32);
    // Growing always fits.
    assert!(e.try_resize(128));
    assert_eq!(e.capacity(), 128);
    for i in 0..10 {
        assert!(e.int(i));
    }
    assert_eq!(e.finish(), "[1234567,0,1,2,3,4,5,6,7,8,9]");
}
