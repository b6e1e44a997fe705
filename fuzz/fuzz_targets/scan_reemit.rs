#![no_main]

use libfuzzer_sys::fuzz_target;

use pulse_json::{Emitter, Scanner, TokenKind};

// Scan arbitrary bytes; if they form a complete document whose values all
// convert, mirror the tokens through an emitter and check the re-emitted
// document scans to the same kind sequence.
fuzz_target!(|data: &[u8]| {
    if data.len() > 1 << 16 {
        return;
    }

    let mut kinds = Vec::new();
    let mut e = Emitter::new(4 * data.len() + 64, 16).expect("nonzero depth");
    let mut s = Scanner::new(data, 0, 16).expect("nonzero depth");
    let mut mirrored = true;
    while s.next() {
        let kind = s.token_kind();
        kinds.push(kind);
        mirrored &= match kind {
            TokenKind::BeginArray => e.open_array(),
            TokenKind::BeginObject => e.open_object(),
            TokenKind::BeginProperty => match s.parse_str() {
                Some(name) => {
                    let name = name.to_owned();
                    e.open_property(&name)
                }
                None => false,
            },
            TokenKind::EndArray | TokenKind::EndObject | TokenKind::EndProperty => {
                e.close_token()
            }
            TokenKind::Null => e.null(),
            TokenKind::Boolean => s.parse_bool().is_some_and(|v| e.bool(v)),
            TokenKind::Integer => match (s.parse_i64(), s.parse_u64()) {
                (Some(v), _) => e.int(v),
                (None, Some(v)) => e.uint(v),
                (None, None) => false,
            },
            TokenKind::Float => s.parse_f64().is_some_and(|v| v.is_finite() && e.float(v)),
            TokenKind::String => match s.parse_str() {
                Some(text) => {
                    let text = text.to_owned();
                    e.text(&text)
                }
                None => false,
            },
            _ => false,
        };
    }

    if s.token_kind() != TokenKind::Complete || !mirrored || e.is_truncated() {
        return;
    }

    let doc = e.finish().to_owned();
    let mut again = Scanner::new(doc.as_bytes(), 0, 16).expect("nonzero depth");
    for kind in &kinds {
        assert!(again.next());
        // A float that formats without fraction or exponent (1.0 -> "1")
        // legitimately re-scans as an integer.
        let got = again.token_kind();
        assert!(got == *kind || (got.is_number() && kind.is_number()));
    }
    assert!(!again.next());
    assert_eq!(again.token_kind(), TokenKind::Complete);
});
