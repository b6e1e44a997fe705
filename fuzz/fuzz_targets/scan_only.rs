#![no_main]

use libfuzzer_sys::fuzz_target;

use pulse_json::Scanner;

fuzz_target!(|data: &[u8]| {
    let mut s = Scanner::new(data, 0, 16).expect("nonzero depth");
    while s.next() {
        let seg = s.token_segment();
        assert!(seg.end() <= data.len());
        // Extraction must never panic, whatever the token.
        let _ = s.parse_bool();
        let _ = s.parse_i64();
        let _ = s.parse_u64();
        let _ = s.parse_f64();
        let _ = s.parse_str();
    }
    // Terminal states are sticky.
    let kind = s.token_kind();
    assert!(!s.next());
    assert_eq!(s.token_kind(), kind);
});
