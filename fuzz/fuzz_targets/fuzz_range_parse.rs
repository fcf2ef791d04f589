//! Fuzz target: parse arbitrary range expressions.
//! Must not panic; successful parses stay within the length cap.

#![no_main]

use libfuzzer_sys::fuzz_target;

use prefuzz::range::{MAX_RANGE_LEN, parse_range};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    if let Ok(values) = parse_range(&text) {
        assert!(values.len() <= MAX_RANGE_LEN);
    }
});
