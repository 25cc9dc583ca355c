//! Fuzz target for `classes.txt` vocabulary parsing.

#![no_main]

use boxer::vocabulary::fuzz_parse_classes_txt;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_classes_txt(text);
});
