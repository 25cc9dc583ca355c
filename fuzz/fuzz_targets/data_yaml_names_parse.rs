//! Fuzz target for the `names:` key of YOLO `data.yaml` files.

#![no_main]

use boxer::vocabulary::fuzz_parse_data_yaml_names;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_data_yaml_names(text);
});
