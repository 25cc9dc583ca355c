//! Fuzz target for background image header sniffing.

#![no_main]

use boxer::stage::image_size_from_bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(size) = image_size_from_bytes("<fuzz>", data) {
        assert!(size.width > 0 && size.height > 0);
    }
});
