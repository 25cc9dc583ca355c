//! Fuzz target for the box normalizer.
//!
//! Decodes six little-endian f64 values (x, y, width, height, image width,
//! image height) and checks that a finite result always lands inside the
//! image.

#![no_main]

use boxer::geometry::{normalize, ImageBounds, Pixel, Rect};
use libfuzzer_sys::fuzz_target;

const MINIMUM_SIZE: f64 = 3.0;

fn read_f64(data: &[u8], index: usize) -> f64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[index * 8..index * 8 + 8]);
    f64::from_le_bytes(bytes)
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 48 {
        return;
    }

    let values: Vec<f64> = (0..6).map(|i| read_f64(data, i)).collect();
    if values.iter().any(|value| !value.is_finite() || value.abs() > 1e9) {
        return;
    }

    let image_width = values[4].abs().max(MINIMUM_SIZE);
    let image_height = values[5].abs().max(MINIMUM_SIZE);
    let bounds = ImageBounds::new(image_width, image_height);
    let rect = Rect::<Pixel>::new(values[0], values[1], values[2], values[3]);

    let normalized = normalize(rect, bounds, MINIMUM_SIZE).rect();
    if normalized.is_finite() {
        let slack = 1e-6 * image_width.max(image_height);
        assert!(normalized.x() >= -slack && normalized.y() >= -slack);
        assert!(normalized.xmax() <= image_width + slack);
        assert!(normalized.ymax() <= image_height + slack);
    }
});
