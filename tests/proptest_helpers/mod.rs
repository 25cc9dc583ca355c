#![allow(dead_code)]

use boxer::geometry::{ImageBounds, Pixel, Rect};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const MINIMUM_SIZE: f64 = 3.0;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Image sizes no smaller than [`MINIMUM_SIZE`] on either axis.
pub fn arb_bounds() -> BoxedStrategy<ImageBounds> {
    (3u32..=4096, 3u32..=4096)
        .prop_map(|(width, height)| ImageBounds::from((width, height)))
        .boxed()
}

/// Integer-valued candidate rectangles, anywhere relative to `bounds`,
/// including negative extents and sizes far larger than the image.
pub fn arb_candidate_rect(bounds: ImageBounds) -> BoxedStrategy<Rect<Pixel>> {
    let w = bounds.width as i64;
    let h = bounds.height as i64;
    (
        -2 * w..=3 * w,
        -2 * h..=3 * h,
        -w..=3 * w,
        -h..=3 * h,
    )
        .prop_map(|(x, y, width, height)| {
            Rect::new(x as f64, y as f64, width as f64, height as f64)
        })
        .boxed()
}

/// Sub-pixel steps used for fractional geometry.
const FRACTION_STEPS: i64 = 256;

/// Candidate rectangles on a 1/256 pixel grid, the kind of geometry a drag
/// under zoom commits.
pub fn arb_fractional_rect(bounds: ImageBounds) -> BoxedStrategy<Rect<Pixel>> {
    let w = bounds.width as i64 * FRACTION_STEPS;
    let h = bounds.height as i64 * FRACTION_STEPS;
    let step = FRACTION_STEPS as f64;
    (
        -2 * w..=3 * w,
        -2 * h..=3 * h,
        -w..=3 * w,
        -h..=3 * h,
    )
        .prop_map(move |(x, y, width, height)| {
            Rect::new(
                x as f64 / step,
                y as f64 / step,
                width as f64 / step,
                height as f64 / step,
            )
        })
        .boxed()
}

/// An image together with a candidate rectangle for it.
pub fn arb_bounds_and_rect() -> BoxedStrategy<(ImageBounds, Rect<Pixel>)> {
    arb_bounds()
        .prop_flat_map(|bounds| (Just(bounds), arb_candidate_rect(bounds)))
        .boxed()
}

/// An image together with a fractional candidate rectangle for it.
pub fn arb_bounds_and_fractional_rect() -> BoxedStrategy<(ImageBounds, Rect<Pixel>)> {
    arb_bounds()
        .prop_flat_map(|bounds| (Just(bounds), arb_fractional_rect(bounds)))
        .boxed()
}

/// Integer-valued rectangles fully inside a `width` × `height` image and at
/// least [`MINIMUM_SIZE`] on each side.
pub fn arb_rect_within(width: u32, height: u32) -> BoxedStrategy<Rect<Pixel>> {
    let min = MINIMUM_SIZE as u32;
    (0..=width - min, 0..=height - min)
        .prop_flat_map(move |(x, y)| {
            (
                Just(x),
                Just(y),
                min..=width - x,
                min..=height - y,
            )
        })
        .prop_map(|(x, y, w, h)| Rect::new(x as f64, y as f64, w as f64, h as f64))
        .boxed()
}

pub fn label_strategy() -> BoxedStrategy<String> {
    proptest::string::string_regex("[a-z]{1,12}")
        .expect("valid label regex")
        .boxed()
}
