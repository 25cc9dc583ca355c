//! Box geometry normalization.
//!
//! Every committed box edit passes through [`normalize`], which forces the
//! candidate rectangle inside the background image and up to the stage's
//! minimum size. The steps run in a fixed order and each one may feed the
//! next:
//!
//! 1. Minimum-size guard.
//! 2. Far-edge pre-check: an origin at or past the far edge slides back so
//!    the far edges line up.
//! 3. Near-edge underflow: a negative origin is clamped to zero, cropping the
//!    part that hung off the image.
//! 4. Far-edge overflow: crop or shift until both axes fit.
//! 5. Rotation and scale reset to identity.

use serde::{Deserialize, Serialize};

use super::{Pixel, Rect};

/// The containment bounds for boxes: the background image's natural size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageBounds {
    pub width: f64,
    pub height: f64,
}

impl ImageBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true if `rect` lies entirely within `[0, width] × [0, height]`.
    pub fn contains(&self, rect: &Rect<Pixel>) -> bool {
        rect.x() >= 0.0
            && rect.y() >= 0.0
            && rect.xmax() <= self.width
            && rect.ymax() <= self.height
    }
}

impl From<(u32, u32)> for ImageBounds {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(f64::from(width), f64::from(height))
    }
}

/// A validated box rectangle.
///
/// Boxes are axis-aligned and never scaled, so `rotation` is always `0.0`
/// and both scale factors are always `1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl NormalizedRect {
    /// Returns the position and size as a pixel-space rectangle.
    pub fn rect(&self) -> Rect<Pixel> {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Clamps a candidate rectangle into `bounds` and up to `minimum_size`.
///
/// The result is fully contained in the bounds and at least `minimum_size`
/// wide and high. When the image itself is smaller than `minimum_size` on an
/// axis, the image extent becomes the floor on that axis instead.
pub fn normalize(rect: Rect<Pixel>, bounds: ImageBounds, minimum_size: f64) -> NormalizedRect {
    let mut x = rect.x();
    let mut y = rect.y();
    let mut width = rect.width;
    let mut height = rect.height;

    guard_minimum(&mut width, minimum_size);
    guard_minimum(&mut height, minimum_size);

    if x >= bounds.width {
        x = bounds.width - width;
    }
    if y >= bounds.height {
        y = bounds.height - height;
    }

    clamp_near_edge(&mut x, &mut width, minimum_size);
    clamp_near_edge(&mut y, &mut height, minimum_size);

    // A pass settles both axes; the second one only confirms it. The pass
    // limit keeps float rounding from cycling on the same crop.
    for _ in 0..MAX_FIT_PASSES {
        let x_fits = fit_far_edge(&mut x, &mut width, bounds.width, minimum_size);
        let y_fits = fit_far_edge(&mut y, &mut height, bounds.height, minimum_size);
        if x_fits && y_fits {
            break;
        }
    }

    NormalizedRect {
        x,
        y,
        width,
        height,
        rotation: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    }
}

const MAX_FIT_PASSES: usize = 3;

fn guard_minimum(size: &mut f64, minimum_size: f64) {
    if *size < minimum_size {
        *size = minimum_size;
    }
}

fn clamp_near_edge(origin: &mut f64, size: &mut f64, minimum_size: f64) {
    if *origin < 0.0 {
        if *origin + *size > 0.0 {
            *size += *origin;
            guard_minimum(size, minimum_size);
        }
        *origin = 0.0;
    }
}

/// Crops or shifts one axis so that `origin + size <= bound`.
///
/// Returns true if the axis already fit and nothing changed.
fn fit_far_edge(origin: &mut f64, size: &mut f64, bound: f64, minimum_size: f64) -> bool {
    if *origin + *size <= bound {
        return true;
    }

    if *origin >= bound {
        if *size > bound {
            *size = bound;
            *origin = 0.0;
        } else {
            *origin = bound - *size;
        }
    } else if bound - *origin < minimum_size {
        *size = minimum_size.min(bound);
        *origin = bound - *size;
    } else {
        *size = bound - *origin;
    }

    false
}
