//! Axis-aligned rectangles in XYWH form.

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::{Normalized, Pixel};

/// An axis-aligned rectangle stored as origin plus size (x, y, width, height).
///
/// The `TSpace` parameter carries the coordinate space, so image-space box
/// geometry and surface-space pointer geometry cannot be mixed.
///
/// Note: this type does NOT enforce positive extents. A freehand drag towards
/// the top-left produces negative widths and heights, and the stage keeps
/// those around until the box is normalized.
#[derive(Clone, Copy, PartialEq)]
pub struct Rect<TSpace> {
    pub origin: Coord<TSpace>,
    pub width: f64,
    pub height: f64,
}

impl<TSpace> Rect<TSpace> {
    /// Creates a rectangle from its top-left corner and size.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Coord::new(x, y),
            width,
            height,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.origin.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.origin.y
    }

    /// Returns the far x edge (`x + width`).
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.origin.x + self.width
    }

    /// Returns the far y edge (`y + height`).
    #[inline]
    pub fn ymax(&self) -> f64 {
        self.origin.y + self.height
    }

    /// Returns true if all components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Returns the same rectangle with non-negative extents.
    ///
    /// A negative width means the origin is the right edge; the result moves
    /// the origin to the left edge instead (likewise for height).
    pub fn canonical(&self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.origin.x + self.width, -self.width)
        } else {
            (self.origin.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.origin.y + self.height, -self.height)
        } else {
            (self.origin.y, self.height)
        };
        Self::new(x, y, width, height)
    }

    /// Returns true if `point` lies inside the (canonical) rectangle, edges included.
    pub fn contains(&self, point: Coord<TSpace>) -> bool {
        let rect = self.canonical();
        point.x >= rect.x() && point.x <= rect.xmax() && point.y >= rect.y() && point.y <= rect.ymax()
    }

    /// Returns the rectangle moved by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            origin: self.origin.translated(dx, dy),
            width: self.width,
            height: self.height,
        }
    }
}

impl<TSpace> std::fmt::Debug for Rect<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rect")
            .field("x", &self.origin.x)
            .field("y", &self.origin.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl<TSpace> Default for Rect<TSpace> {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for Rect<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Rect", 4)?;
        state.serialize_field("x", &self.origin.x)?;
        state.serialize_field("y", &self.origin.y)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for Rect<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RectData {
            x: f64,
            y: f64,
            width: f64,
            height: f64,
        }
        let data = RectData::deserialize(deserializer)?;
        Ok(Rect::new(data.x, data.y, data.width, data.height))
    }
}

impl Rect<Pixel> {
    /// Converts pixel geometry to YOLO-style center form.
    ///
    /// The center is computed as `(2·x + width) / 2` before dividing by the
    /// image extent, which is the exact arithmetic downstream tooling expects.
    ///
    /// # Arguments
    /// * `image_width` - The width of the image in pixels
    /// * `image_height` - The height of the image in pixels
    pub fn to_normalized_center(&self, image_width: f64, image_height: f64) -> Rect<Normalized> {
        let cx = (2.0 * self.origin.x + self.width) / 2.0 / image_width;
        let cy = (2.0 * self.origin.y + self.height) / 2.0 / image_height;
        Rect::new(cx, cy, self.width / image_width, self.height / image_height)
    }
}
