//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to distinguish
//! between the coordinate systems the stage juggles at compile time.

use std::fmt;

/// Marker type for image pixel coordinates.
///
/// Pixel coordinates are absolute positions inside the background image,
/// unaffected by the stage's pan offset or zoom factor. Box geometry is
/// always stored in this space.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker type for display surface coordinates.
///
/// Surface coordinates are what pointer events report: positions on the
/// viewport after the pan offset and zoom factor have been applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {}

/// Marker type for normalized coordinates (0.0 to 1.0).
///
/// Normalized coordinates represent positions as fractions of the image
/// dimensions, as used by the YOLO text format.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
