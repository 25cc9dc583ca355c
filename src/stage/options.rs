//! Stage configuration.

use serde::{Deserialize, Serialize};

/// Default display surface size, in surface pixels.
pub const DEFAULT_SURFACE_SIZE: f64 = 500.0;

/// Boxes whose width or height ends below this size are discarded after a
/// freehand drag and raised to it by normalization.
pub const DEFAULT_MINIMUM_SIZE: f64 = 3.0;

/// Default border width of box handles, in surface pixels.
pub const DEFAULT_BOX_WIDTH: f64 = 2.0;

/// Options for constructing a [`Stage`](super::Stage).
///
/// Deserializes with every field optional, so a settings file only needs to
/// name what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageOptions {
    /// Width of the display surface.
    pub width: f64,

    /// Height of the display surface.
    pub height: f64,

    /// Minimum box width and height in image pixels.
    pub minimum_size: f64,

    /// Border width of the resize/move handles.
    pub box_width: f64,

    /// Label given to boxes that are created without one.
    pub default_label: String,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_SIZE,
            height: DEFAULT_SURFACE_SIZE,
            minimum_size: DEFAULT_MINIMUM_SIZE,
            box_width: DEFAULT_BOX_WIDTH,
            default_label: String::new(),
        }
    }
}

impl StageOptions {
    /// Creates options for a surface of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_minimum_size(mut self, minimum_size: f64) -> Self {
        self.minimum_size = minimum_size;
        self
    }

    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    /// Replaces unusable values with their defaults.
    ///
    /// A minimum size or box width that is zero, negative, or not finite
    /// falls back to the default.
    pub fn sanitized(mut self) -> Self {
        if !(self.minimum_size.is_finite() && self.minimum_size > 0.0) {
            self.minimum_size = DEFAULT_MINIMUM_SIZE;
        }
        if !(self.box_width.is_finite() && self.box_width > 0.0) {
            self.box_width = DEFAULT_BOX_WIDTH;
        }
        self
    }
}
