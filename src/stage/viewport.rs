//! Pan and zoom shared by the background and annotation layers.

use crate::geometry::{Coord, ImageBounds, Pixel, Surface};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;

/// The transform from image pixel space onto the display surface.
///
/// `surface = image * zoom + offset`. Both layers always share one viewport,
/// so boxes stay glued to the background under any pan or zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    surface_width: f64,
    surface_height: f64,
    offset: Coord<Surface>,
    zoom: f64,
}

impl Viewport {
    pub fn new(surface_width: f64, surface_height: f64) -> Self {
        Self {
            surface_width,
            surface_height,
            offset: Coord::origin(),
            zoom: 1.0,
        }
    }

    pub fn offset(&self) -> Coord<Surface> {
        self.offset
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Maps a surface point (e.g. a pointer position) into image space.
    pub fn to_image(&self, point: Coord<Surface>) -> Coord<Pixel> {
        Coord::new(
            (point.x - self.offset.x) / self.zoom,
            (point.y - self.offset.y) / self.zoom,
        )
    }

    /// Maps an image point onto the surface.
    pub fn to_surface(&self, point: Coord<Pixel>) -> Coord<Surface> {
        Coord::new(
            point.x * self.zoom + self.offset.x,
            point.y * self.zoom + self.offset.y,
        )
    }

    /// Sets the zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    ///
    /// Zoom scales from the surface origin; the offset is left alone. A NaN
    /// factor is ignored.
    pub fn set_zoom(&mut self, factor: f64) -> f64 {
        if !factor.is_nan() {
            self.zoom = factor.clamp(MIN_ZOOM, MAX_ZOOM);
        }
        self.zoom
    }

    /// Pans by `(dx, dy)`, keeping at least half of the zoomed image on screen.
    pub fn pan_by(&mut self, dx: f64, dy: f64, image: ImageBounds) {
        let x = clamp_axis(
            self.offset.x + dx,
            image.width * self.zoom,
            self.surface_width,
        );
        let y = clamp_axis(
            self.offset.y + dy,
            image.height * self.zoom,
            self.surface_height,
        );
        self.offset = Coord::new(x, y);
    }

    /// Back to the origin at zoom 1.
    pub fn reset(&mut self) {
        self.offset = Coord::origin();
        self.zoom = 1.0;
    }
}

/// Clamps one axis of a proposed offset.
///
/// An image smaller than the viewport may leave it by at most half its own
/// extent on either side. A larger image may scroll until its far half
/// reaches the viewport's middle.
fn clamp_axis(proposed: f64, scaled_extent: f64, viewport_extent: f64) -> f64 {
    let fits = scaled_extent < viewport_extent;
    if proposed < 0.0 {
        let min = if fits {
            -scaled_extent / 2.0
        } else {
            -scaled_extent + viewport_extent / 2.0
        };
        proposed.max(min)
    } else {
        let max = if fits {
            viewport_extent - scaled_extent / 2.0
        } else {
            viewport_extent / 2.0
        };
        proposed.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        let mut viewport = Viewport::new(500.0, 500.0);
        assert_eq!(viewport.set_zoom(0.1), MIN_ZOOM);
        assert_eq!(viewport.set_zoom(10.0), MAX_ZOOM);
        assert_eq!(viewport.set_zoom(1.5), 1.5);
        assert_eq!(viewport.set_zoom(f64::NAN), 1.5);
    }

    #[test]
    fn surface_and_image_space_round_trip() {
        let mut viewport = Viewport::new(500.0, 500.0);
        viewport.set_zoom(2.0);
        viewport.pan_by(40.0, -20.0, ImageBounds::new(1000.0, 1000.0));

        let image = viewport.to_image(Coord::new(140.0, 80.0));
        assert_eq!((image.x, image.y), (50.0, 50.0));

        let surface = viewport.to_surface(image);
        assert_eq!((surface.x, surface.y), (140.0, 80.0));
    }

    #[test]
    fn small_image_pan_is_center_biased() {
        let mut viewport = Viewport::new(500.0, 400.0);
        let image = ImageBounds::new(200.0, 100.0);

        viewport.pan_by(-10_000.0, -10_000.0, image);
        assert_eq!(viewport.offset(), Coord::new(-100.0, -50.0));

        viewport.pan_by(20_000.0, 20_000.0, image);
        assert_eq!(viewport.offset(), Coord::new(400.0, 350.0));
    }

    #[test]
    fn large_image_pan_is_edge_biased() {
        let mut viewport = Viewport::new(500.0, 400.0);
        let image = ImageBounds::new(1000.0, 800.0);

        viewport.pan_by(-10_000.0, -10_000.0, image);
        assert_eq!(viewport.offset(), Coord::new(-750.0, -600.0));

        viewport.pan_by(20_000.0, 20_000.0, image);
        assert_eq!(viewport.offset(), Coord::new(250.0, 200.0));
    }

    #[test]
    fn pan_clamp_uses_zoomed_extent() {
        let mut viewport = Viewport::new(500.0, 500.0);
        viewport.set_zoom(2.0);
        viewport.pan_by(-10_000.0, 0.0, ImageBounds::new(200.0, 200.0));
        assert_eq!(viewport.offset().x, -200.0);
    }

    #[test]
    fn small_pan_is_unclamped() {
        let mut viewport = Viewport::new(500.0, 500.0);
        viewport.pan_by(-15.0, 25.0, ImageBounds::new(300.0, 300.0));
        assert_eq!(viewport.offset(), Coord::new(-15.0, 25.0));
    }
}
