//! Box records and their resize/move handle sets.

use crate::change::BoxView;
use crate::geometry::{BoxId, Pixel, Rect};

/// Border color of the highlighted box's handles.
pub const HIGHLIGHT_COLOR: &str = "red";

/// Border color of every other box's handles.
pub const DIMINISHED_COLOR: &str = "rgba(0, 0, 0, 0.3)";

/// A corner handle of a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
    ];

    /// Applies a drag of this corner by `(dx, dy)` to `rect`.
    ///
    /// The opposite corner stays put. Aspect ratio is not preserved.
    pub fn drag(self, rect: Rect<Pixel>, dx: f64, dy: f64) -> Rect<Pixel> {
        let (x, y, w, h) = (rect.x(), rect.y(), rect.width, rect.height);
        match self {
            Anchor::TopLeft => Rect::new(x + dx, y + dy, w - dx, h - dy),
            Anchor::TopRight => Rect::new(x, y + dy, w + dx, h - dy),
            Anchor::BottomLeft => Rect::new(x + dx, y, w - dx, h + dy),
            Anchor::BottomRight => Rect::new(x, y, w + dx, h + dy),
        }
    }
}

/// Visual state of a handle set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleStyle {
    /// Full edit affordance: all four corner anchors enabled.
    Highlighted,
    /// Border dimmed and no anchors enabled.
    Diminished,
}

/// The resize/move handle set attached to a box.
///
/// Rotation is never enabled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transformer {
    style: HandleStyle,
    border_width: f64,
}

impl Transformer {
    pub fn new(style: HandleStyle, border_width: f64) -> Self {
        Self {
            style,
            border_width,
        }
    }

    pub fn style(&self) -> HandleStyle {
        self.style
    }

    pub fn border_width(&self) -> f64 {
        self.border_width
    }

    pub fn border_color(&self) -> &'static str {
        match self.style {
            HandleStyle::Highlighted => HIGHLIGHT_COLOR,
            HandleStyle::Diminished => DIMINISHED_COLOR,
        }
    }

    pub fn enabled_anchors(&self) -> &'static [Anchor] {
        match self.style {
            HandleStyle::Highlighted => &Anchor::ALL,
            HandleStyle::Diminished => &[],
        }
    }

    pub fn is_enabled(&self, anchor: Anchor) -> bool {
        self.enabled_anchors().contains(&anchor)
    }

    pub(crate) fn diminish(&mut self) {
        self.style = HandleStyle::Diminished;
    }

    pub(crate) fn restore(&mut self) {
        self.style = HandleStyle::Highlighted;
    }
}

/// One annotated region on a stage.
///
/// Geometry is kept in image pixel space. The record may hold an
/// unnormalized rectangle between an edit and the following
/// [`Stage::normalize_box`](super::Stage::normalize_box).
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationBox {
    pub(crate) id: BoxId,
    pub(crate) label: String,
    pub(crate) rect: Rect<Pixel>,
    pub(crate) handles: Transformer,
}

impl AnnotationBox {
    pub(crate) fn new(id: BoxId, rect: Rect<Pixel>, label: String, handles: Transformer) -> Self {
        Self {
            id,
            label,
            rect,
            handles,
        }
    }

    pub fn id(&self) -> BoxId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rect(&self) -> Rect<Pixel> {
        self.rect
    }

    pub fn handles(&self) -> &Transformer {
        &self.handles
    }

    pub(crate) fn view(&self, highlighted: bool) -> BoxView {
        BoxView {
            id: self.id,
            label: self.label.clone(),
            x: self.rect.x(),
            y: self.rect.y(),
            width: self.rect.width,
            height: self.rect.height,
            highlighted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_drag_keeps_opposite_corner() {
        let rect: Rect<Pixel> = Rect::new(10.0, 10.0, 20.0, 20.0);

        let tl = Anchor::TopLeft.drag(rect, 5.0, -5.0);
        assert_eq!((tl.xmax(), tl.ymax()), (30.0, 30.0));
        assert_eq!((tl.x(), tl.y()), (15.0, 5.0));

        let br = Anchor::BottomRight.drag(rect, 5.0, -5.0);
        assert_eq!((br.x(), br.y()), (10.0, 10.0));
        assert_eq!((br.xmax(), br.ymax()), (35.0, 25.0));

        let tr = Anchor::TopRight.drag(rect, 5.0, 5.0);
        assert_eq!((tr.x(), tr.ymax()), (10.0, 30.0));

        let bl = Anchor::BottomLeft.drag(rect, 5.0, 5.0);
        assert_eq!((bl.xmax(), bl.y()), (30.0, 10.0));
    }

    #[test]
    fn diminished_handles_disable_anchors() {
        let mut handles = Transformer::new(HandleStyle::Highlighted, 2.0);
        assert_eq!(handles.enabled_anchors().len(), 4);
        assert_eq!(handles.border_color(), HIGHLIGHT_COLOR);

        handles.diminish();
        assert!(!handles.is_enabled(Anchor::TopLeft));
        assert_eq!(handles.border_color(), DIMINISHED_COLOR);

        handles.restore();
        assert!(handles.is_enabled(Anchor::BottomRight));
    }
}
