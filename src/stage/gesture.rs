//! Pointer drags: drawing new boxes and moving existing ones.

use crate::geometry::{BoxId, Coord, Pixel, Surface};

use super::Stage;

/// In-flight pointer drag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) enum Gesture {
    #[default]
    Idle,
    Drawing {
        id: BoxId,
    },
    Moving {
        id: BoxId,
        last: Coord<Pixel>,
    },
}

impl Gesture {
    pub(crate) fn target(&self) -> Option<BoxId> {
        match self {
            Gesture::Idle => None,
            Gesture::Drawing { id } | Gesture::Moving { id, .. } => Some(*id),
        }
    }
}

/// How a pointer drag ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// The box was normalized and kept.
    Committed(BoxId),
    /// The drawn box ended below the minimum size and was removed.
    Discarded(BoxId),
    /// No drag was in progress.
    Ignored,
}

impl Stage {
    /// Starts a drag at a surface point.
    ///
    /// On a box, highlights it and starts moving it. On empty canvas, creates
    /// a zero-size box there, highlights it, and starts drawing it. Without a
    /// background, empty canvas ignores the pointer.
    pub fn pointer_down(&mut self, point: Coord<Surface>) -> Option<BoxId> {
        if self.disposed {
            return None;
        }
        let image_point = self.viewport.to_image(point);

        if let Some(id) = self.box_at(point) {
            self.highlight(id);
            self.gesture = Gesture::Moving {
                id,
                last: image_point,
            };
            return Some(id);
        }

        self.background.as_ref()?;

        let id = self.create_box(image_point);
        self.highlight(id);
        self.gesture = Gesture::Drawing { id };
        Some(id)
    }

    /// Tracks the pointer during a drag.
    ///
    /// While drawing, only the size follows the pointer and nothing is
    /// committed. While moving, the raw box follows the pointer and a change
    /// is published; it may hang off the image until the drag ends.
    pub fn pointer_move(&mut self, point: Coord<Surface>) {
        let image_point = self.viewport.to_image(point);
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Drawing { id } => {
                if let Some(record) = self.record_mut(id) {
                    record.rect.width = image_point.x - record.rect.x();
                    record.rect.height = image_point.y - record.rect.y();
                }
            }
            Gesture::Moving { id, last } => {
                let (dx, dy) = (image_point.x - last.x, image_point.y - last.y);
                if let Some(record) = self.record_mut(id) {
                    record.rect = record.rect.translated(dx, dy);
                }
                self.gesture = Gesture::Moving {
                    id,
                    last: image_point,
                };
                self.emit_change();
            }
        }
    }

    /// Ends a drag at a surface point.
    ///
    /// A drawn box with either side shorter than the minimum size is
    /// discarded; anything else is normalized and kept.
    pub fn pointer_up(&mut self, point: Coord<Surface>) -> DragOutcome {
        self.pointer_move(point);
        let gesture = std::mem::take(&mut self.gesture);

        match gesture {
            Gesture::Idle => DragOutcome::Ignored,
            Gesture::Drawing { id } => {
                let minimum_size = self.options.minimum_size;
                let Some(rect) = self.get(id).map(|record| record.rect()) else {
                    return DragOutcome::Ignored;
                };
                if rect.width.abs() < minimum_size || rect.height.abs() < minimum_size {
                    log::debug!("discarding {} drawn below minimum size", id);
                    self.dispose_box(id);
                    DragOutcome::Discarded(id)
                } else {
                    self.normalize_box(id);
                    DragOutcome::Committed(id)
                }
            }
            Gesture::Moving { id, .. } => match self.normalize_box(id) {
                Some(_) => DragOutcome::Committed(id),
                None => DragOutcome::Ignored,
            },
        }
    }

    /// True while a pointer drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.gesture != Gesture::Idle
    }
}
