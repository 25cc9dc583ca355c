//! The annotation stage.
//!
//! A [`Stage`] owns one optional background image and an ordered set of
//! boxes drawn over it, plus the pan/zoom [`Viewport`] that both layers
//! share. Boxes are plain records; every operation on a box goes through the
//! stage by [`BoxId`].
//!
//! Geometry edits come in two flavors. [`Stage::set_attr`] writes a raw value
//! and does nothing else. Everything that commits a change
//! ([`Stage::normalize_box`], [`Stage::resize`], [`Stage::nudge`], a finished
//! pointer drag) runs the box through [`normalize`] and then publishes a
//! [`Snapshot`] on the stage's change bus.

mod background;
mod command;
mod gesture;
mod highlight;
mod options;
mod record;
mod seed;
mod viewport;

pub use background::{
    image_size_from_bytes, BackgroundImage, FileImageLoader, ImageLoader, ImageSize, LoadTicket,
};
pub use command::{Arrow, Command, COARSE_NUDGE_STEP, NUDGE_STEP};
pub use gesture::DragOutcome;
pub use highlight::Direction;
pub use options::{StageOptions, DEFAULT_BOX_WIDTH, DEFAULT_MINIMUM_SIZE, DEFAULT_SURFACE_SIZE};
pub use record::{
    Anchor, AnnotationBox, HandleStyle, Transformer, DIMINISHED_COLOR, HIGHLIGHT_COLOR,
};
pub use seed::{read_box_seeds, BoxSeed};
pub use viewport::{Viewport, MAX_ZOOM, MIN_ZOOM};

use crate::change::{ChangeBus, ChangeStream, Snapshot};
use crate::export::{self, ExportFormat, ExportImage};
use crate::geometry::{normalize, BoxId, Coord, ImageBounds, NormalizedRect, Pixel, Rect, Surface};
use crate::validation::{check_export, CheckOptions, CheckReport};

use gesture::Gesture;

/// A box attribute writable through [`Stage::set_attr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxAttr {
    X,
    Y,
    Width,
    Height,
}

/// How a keyboard nudge changes a box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NudgeMode {
    /// Translate the box.
    #[default]
    Move,
    /// Grow or shrink the box from its far edges.
    Resize,
}

/// An annotation surface over one background image.
#[derive(Debug)]
pub struct Stage {
    options: StageOptions,
    viewport: Viewport,
    background: Option<BackgroundImage>,
    /// Stacking order: the last box is on top.
    boxes: Vec<AnnotationBox>,
    highlighted: Option<BoxId>,
    next_id: u64,
    gesture: Gesture,
    load_generation: u64,
    requested_url: Option<String>,
    bus: ChangeBus,
    disposed: bool,
}

impl Stage {
    pub fn new(options: StageOptions) -> Self {
        let options = options.sanitized();
        log::debug!(
            "creating {}x{} stage (minimum box size {})",
            options.width,
            options.height,
            options.minimum_size
        );
        Self {
            viewport: Viewport::new(options.width, options.height),
            options,
            background: None,
            boxes: Vec::new(),
            highlighted: None,
            next_id: 1,
            gesture: Gesture::Idle,
            load_generation: 0,
            requested_url: None,
            bus: ChangeBus::new(),
            disposed: false,
        }
    }

    pub fn options(&self) -> &StageOptions {
        &self.options
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Containment bounds for boxes.
    ///
    /// The background's natural size, or the surface size while no
    /// background is loaded.
    pub fn bounds(&self) -> ImageBounds {
        match &self.background {
            Some(background) => background.bounds(),
            None => ImageBounds::new(self.options.width, self.options.height),
        }
    }

    /// Boxes in stacking order, bottom first.
    pub fn boxes(&self) -> &[AnnotationBox] {
        &self.boxes
    }

    /// Boxes sorted by id, which is creation order.
    pub fn boxes_by_id(&self) -> Vec<&AnnotationBox> {
        let mut sorted: Vec<&AnnotationBox> = self.boxes.iter().collect();
        sorted.sort_by_key(|record| record.id);
        sorted
    }

    pub fn get(&self, id: BoxId) -> Option<&AnnotationBox> {
        self.boxes.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// The box highest in the stacking order.
    pub fn top_box(&self) -> Option<&AnnotationBox> {
        self.boxes.last()
    }

    /// The topmost box under a surface point, edges included.
    pub fn box_at(&self, point: Coord<Surface>) -> Option<BoxId> {
        let image_point = self.viewport.to_image(point);
        self.boxes
            .iter()
            .rev()
            .find(|record| record.rect.canonical().contains(image_point))
            .map(|record| record.id)
    }

    /// Allocates a zero-size box at `at` carrying the default label.
    ///
    /// Like every creation, this does not publish a change; the first
    /// normalize or dispose does.
    pub fn create_box(&mut self, at: Coord<Pixel>) -> BoxId {
        let label = self.options.default_label.clone();
        self.create_box_with(Rect::new(at.x, at.y, 0.0, 0.0), label)
    }

    /// Allocates a box with an explicit rectangle and label, on top of the
    /// stacking order. The rectangle is stored as given.
    pub fn create_box_with(&mut self, rect: Rect<Pixel>, label: impl Into<String>) -> BoxId {
        let id = BoxId::new(self.next_id);
        self.next_id += 1;

        let handles = Transformer::new(HandleStyle::Diminished, self.options.box_width);
        self.boxes
            .push(AnnotationBox::new(id, rect, label.into(), handles));
        log::debug!("created {} at {:?}", id, rect);
        id
    }

    /// Creates a box from a seed and normalizes it.
    pub fn draw_box(&mut self, seed: &BoxSeed) -> BoxId {
        let id = self.create_box_with(seed.rect(), seed.label.clone());
        self.normalize_box(id);
        id
    }

    /// Writes one raw geometry attribute. No normalization, no change event.
    ///
    /// Returns false if `id` is unknown.
    pub fn set_attr(&mut self, id: BoxId, attr: BoxAttr, value: f64) -> bool {
        let Some(record) = self.record_mut(id) else {
            return false;
        };
        let rect = &mut record.rect;
        match attr {
            BoxAttr::X => rect.origin.x = value,
            BoxAttr::Y => rect.origin.y = value,
            BoxAttr::Width => rect.width = value,
            BoxAttr::Height => rect.height = value,
        }
        true
    }

    /// Commits a box's geometry: flips negative extents, clamps it into the
    /// stage bounds and up to the minimum size, and publishes a change.
    pub fn normalize_box(&mut self, id: BoxId) -> Option<NormalizedRect> {
        let bounds = self.bounds();
        let minimum_size = self.options.minimum_size;
        let record = self.record_mut(id)?;

        let normalized = normalize(record.rect.canonical(), bounds, minimum_size);
        record.rect = normalized.rect();
        log::debug!("normalized {} to {:?}", id, record.rect);

        self.emit_change();
        Some(normalized)
    }

    /// Relabels a box and publishes a change.
    pub fn set_label(&mut self, id: BoxId, label: impl Into<String>) -> bool {
        let Some(record) = self.record_mut(id) else {
            return false;
        };
        record.label = label.into();
        self.emit_change();
        true
    }

    /// Removes a box and its handles and publishes a change.
    ///
    /// Disposing the highlighted box leaves nothing highlighted. Unknown ids
    /// are ignored.
    pub fn dispose_box(&mut self, id: BoxId) -> bool {
        let Some(index) = self.boxes.iter().position(|record| record.id == id) else {
            return false;
        };
        self.boxes.remove(index);
        if self.highlighted == Some(id) {
            self.highlighted = None;
        }
        if self.gesture.target() == Some(id) {
            self.gesture = Gesture::Idle;
        }
        log::debug!("disposed {}", id);
        self.emit_change();
        true
    }

    /// Drags one corner anchor of a box by an image-space delta and commits.
    ///
    /// Only anchors enabled on the box's handles respond, so diminished boxes
    /// ignore resizes.
    pub fn resize(&mut self, id: BoxId, anchor: Anchor, dx: f64, dy: f64) -> bool {
        let Some(record) = self.record_mut(id) else {
            return false;
        };
        if !record.handles.is_enabled(anchor) {
            log::debug!("{:?} anchor disabled on {}", anchor, id);
            return false;
        }
        record.rect = anchor.drag(record.rect, dx, dy);
        self.normalize_box(id).is_some()
    }

    /// Moves or resizes a box by a keyboard step and commits.
    pub fn nudge(&mut self, id: BoxId, dx: f64, dy: f64, mode: NudgeMode) -> bool {
        let Some(record) = self.record_mut(id) else {
            return false;
        };
        record.rect = match mode {
            NudgeMode::Move => record.rect.translated(dx, dy),
            NudgeMode::Resize => Rect::new(
                record.rect.x(),
                record.rect.y(),
                record.rect.width + dx,
                record.rect.height + dy,
            ),
        };
        self.normalize_box(id).is_some()
    }

    /// Pans the background and boxes together by a surface delta.
    ///
    /// At least half of the zoomed background stays inside the viewport on
    /// each axis. Does nothing while no background is loaded.
    pub fn move_delta(&mut self, dx: f64, dy: f64) {
        let Some(background) = &self.background else {
            return;
        };
        let bounds = background.bounds();
        self.viewport.pan_by(dx, dy, bounds);
        log::debug!("panned to {:?}", self.viewport.offset());
    }

    /// Sets the shared zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    ///
    /// Zoom scales from the surface's top-left corner. The anchor is
    /// accepted but does not reposition the view.
    pub fn zoom(&mut self, factor: f64, anchor: Option<Coord<Surface>>) -> f64 {
        let zoom = self.viewport.set_zoom(factor);
        log::debug!("zoom {} (requested {}, anchor {:?})", zoom, factor, anchor);
        zoom
    }

    pub fn zoom_factor(&self) -> f64 {
        self.viewport.zoom()
    }

    pub fn pan_offset(&self) -> Coord<Surface> {
        self.viewport.offset()
    }

    pub fn default_label(&self) -> &str {
        &self.options.default_label
    }

    /// Sets the label given to boxes created from now on.
    pub fn set_default_label(&mut self, label: impl Into<String>) {
        self.options.default_label = label.into();
    }

    /// The current box set, ordered by id.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            boxes: self
                .boxes_by_id()
                .into_iter()
                .map(|record| record.view(self.highlighted == Some(record.id)))
                .collect(),
            top: self.top_box().map(|record| record.id),
        }
    }

    /// Opens a debounced stream of snapshots, starting from the next change.
    pub fn subscribe(&self) -> ChangeStream {
        self.bus.subscribe()
    }

    /// The last published snapshot.
    pub fn latest_change(&self) -> Snapshot {
        self.bus.latest()
    }

    pub(crate) fn emit_change(&self) {
        self.bus.emit(self.snapshot());
    }

    /// Encodes the current boxes in `format`.
    ///
    /// Image dimensions come from the background. While none is loaded the
    /// size is unknown: YOLO coordinates are written as `0` and the VOC size
    /// fields are left empty.
    pub fn export(
        &self,
        format: ExportFormat,
        vocabulary: &[String],
        image_name: Option<&str>,
    ) -> String {
        let mut image = ExportImage {
            file_name: image_name.map(str::to_string),
            ..ExportImage::default()
        };
        match &self.background {
            Some(background) => {
                let bounds = background.bounds();
                image.width = bounds.width;
                image.height = bounds.height;
            }
            None if !self.boxes.is_empty() => {
                log::warn!("exporting {} boxes without a background image size", self.len());
            }
            None => {}
        }
        export::encode(format, vocabulary, &self.snapshot().boxes, &image)
    }

    /// Checks the current boxes against `vocabulary` before export.
    ///
    /// Without a background there is no image size to check against.
    pub fn check(&self, vocabulary: &[String]) -> CheckReport {
        let opts = CheckOptions {
            minimum_size: self.options.minimum_size,
        };
        let image = self.background.as_ref().map(BackgroundImage::bounds);
        check_export(vocabulary, &self.snapshot().boxes, image, &opts)
    }

    /// Tears the stage down: closes the change bus and frees every box and
    /// the background. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.clear_boxes();
        self.background = None;
        self.bus.close();
        log::debug!("stage disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub(crate) fn clear_boxes(&mut self) {
        self.boxes.clear();
        self.highlighted = None;
        self.gesture = Gesture::Idle;
    }

    pub(crate) fn record_mut(&mut self, id: BoxId) -> Option<&mut AnnotationBox> {
        self.boxes.iter_mut().find(|record| record.id == id)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(StageOptions::default())
    }
}
