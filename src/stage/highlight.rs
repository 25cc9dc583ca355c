//! Highlight state: at most one box is active, all others are diminished.

use crate::geometry::BoxId;

use super::Stage;

/// Direction for [`Stage::highlight_next`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Stage {
    /// The highlighted box, if any.
    pub fn highlighted(&self) -> Option<BoxId> {
        self.highlighted
    }

    pub fn is_highlighted(&self, id: BoxId) -> bool {
        self.highlighted == Some(id)
    }

    /// Makes `id` the active box.
    ///
    /// Every other box is diminished, the box is raised to the top of the
    /// stacking order with all anchors enabled, and a change is published.
    pub fn highlight(&mut self, id: BoxId) -> bool {
        let Some(index) = self.boxes.iter().position(|record| record.id == id) else {
            return false;
        };

        for record in &mut self.boxes {
            record.handles.diminish();
        }
        let mut record = self.boxes.remove(index);
        record.handles.restore();
        self.boxes.push(record);
        self.highlighted = Some(id);

        log::debug!("highlighted {}", id);
        self.emit_change();
        true
    }

    /// Moves the highlight to the next or previous box, wrapping around.
    ///
    /// Boxes are visited in creation order. Raising a box to the top does
    /// not change its place in the cycle, so N forward steps over N boxes
    /// return to the box the cycle started from. With nothing highlighted,
    /// forward starts at the oldest box and backward at the newest.
    pub fn highlight_next(&mut self, direction: Direction) -> Option<BoxId> {
        let ids: Vec<BoxId> = self.boxes_by_id().iter().map(|record| record.id).collect();
        if ids.is_empty() {
            return None;
        }

        let current = self
            .highlighted
            .and_then(|id| ids.iter().position(|candidate| *candidate == id));
        let next = match (current, direction) {
            (None, Direction::Forward) => 0,
            (None, Direction::Backward) => ids.len() - 1,
            (Some(index), Direction::Forward) => (index + 1) % ids.len(),
            (Some(index), Direction::Backward) => (index + ids.len() - 1) % ids.len(),
        };

        let id = ids[next];
        self.highlight(id);
        Some(id)
    }
}
