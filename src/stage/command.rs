//! Discrete input commands.
//!
//! Input adapters translate raw keyboard and wheel events into [`Command`]
//! values; [`Stage::apply`] runs them.

use crate::geometry::BoxId;

use super::{Direction, NudgeMode, Stage};

/// Keyboard nudge step in image pixels.
pub const NUDGE_STEP: f64 = 1.0;

/// Nudge step with the coarse modifier (ctrl/meta) held.
pub const COARSE_NUDGE_STEP: f64 = 10.0;

/// An arrow key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    fn unit(self) -> (f64, f64) {
        match self {
            Arrow::Up => (0.0, -1.0),
            Arrow::Down => (0.0, 1.0),
            Arrow::Left => (-1.0, 0.0),
            Arrow::Right => (1.0, 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Tab.
    HighlightNext,
    /// Shift+Tab.
    HighlightPrevious,
    /// Delete: the highlight moves on, then the top box is disposed.
    DeleteTop,
    /// Moves or resizes the top box.
    Nudge { dx: f64, dy: f64, mode: NudgeMode },
    /// Zooms when the modifier is held, pans otherwise.
    Wheel {
        delta_x: f64,
        delta_y: f64,
        zoom_modifier: bool,
    },
}

impl Command {
    /// Builds the nudge for an arrow key.
    ///
    /// `coarse` selects the 10 px step and `resize` grows or shrinks the box
    /// instead of moving it.
    pub fn arrow(arrow: Arrow, coarse: bool, resize: bool) -> Self {
        let step = if coarse { COARSE_NUDGE_STEP } else { NUDGE_STEP };
        let (ux, uy) = arrow.unit();
        Command::Nudge {
            dx: ux * step,
            dy: uy * step,
            mode: if resize {
                NudgeMode::Resize
            } else {
                NudgeMode::Move
            },
        }
    }
}

impl Stage {
    /// Runs one input command.
    ///
    /// Returns the box the command acted on, if any.
    pub fn apply(&mut self, command: Command) -> Option<BoxId> {
        match command {
            Command::HighlightNext => self.highlight_next(Direction::Forward),
            Command::HighlightPrevious => self.highlight_next(Direction::Backward),
            Command::DeleteTop => {
                let top = self.top_box()?.id();
                self.highlight_next(Direction::Forward);
                self.dispose_box(top);
                Some(top)
            }
            Command::Nudge { dx, dy, mode } => {
                let top = self.top_box()?.id();
                self.nudge(top, dx, dy, mode).then_some(top)
            }
            Command::Wheel {
                delta_x,
                delta_y,
                zoom_modifier,
            } => {
                if zoom_modifier {
                    self.zoom(self.zoom_factor() - delta_y / 100.0, None);
                } else {
                    self.move_delta(-delta_x, -delta_y);
                }
                None
            }
        }
    }
}
