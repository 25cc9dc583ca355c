//! Change notifications for the annotation stage.
//!
//! The stage publishes a [`Snapshot`] after every committed mutation. Readers
//! subscribe with [`ChangeBus::subscribe`] and receive a [`ChangeStream`],
//! which coalesces bursts of mutations (a continuous drag, a run of keyboard
//! nudges) into one trailing-edge delivery per quiet window.
//!
//! Subscribing starts from "now": a new stream never replays snapshots that
//! were published before it existed.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::geometry::{BoxId, Pixel, Rect};

/// Quiet interval after the last mutation before a snapshot is delivered.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(100);

/// One box as seen by change observers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoxView {
    pub id: BoxId,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub highlighted: bool,
}

impl BoxView {
    /// Returns the box geometry as a pixel-space rectangle.
    pub fn rect(&self) -> Rect<Pixel> {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The stage's box set at one point in time, ordered by box id.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub boxes: Vec<BoxView>,

    /// The box at the top of the stacking order, if any.
    pub top: Option<BoxId>,
}

impl Snapshot {
    /// Returns the highlighted box, if there is one.
    pub fn highlighted(&self) -> Option<&BoxView> {
        self.boxes.iter().find(|view| view.highlighted)
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Publisher side of the stage's change notifications.
#[derive(Debug)]
pub struct ChangeBus {
    sender: Option<watch::Sender<Snapshot>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Snapshot::default());
        Self {
            sender: Some(sender),
        }
    }

    /// Publishes a snapshot, replacing any not yet delivered.
    ///
    /// Publishing with no subscribers is fine; the latest snapshot is kept
    /// for [`ChangeBus::latest`].
    pub fn emit(&self, snapshot: Snapshot) {
        if let Some(sender) = &self.sender {
            sender.send_replace(snapshot);
        }
    }

    /// Returns the most recently published snapshot.
    pub fn latest(&self) -> Snapshot {
        self.sender
            .as_ref()
            .map(|sender| sender.borrow().clone())
            .unwrap_or_default()
    }

    /// Opens a new debounced stream of snapshots.
    ///
    /// After [`ChangeBus::close`] the returned stream is already finished.
    pub fn subscribe(&self) -> ChangeStream {
        let receiver = match &self.sender {
            Some(sender) => sender.subscribe(),
            None => watch::channel(Snapshot::default()).1,
        };
        ChangeStream::new(receiver)
    }

    /// Detaches every subscriber. Later emits are dropped.
    pub fn close(&mut self) {
        self.sender = None;
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_none()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender
            .as_ref()
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A debounced sequence of snapshots.
#[derive(Debug)]
pub struct ChangeStream {
    receiver: watch::Receiver<Snapshot>,
}

impl ChangeStream {
    fn new(receiver: watch::Receiver<Snapshot>) -> Self {
        Self { receiver }
    }

    /// Waits for the next burst of changes to settle and returns its last snapshot.
    ///
    /// Every publish inside the window restarts it; only the snapshot that
    /// was current when the window expired is delivered. Returns `None` once
    /// the bus is closed.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.receiver.changed().await.ok()?;

        loop {
            tokio::select! {
                changed = self.receiver.changed() => {
                    if changed.is_err() {
                        return None;
                    }
                }
                () = tokio::time::sleep(DEBOUNCE_WINDOW) => break,
            }
        }

        Some(self.receiver.borrow_and_update().clone())
    }
}
