#![forbid(unsafe_code)]

//! A [`FloatingPreview`] that records what it was asked to draw.

use dragsort_core::geometry::Point;
use dragsort_widgets::preview::{FloatingPreview, PreviewHandle, RowSnapshot};

/// One preview that was shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownPreview {
    pub handle: PreviewHandle,
    pub snapshot: RowSnapshot,
    /// Where it was first placed.
    pub at: Point,
    /// Where it is now.
    pub current: Point,
    pub dismissed: bool,
}

/// Recording preview surface.
#[derive(Debug, Clone, Default)]
pub struct RecordingPreview {
    shown: Vec<ShownPreview>,
    moves: Vec<(PreviewHandle, Point)>,
    stray: Vec<PreviewHandle>,
}

impl RecordingPreview {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every preview shown, in order.
    #[must_use]
    pub fn shown(&self) -> &[ShownPreview] {
        &self.shown
    }

    /// The preview currently on screen, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ShownPreview> {
        self.shown.iter().rev().find(|p| !p.dismissed)
    }

    /// Every `move_to` call.
    #[must_use]
    pub fn moves(&self) -> &[(PreviewHandle, Point)] {
        &self.moves
    }

    /// Handles that were moved or dismissed without being shown (or after
    /// being dismissed). Empty in a correct run.
    #[must_use]
    pub fn stray(&self) -> &[PreviewHandle] {
        &self.stray
    }

    fn live_mut(&mut self, handle: PreviewHandle) -> Option<&mut ShownPreview> {
        self.shown
            .iter_mut()
            .find(|p| p.handle == handle && !p.dismissed)
    }
}

impl FloatingPreview for RecordingPreview {
    fn show(&mut self, snapshot: RowSnapshot, at: Point) -> PreviewHandle {
        let handle = PreviewHandle(self.shown.len() as u64 + 1);
        self.shown.push(ShownPreview {
            handle,
            snapshot,
            at,
            current: at,
            dismissed: false,
        });
        handle
    }

    fn move_to(&mut self, handle: PreviewHandle, at: Point) {
        self.moves.push((handle, at));
        match self.live_mut(handle) {
            Some(preview) => preview.current = at,
            None => self.stray.push(handle),
        }
    }

    fn dismiss(&mut self, handle: PreviewHandle) {
        match self.live_mut(handle) {
            Some(preview) => preview.dismissed = true,
            None => self.stray.push(handle),
        }
    }
}
