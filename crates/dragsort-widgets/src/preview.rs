#![forbid(unsafe_code)]

//! Floating drag preview.
//!
//! The controller never draws. It captures a [`RowSnapshot`] of the dragged
//! row and hands it to a [`FloatingPreview`] implementation, which owns the
//! image for as long as the drag lasts.

use dragsort_core::color::Rgba;
use dragsort_core::geometry::{Point, Rect};

use crate::adapter::RowView;

/// Handle to a preview shown by a [`FloatingPreview`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewHandle(pub u64);

/// Captured image of a row, as it looked before it became the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    /// Position the row occupied when captured.
    pub position: usize,
    /// Normal bound content of the row.
    pub view: RowView,
    /// Size of the captured area.
    pub size: Rect,
    /// Background fill with the overlay opacity folded into its alpha.
    pub background: Rgba,
}

impl RowSnapshot {
    /// Height of the captured row.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.size.height
    }
}

/// Surface that renders the floating preview above the list.
pub trait FloatingPreview {
    /// Show `snapshot` with its top-left corner at `at`.
    fn show(&mut self, snapshot: RowSnapshot, at: Point) -> PreviewHandle;

    /// Move a shown preview.
    fn move_to(&mut self, handle: PreviewHandle, at: Point);

    /// Remove a preview and release its image.
    fn dismiss(&mut self, handle: PreviewHandle);
}

/// Top-left corner for a preview of height `row_height` following a pointer
/// at `screen`: pinned to the left edge and vertically centred on the pointer.
#[must_use]
pub const fn preview_anchor(screen: Point, row_height: u16) -> Point {
    Point::new(0, screen.y.saturating_sub(row_height / 2))
}
