#![forbid(unsafe_code)]

//! The list container the drag controller attaches to.
//!
//! The controller does not own or subclass the list. It drives any container
//! that can hit-test rows, report the visible window, scroll, run deferred
//! callbacks on its own event queue, and repaint when the data changes.
//!
//! # Deferred callbacks
//!
//! [`ListHost::post`] schedules a callback on the host's single-threaded
//! event queue and returns a [`TimerToken`]. When the callback comes due the
//! host hands the token back to
//! [`DragController::on_timer`](crate::controller::DragController::on_timer).
//! Callbacks never run concurrently with pointer handling.

use std::time::Duration;

use bitflags::bitflags;
use dragsort_core::geometry::{Point, Rect};

/// Handle to a deferred callback posted on the host's event queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

bitflags! {
    /// What changed since the host last repainted.
    ///
    /// Any non-empty value means "data set changed": every visible row must
    /// be rebound before the next read.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DataChange: u8 {
        /// The hover (placeholder) position changed.
        const HOVER     = 0b0001;
        /// Drag mode was toggled, so handle overlays appeared or vanished.
        const DRAG_MODE = 0b0010;
        /// Items were reordered.
        const ORDER     = 0b0100;
        /// The backing source was replaced.
        const SOURCE    = 0b1000;
    }
}

/// Capabilities the drag controller needs from the list container.
pub trait ListHost {
    /// Bounds of the list container in its own coordinates.
    fn bounds(&self) -> Rect;

    /// Position of the row under `point`, or `None` over empty space or a
    /// divider.
    fn position_at(&self, point: Point) -> Option<usize>;

    /// Height of the divider drawn between rows.
    fn divider_height(&self) -> u16;

    /// First materialized position, or `None` if the list is empty.
    fn first_visible(&self) -> Option<usize>;

    /// Last materialized position, or `None` if the list is empty.
    fn last_visible(&self) -> Option<usize>;

    /// Bounds of the row at `position`, if it is materialized.
    ///
    /// Rows are laid out at the [`BoundRow::height`] they were last bound
    /// with, so a placeholder keeps the height of the row it replaces.
    ///
    /// [`BoundRow::height`]: crate::adapter::BoundRow::height
    fn row_bounds(&self, position: usize) -> Option<Rect>;

    /// Scroll so that `position` becomes visible.
    fn smooth_scroll_to(&mut self, position: usize);

    /// Post a callback to run after `delay` (`Duration::ZERO` = as soon as
    /// the current event finishes).
    fn post(&mut self, delay: Duration) -> TimerToken;

    /// Cancel a posted callback. Unknown or already-fired tokens are ignored.
    fn cancel(&mut self, token: TimerToken);

    /// The data set changed; rebind visible rows.
    fn data_set_changed(&mut self, change: DataChange);

    /// Index of `position` among the materialized rows (0 = first visible).
    fn row_slot(&self, position: usize) -> Option<usize> {
        let first = self.first_visible()?;
        let last = self.last_visible()?;
        (first..=last)
            .contains(&position)
            .then(|| position - first)
    }
}
