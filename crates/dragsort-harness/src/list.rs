#![forbid(unsafe_code)]

//! A simulated virtualized list.
//!
//! Each row is as tall as the adapter last measured it (see
//! [`SimulatedList::set_row_heights`]), falling back to a default height, and
//! rows are separated by an optional divider. The viewport shows a fixed
//! number of row slots; scrolling moves the first visible position. Deferred callbacks are kept on a virtual clock that only
//! advances when the caller says so, which makes auto-scroll timing exact.

use std::collections::BTreeMap;
use std::time::Duration;

use dragsort_core::geometry::{Point, Rect};
use dragsort_widgets::host::{DataChange, ListHost, TimerToken};

/// Deterministic [`ListHost`].
#[derive(Debug, Clone)]
pub struct SimulatedList {
    width: u16,
    row_height: u16,
    heights: Vec<u16>,
    divider: u16,
    rows: usize,
    count: usize,
    first: usize,
    now: Duration,
    next_token: u64,
    timers: BTreeMap<TimerToken, Duration>,
    posted: Vec<(TimerToken, Duration)>,
    notifications: Vec<DataChange>,
    scrolls: Vec<usize>,
}

impl SimulatedList {
    /// A list of `count` rows showing `rows` row slots, 40 cells wide, rows
    /// one cell tall with no divider.
    #[must_use]
    pub fn new(count: usize, rows: usize) -> Self {
        Self {
            width: 40,
            row_height: 1,
            heights: Vec::new(),
            divider: 0,
            rows: rows.max(1),
            count,
            first: 0,
            now: Duration::ZERO,
            next_token: 0,
            timers: BTreeMap::new(),
            posted: Vec::new(),
            notifications: Vec::new(),
            scrolls: Vec::new(),
        }
    }

    /// Set the list width.
    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width.max(1);
        self
    }

    /// Set the height of rows with no measured height.
    #[must_use]
    pub fn with_row_height(mut self, row_height: u16) -> Self {
        self.row_height = row_height.max(1);
        self
    }

    /// Set the divider height.
    #[must_use]
    pub fn with_divider(mut self, divider: u16) -> Self {
        self.divider = divider;
        self
    }

    /// Lay rows out with the given per-position heights, as a host does
    /// after rebinding. Zero heights are raised to one cell.
    pub fn set_row_heights(&mut self, heights: Vec<u16>) {
        self.heights = heights;
        for height in &mut self.heights {
            *height = (*height).max(1);
        }
    }

    /// Layout height of the row at `position`.
    #[must_use]
    pub fn height_of(&self, position: usize) -> u16 {
        self.heights
            .get(position)
            .copied()
            .unwrap_or(self.row_height)
    }

    /// Top edge of the visible row slot `slot`.
    fn slot_top(&self, slot: usize) -> u16 {
        (0..slot).fold(0u16, |top, s| {
            top.saturating_add(self.height_of(self.first + s))
                .saturating_add(self.divider)
        })
    }

    /// Number of rows the list displays.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Keep the row count in step with the data source.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        self.first = self.first.min(self.max_first());
    }

    /// First visible position, ignoring emptiness.
    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.first
    }

    /// Jump so that `first` is the top row (clamped).
    pub fn scroll_to_top_row(&mut self, first: usize) {
        self.first = first.min(self.max_first());
    }

    fn max_first(&self) -> usize {
        self.count.saturating_sub(self.rows)
    }

    /// A point inside the handle band of the row at `position`.
    #[must_use]
    pub fn handle_point(&self, position: usize) -> Option<Point> {
        self.row_bounds(position)
            .map(|r| Point::new(r.right().saturating_sub(1), r.y))
    }

    /// A point on the left edge of the row at `position`, outside any handle.
    #[must_use]
    pub fn body_point(&self, position: usize) -> Option<Point> {
        self.row_bounds(position).map(|r| Point::new(r.x, r.y))
    }

    /// A point on the divider just below the row at `position`.
    #[must_use]
    pub fn divider_point(&self, position: usize) -> Option<Point> {
        if self.divider == 0 {
            return None;
        }
        self.row_bounds(position)
            .map(|r| Point::new(r.right().saturating_sub(1), r.bottom()))
    }

    /// A point below the last row slot where nothing is hit.
    #[must_use]
    pub fn outside_point(&self) -> Point {
        Point::new(self.width.saturating_sub(1), self.bounds().bottom())
    }

    // ---- Virtual clock ----

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Callbacks waiting to run, with their due times.
    pub fn pending_timers(&self) -> impl Iterator<Item = (TimerToken, Duration)> + '_ {
        self.timers.iter().map(|(t, due)| (*t, *due))
    }

    /// Every callback ever posted, with the delay it was posted with.
    #[must_use]
    pub fn posted(&self) -> &[(TimerToken, Duration)] {
        &self.posted
    }

    /// Remove and return the earliest callback due at or before `until`,
    /// moving the clock to its due time. Ties run in posting order.
    pub fn take_due(&mut self, until: Duration) -> Option<TimerToken> {
        let (token, due) = self
            .timers
            .iter()
            .filter(|(_, due)| **due <= until)
            .min_by_key(|(token, due)| (**due, **token))
            .map(|(t, d)| (*t, *d))?;
        self.timers.remove(&token);
        self.now = self.now.max(due);
        Some(token)
    }

    /// Move the clock forward to `until` (never backward).
    pub fn advance_clock_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    // ---- Observations ----

    /// Every data-set-changed notification received.
    #[must_use]
    pub fn notifications(&self) -> &[DataChange] {
        &self.notifications
    }

    /// Every smooth-scroll request received.
    #[must_use]
    pub fn scrolls(&self) -> &[usize] {
        &self.scrolls
    }

    /// Forget recorded notifications and scroll requests.
    pub fn clear_log(&mut self) {
        self.notifications.clear();
        self.scrolls.clear();
    }
}

impl ListHost for SimulatedList {
    fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.slot_top(self.rows))
    }

    fn position_at(&self, point: Point) -> Option<usize> {
        if !self.bounds().contains(point) {
            return None;
        }
        let mut top = 0u16;
        for slot in 0..self.rows {
            let position = self.first + slot;
            let bottom = top.saturating_add(self.height_of(position));
            if point.y < bottom {
                return (position < self.count).then_some(position);
            }
            top = bottom.saturating_add(self.divider);
            if point.y < top {
                // On the divider below `position`.
                return None;
            }
        }
        None
    }

    fn divider_height(&self) -> u16 {
        self.divider
    }

    fn first_visible(&self) -> Option<usize> {
        (self.count > 0).then_some(self.first)
    }

    fn last_visible(&self) -> Option<usize> {
        let last = self.count.checked_sub(1)?;
        Some((self.first + self.rows - 1).min(last))
    }

    fn row_bounds(&self, position: usize) -> Option<Rect> {
        let slot = self.row_slot(position)?;
        Some(Rect::new(
            0,
            self.slot_top(slot),
            self.width,
            self.height_of(position),
        ))
    }

    fn smooth_scroll_to(&mut self, position: usize) {
        self.scrolls.push(position);
        let Some(last) = self.count.checked_sub(1) else {
            return;
        };
        let position = position.min(last);
        if position < self.first {
            self.first = position;
        } else if position >= self.first + self.rows {
            self.first = (position + 1 - self.rows).min(self.max_first());
        }
    }

    fn post(&mut self, delay: Duration) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.timers.insert(token, self.now + delay);
        self.posted.push((token, delay));
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.timers.remove(&token);
    }

    fn data_set_changed(&mut self, change: DataChange) {
        self.notifications.push(change);
    }
}
