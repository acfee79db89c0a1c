#![forbid(unsafe_code)]

//! Deterministic harness for drag-to-reorder.
//!
//! [`Harness`] wires a [`DragController`] to a [`SimulatedList`] and a
//! [`RecordingPreview`], routes pointer events by row position, and runs due
//! auto-scroll callbacks on a virtual clock. Nothing sleeps.
//!
//! # Example
//!
//! ```ignore
//! let mut h = Harness::letters("ABCDE", 5)?;
//! h.set_drag_mode(true);
//! h.press(2)?;
//! h.drag_to(0)?;
//! h.release()?;
//! assert_eq!(h.labels(), "CABDE");
//! ```

pub mod list;
pub mod preview;

use std::time::Duration;

use dragsort_core::event::PointerEvent;
use dragsort_core::geometry::Point;
use dragsort_widgets::adapter::{
    AdapterConfig, AdapterError, BoundRow, FieldBinding, RowAdapter, RowTemplate,
};
use dragsort_widgets::autoscroll::TickOutcome;
use dragsort_widgets::collection::{ItemId, OrderedCollection, ReorderableSource};
use dragsort_widgets::config::{ConfigError, DragConfig};
use dragsort_widgets::controller::{DragContext, DragController, DragError, DragTransition};
use dragsort_widgets::host::ListHost;

pub use list::SimulatedList;
pub use preview::{RecordingPreview, ShownPreview};

/// Field key used by [`Harness::letters`].
pub const LABEL: &str = "label";

/// Controller, adapter, list, and preview driven together.
pub struct Harness<S = OrderedCollection> {
    pub controller: DragController,
    pub adapter: RowAdapter<S>,
    pub list: SimulatedList,
    pub preview: RecordingPreview,
    pointer: Point,
    transitions: Vec<DragTransition>,
    ticks: Vec<TickOutcome>,
}

impl Harness<OrderedCollection> {
    /// One single-cell row per character of `labels`, `rows` visible at once,
    /// default drag configuration.
    pub fn letters(labels: &str, rows: usize) -> Result<Self, ConfigError> {
        let source =
            OrderedCollection::from_records(labels.chars().map(|c| [(LABEL, c.to_string())]));
        let config = AdapterConfig::new(
            RowTemplate::new(1).with_text(LABEL),
            vec![FieldBinding::new(LABEL, LABEL)],
        );
        let adapter = RowAdapter::new(source, config)?;
        let list = SimulatedList::new(adapter.count(), rows);
        Self::new(adapter, list, DragConfig::default())
    }

    /// The `label` field of every item, concatenated in display order.
    #[must_use]
    pub fn labels(&self) -> String {
        self.adapter
            .source()
            .iter()
            .map(|item| item.field(LABEL).unwrap_or("?"))
            .collect()
    }
}

impl<S: ReorderableSource> Harness<S> {
    /// Assemble a harness. The list is laid out from the adapter.
    pub fn new(
        adapter: RowAdapter<S>,
        list: SimulatedList,
        config: DragConfig,
    ) -> Result<Self, ConfigError> {
        let controller = DragController::new(config)?;
        let mut harness = Self {
            controller,
            adapter,
            list,
            preview: RecordingPreview::new(),
            pointer: Point::default(),
            transitions: Vec::new(),
            ticks: Vec::new(),
        };
        harness.relayout();
        Ok(harness)
    }

    /// Toggle drag mode through the controller.
    pub fn set_drag_mode(&mut self, enabled: bool) {
        let mut cx = DragContext::new(&mut self.list, &mut self.adapter, &mut self.preview);
        self.controller.set_drag_mode(enabled, &mut cx);
        self.relayout();
    }

    /// Deliver a raw pointer event.
    pub fn send(&mut self, event: PointerEvent) -> Result<DragTransition, DragError> {
        self.relayout();
        self.pointer = event.position;
        let mut cx = DragContext::new(&mut self.list, &mut self.adapter, &mut self.preview);
        let result = self.controller.handle_pointer(&event, &mut cx);
        self.relayout();
        let transition = result?;
        dragsort_core::trace!(id = transition.transition_id, effect = ?transition.effect, "harness event");
        self.transitions.push(transition);
        Ok(transition)
    }

    /// Press on the handle of the visible row at `position`. A position that
    /// is not visible presses empty space.
    pub fn press(&mut self, position: usize) -> Result<DragTransition, DragError> {
        let at = self.point_or_outside(self.list.handle_point(position));
        self.press_at(at)
    }

    /// Press at an arbitrary list point.
    pub fn press_at(&mut self, at: Point) -> Result<DragTransition, DragError> {
        self.send(PointerEvent::down(at.x, at.y))
    }

    /// Move the pointer onto the visible row at `position`.
    pub fn drag_to(&mut self, position: usize) -> Result<DragTransition, DragError> {
        let at = self.point_or_outside(self.list.handle_point(position));
        self.move_to(at)
    }

    /// Move the pointer to an arbitrary list point.
    pub fn move_to(&mut self, at: Point) -> Result<DragTransition, DragError> {
        self.send(PointerEvent::moved(at.x, at.y))
    }

    /// Release at the last pointer position.
    pub fn release(&mut self) -> Result<DragTransition, DragError> {
        let at = self.pointer;
        self.send(PointerEvent::up(at.x, at.y))
    }

    /// Cancel at the last pointer position.
    pub fn cancel(&mut self) -> Result<DragTransition, DragError> {
        let at = self.pointer;
        self.send(PointerEvent::cancel(at.x, at.y))
    }

    /// Advance the virtual clock by `by`, running every callback that comes
    /// due on the way, in order. Returns the outcomes of this call's ticks.
    pub fn advance(&mut self, by: Duration) -> Result<Vec<TickOutcome>, DragError> {
        let until = self.list.now() + by;
        let mut outcomes = Vec::new();
        while let Some(token) = self.list.take_due(until) {
            let mut cx = DragContext::new(&mut self.list, &mut self.adapter, &mut self.preview);
            let outcome = self.controller.on_timer(token, &mut cx);
            self.relayout();
            let outcome = outcome?;
            dragsort_core::trace!(token = token.0, ?outcome, "harness tick");
            outcomes.push(outcome);
        }
        self.list.advance_clock_to(until);
        self.ticks.extend(outcomes.iter().copied());
        Ok(outcomes)
    }

    /// Run callbacks already due without moving the clock.
    pub fn run_pending(&mut self) -> Result<Vec<TickOutcome>, DragError> {
        self.advance(Duration::ZERO)
    }

    /// Swap the data source through the controller.
    pub fn replace_source(&mut self, source: S) -> S {
        let mut cx = DragContext::new(&mut self.list, &mut self.adapter, &mut self.preview);
        let old = self.controller.replace_source(source, &mut cx);
        self.relayout();
        old
    }

    /// Identities in display order.
    pub fn order(&self) -> Vec<ItemId> {
        (0..self.adapter.count())
            .filter_map(|p| self.adapter.item_id(p).ok())
            .collect()
    }

    /// Bind every visible row, as the list would on repaint.
    pub fn visible_rows(&self) -> Result<Vec<BoundRow>, AdapterError> {
        let (Some(first), Some(last)) = (self.list.first_visible(), self.list.last_visible())
        else {
            return Ok(Vec::new());
        };
        (first..=last).map(|p| self.adapter.bind(p)).collect()
    }

    /// Every transition produced so far.
    #[must_use]
    pub fn transitions(&self) -> &[DragTransition] {
        &self.transitions
    }

    /// Every tick outcome produced so far.
    #[must_use]
    pub fn ticks(&self) -> &[TickOutcome] {
        &self.ticks
    }

    /// Re-measure every row, as the list does when it rebinds after a
    /// data-set-changed notification.
    fn relayout(&mut self) {
        let count = self.adapter.count();
        self.list.set_count(count);
        let heights = (0..count)
            .map(|p| self.adapter.measure(p).unwrap_or(1))
            .collect();
        self.list.set_row_heights(heights);
    }

    fn point_or_outside(&self, point: Option<Point>) -> Point {
        point.unwrap_or_else(|| self.list.outside_point())
    }
}
