#![forbid(unsafe_code)]

//! Drag gesture controller.
//!
//! [`DragController`] owns the whole reorder interaction: it arms on a press
//! inside a row's handle band, walks the dragged item through the ordered
//! source as the pointer moves, drives the floating preview and edge
//! auto-scroll, and ends the drag on release or cancel.
//!
//! The controller is attached to a list by composition. Every operation
//! takes a [`DragContext`] holding the three collaborators it drives; nothing
//! is reached through globals.
//!
//! ```text
//!        down on handle           move / tick
//! Idle ─────────────────▶ Armed ──▶ Dragging ◀──┐
//!  ▲     (same event)                │  └───────┘
//!  └─────────────────────────────────┘
//!              up / cancel
//! ```
//!
//! Events that arrive while idle are returned as
//! [`DragEffect::Forwarded`] so the host can apply its default handling.
//!
//! # Notifications
//!
//! After every operation the adapter's accumulated [`DataChange`] is flushed
//! to [`ListHost::data_set_changed`], so readers never observe a reorder or
//! hover change without a matching notification.
//!
//! [`DataChange`]: crate::host::DataChange

use std::fmt;

use dragsort_core::color::Rgba;
use dragsort_core::event::{PointerEvent, PointerKind};
use dragsort_core::geometry::{Point, Rect};

use crate::adapter::{AdapterError, RowAdapter};
use crate::autoscroll::{AutoScroll, ScrollDirection, TickOutcome};
use crate::collection::{CollectionError, ReorderableSource};
use crate::config::{ConfigError, DragConfig};
use crate::host::{ListHost, TimerToken};
use crate::preview::{FloatingPreview, PreviewHandle, RowSnapshot, preview_anchor};
use crate::reorder::{Walk, walk_to};

/// The collaborators a [`DragController`] drives.
pub struct DragContext<'a, H: ?Sized, S, P: ?Sized> {
    /// The list container.
    pub host: &'a mut H,
    /// Row adapter owning the ordered source.
    pub adapter: &'a mut RowAdapter<S>,
    /// Floating preview surface.
    pub preview: &'a mut P,
}

impl<'a, H, S, P> DragContext<'a, H, S, P>
where
    H: ListHost + ?Sized,
    S: ReorderableSource,
    P: FloatingPreview + ?Sized,
{
    /// Bundle the collaborators for one call.
    pub fn new(host: &'a mut H, adapter: &'a mut RowAdapter<S>, preview: &'a mut P) -> Self {
        Self {
            host,
            adapter,
            preview,
        }
    }

    fn flush(&mut self) {
        let change = self.adapter.take_changes();
        if !change.is_empty() {
            self.host.data_set_changed(change);
        }
    }
}

// ---------------------------------------------------------------------------
// State and transitions
// ---------------------------------------------------------------------------

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    Idle,
    /// Handle pressed; the preview snapshot is being captured. Promoted to
    /// `Dragging` within the same event, or back to `Idle` if capture fails.
    Armed { origin: usize },
    /// Drag in progress; `hover` is where the dragged item currently sits.
    Dragging { origin: usize, hover: usize },
}

/// Why an event was handed back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardReason {
    /// Move, release or cancel without a drag in progress.
    IdleWithoutActiveDrag,
    /// Drag mode is off.
    DragModeDisabled,
    /// Press with a button other than the configured handle button.
    ButtonMismatch,
    /// Press with no row under the pointer.
    NoRowUnderPointer,
    /// Press on a row but outside its handle band.
    OutsideHandle,
}

/// Why an event was consumed without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragNoopReason {
    /// A second press arrived while dragging.
    ActiveDragAlreadyInProgress,
}

/// What one pointer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEffect {
    /// A drag began at `origin`.
    Started {
        origin: usize,
        preview: PreviewHandle,
    },
    /// The pointer moved during a drag.
    Tracked {
        /// Resolved target position, `None` if no row is under the pointer.
        target: Option<usize>,
        /// Reorder performed for this event.
        walk: Walk,
        /// Auto-scroll direction after the event.
        autoscroll: Option<ScrollDirection>,
    },
    /// The drag ended with a release; the item stays at `position`.
    Released { origin: usize, position: usize },
    /// The drag ended with a cancel or a source replacement; the item stays
    /// at `position`.
    Canceled { origin: usize, position: usize },
    /// Consumed without effect.
    Noop { reason: DragNoopReason },
    /// Not handled; the host should apply its default handling.
    Forwarded { reason: ForwardReason },
}

impl DragEffect {
    /// True if the host should handle the event itself.
    #[must_use]
    pub const fn is_forwarded(&self) -> bool {
        matches!(self, Self::Forwarded { .. })
    }
}

/// One state-machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragState,
    pub to: DragState,
    pub effect: DragEffect,
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    origin: usize,
    hover: usize,
    pointer: Point,
    preview: PreviewHandle,
    row_height: u16,
}

/// Errors surfaced by controller operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragError {
    /// The ordered source rejected a position.
    Collection(CollectionError),
    /// The dragged row could not be bound for its snapshot.
    Adapter(AdapterError),
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection(err) => write!(f, "reorder failed: {err}"),
            Self::Adapter(err) => write!(f, "drag preview capture failed: {err}"),
        }
    }
}

impl std::error::Error for DragError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Collection(err) => Some(err),
            Self::Adapter(err) => Some(err),
        }
    }
}

impl From<CollectionError> for DragError {
    fn from(err: CollectionError) -> Self {
        Self::Collection(err)
    }
}

impl From<AdapterError> for DragError {
    fn from(err: AdapterError) -> Self {
        Self::Adapter(err)
    }
}

/// Resolve a list-relative point to a row position in `0..count`.
///
/// A point on the divider between two rows resolves to the row above: if the
/// direct hit test finds no row, it is retried one divider height higher.
pub fn resolve_position<H: ListHost + ?Sized>(
    host: &H,
    count: usize,
    point: Point,
) -> Option<usize> {
    let hit = host.position_at(point).or_else(|| {
        let divider = host.divider_height();
        if divider == 0 {
            return None;
        }
        point.checked_up(divider).and_then(|above| host.position_at(above))
    });
    hit.filter(|&position| position < count)
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Drag-to-reorder interaction controller.
#[derive(Debug, Clone)]
pub struct DragController {
    config: DragConfig,
    state: DragState,
    session: Option<DragSession>,
    autoscroll: AutoScroll,
    transition_counter: u64,
}

impl DragController {
    /// Build a controller, rejecting an invalid configuration.
    pub fn new(config: DragConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            dragsort_core::warn!(%err, "drag configuration rejected");
            return Err(err);
        }
        let autoscroll = AutoScroll::new(config.autoscroll_interval);
        Ok(Self {
            config,
            state: DragState::Idle,
            session: None,
            autoscroll,
            transition_counter: 0,
        })
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// True while a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Position the dragged item currently occupies.
    #[must_use]
    pub fn hover(&self) -> Option<usize> {
        self.session.map(|s| s.hover)
    }

    /// Position the dragged item started from.
    #[must_use]
    pub fn origin(&self) -> Option<usize> {
        self.session.map(|s| s.origin)
    }

    /// Last pointer position seen during the drag.
    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        self.session.map(|s| s.pointer)
    }

    /// Handle of the shown preview.
    #[must_use]
    pub fn preview_handle(&self) -> Option<PreviewHandle> {
        self.session.map(|s| s.preview)
    }

    /// The auto-scroll scheduler.
    #[must_use]
    pub fn autoscroll(&self) -> &AutoScroll {
        &self.autoscroll
    }

    /// Set the preview background colour used by the next drag.
    pub fn set_overlay_color(&mut self, color: Rgba) {
        self.config.overlay_color = color;
    }

    /// Set the preview opacity used by the next drag.
    pub fn set_overlay_opacity(&mut self, opacity: f32) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ConfigError::OpacityOutOfRange(opacity));
        }
        self.config.overlay_opacity = opacity;
        Ok(())
    }

    /// Show or hide handle overlays. Presses only arm while drag mode is on;
    /// a drag already in progress is unaffected.
    pub fn set_drag_mode<H, S, P>(&mut self, enabled: bool, cx: &mut DragContext<'_, H, S, P>)
    where
        H: ListHost + ?Sized,
        S: ReorderableSource,
        P: FloatingPreview + ?Sized,
    {
        cx.adapter.set_drag_mode(enabled);
        dragsort_core::debug!(enabled, "drag mode toggled");
        cx.flush();
    }

    /// Whether presses on a handle arm a drag.
    #[must_use]
    pub fn drag_mode<S: ReorderableSource>(&self, adapter: &RowAdapter<S>) -> bool {
        adapter.drag_mode()
    }

    /// Swap the backing source. An active drag is canceled first.
    pub fn replace_source<H, S, P>(&mut self, source: S, cx: &mut DragContext<'_, H, S, P>) -> S
    where
        H: ListHost + ?Sized,
        S: ReorderableSource,
        P: FloatingPreview + ?Sized,
    {
        if self.session.is_some() {
            self.end_drag(cx);
        }
        let old = cx.adapter.reload(source);
        dragsort_core::debug!(count = cx.adapter.count(), "source replaced");
        cx.flush();
        old
    }

    /// Feed one pointer event.
    pub fn handle_pointer<H, S, P>(
        &mut self,
        event: &PointerEvent,
        cx: &mut DragContext<'_, H, S, P>,
    ) -> Result<DragTransition, DragError>
    where
        H: ListHost + ?Sized,
        S: ReorderableSource,
        P: FloatingPreview + ?Sized,
    {
        let span = dragsort_core::trace_span!("drag_pointer", kind = ?event.kind);
        let _guard = span.enter();

        let from = self.state;
        let result = match (self.state, event.kind) {
            (DragState::Idle, PointerKind::Down(button)) => {
                if !cx.adapter.drag_mode() {
                    Ok(forward(ForwardReason::DragModeDisabled))
                } else if button != self.config.handle_button {
                    Ok(forward(ForwardReason::ButtonMismatch))
                } else {
                    self.try_arm(event, cx)
                }
            }
            (DragState::Idle, _) => Ok(forward(ForwardReason::IdleWithoutActiveDrag)),
            (_, PointerKind::Down(_)) => Ok(DragEffect::Noop {
                reason: DragNoopReason::ActiveDragAlreadyInProgress,
            }),
            (_, PointerKind::Move) => self.track(event, cx),
            (_, PointerKind::Up(_)) => Ok(self.release(cx)),
            (_, PointerKind::Cancel) => Ok(self.end_drag(cx)),
        };
        cx.flush();
        let effect = result?;

        self.transition_counter = self.transition_counter.saturating_add(1);
        Ok(DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state,
            effect,
        })
    }

    /// Run the deferred callback identified by `token`.
    pub fn on_timer<H, S, P>(
        &mut self,
        token: TimerToken,
        cx: &mut DragContext<'_, H, S, P>,
    ) -> Result<TickOutcome, DragError>
    where
        H: ListHost + ?Sized,
        S: ReorderableSource,
        P: FloatingPreview + ?Sized,
    {
        let Some(session) = self.session.as_mut() else {
            return Ok(TickOutcome::Stale);
        };
        let result = self
            .autoscroll
            .tick(token, &mut *cx.host, &mut *cx.adapter, &mut session.hover);
        if let DragState::Dragging { origin, .. } = self.state {
            self.state = DragState::Dragging {
                origin,
                hover: session.hover,
            };
        }
        cx.flush();
        Ok(result?)
    }

    fn try_arm<H, S, P>(
        &mut self,
        event: &PointerEvent,
        cx: &mut DragContext<'_, H, S, P>,
    ) -> Result<DragEffect, DragError>
    where
        H: ListHost + ?Sized,
        S: ReorderableSource,
        P: FloatingPreview + ?Sized,
    {
        let point = event.position;
        let Some(position) = resolve_position(&*cx.host, cx.adapter.count(), point) else {
            return Ok(forward(ForwardReason::NoRowUnderPointer));
        };
        let Some(row) = cx.host.row_bounds(position).filter(|r| !r.is_empty()) else {
            return Ok(forward(ForwardReason::NoRowUnderPointer));
        };
        // A divider hit resolves to the row above; test the band at the
        // nearest point of that row.
        if !row
            .trailing_band(cx.adapter.handle_width())
            .contains(nearest_in_row(row, point))
        {
            return Ok(forward(ForwardReason::OutsideHandle));
        }

        self.state = DragState::Armed { origin: position };
        let view = match cx.adapter.bind_content(position) {
            Ok(view) => view,
            Err(err) => {
                self.state = DragState::Idle;
                return Err(err.into());
            }
        };
        let snapshot = RowSnapshot {
            position,
            view,
            size: Rect::from_size(row.width, row.height),
            background: self.config.preview_tint(),
        };
        let handle = cx
            .preview
            .show(snapshot, preview_anchor(event.screen, row.height));
        cx.adapter.set_hover(Some(position));

        self.session = Some(DragSession {
            origin: position,
            hover: position,
            pointer: point,
            preview: handle,
            row_height: row.height,
        });
        self.state = DragState::Dragging {
            origin: position,
            hover: position,
        };
        dragsort_core::info!(origin = position, "drag started");
        Ok(DragEffect::Started {
            origin: position,
            preview: handle,
        })
    }

    fn track<H, S, P>(
        &mut self,
        event: &PointerEvent,
        cx: &mut DragContext<'_, H, S, P>,
    ) -> Result<DragEffect, DragError>
    where
        H: ListHost + ?Sized,
        S: ReorderableSource,
        P: FloatingPreview + ?Sized,
    {
        let Some(session) = self.session.as_mut() else {
            return Ok(forward(ForwardReason::IdleWithoutActiveDrag));
        };
        session.pointer = event.position;

        let target = resolve_position(&*cx.host, cx.adapter.count(), event.position);
        let walk = match target {
            Some(target) if target != session.hover => {
                let from = session.hover;
                let walked = walk_to(cx.adapter.source_mut(), &mut session.hover, target);
                // A failed step may leave earlier steps applied; report them.
                if session.hover != from {
                    cx.adapter.mark_reordered();
                    cx.adapter.set_hover(Some(session.hover));
                }
                self.state = DragState::Dragging {
                    origin: session.origin,
                    hover: session.hover,
                };
                walked?
            }
            _ => Walk {
                from: session.hover,
                to: session.hover,
                steps: 0,
            },
        };

        cx.preview.move_to(
            session.preview,
            preview_anchor(event.screen, session.row_height),
        );

        match target {
            Some(t) if Some(t) == cx.host.last_visible() => {
                self.autoscroll.arm(ScrollDirection::TowardEnd, &mut *cx.host);
            }
            Some(t) if Some(t) == cx.host.first_visible() => {
                self.autoscroll
                    .arm(ScrollDirection::TowardStart, &mut *cx.host);
            }
            _ => self.autoscroll.disarm(&mut *cx.host),
        }

        self.state = DragState::Dragging {
            origin: session.origin,
            hover: session.hover,
        };
        Ok(DragEffect::Tracked {
            target,
            walk,
            autoscroll: self.autoscroll.direction(),
        })
    }

    fn release<H, S, P>(&mut self, cx: &mut DragContext<'_, H, S, P>) -> DragEffect
    where
        H: ListHost + ?Sized,
        S: ReorderableSource,
        P: FloatingPreview + ?Sized,
    {
        match self.finish(cx) {
            Some(session) => {
                dragsort_core::info!(
                    origin = session.origin,
                    position = session.hover,
                    "drag released"
                );
                DragEffect::Released {
                    origin: session.origin,
                    position: session.hover,
                }
            }
            None => forward(ForwardReason::IdleWithoutActiveDrag),
        }
    }

    fn end_drag<H, S, P>(&mut self, cx: &mut DragContext<'_, H, S, P>) -> DragEffect
    where
        H: ListHost + ?Sized,
        S: ReorderableSource,
        P: FloatingPreview + ?Sized,
    {
        match self.finish(cx) {
            Some(session) => {
                dragsort_core::info!(
                    origin = session.origin,
                    position = session.hover,
                    "drag canceled"
                );
                DragEffect::Canceled {
                    origin: session.origin,
                    position: session.hover,
                }
            }
            None => forward(ForwardReason::IdleWithoutActiveDrag),
        }
    }

    fn finish<H, S, P>(&mut self, cx: &mut DragContext<'_, H, S, P>) -> Option<DragSession>
    where
        H: ListHost + ?Sized,
        S: ReorderableSource,
        P: FloatingPreview + ?Sized,
    {
        let session = self.session.take()?;
        cx.adapter.set_hover(None);
        cx.preview.dismiss(session.preview);
        self.autoscroll.disarm(&mut *cx.host);
        self.state = DragState::Idle;
        Some(session)
    }
}

const fn forward(reason: ForwardReason) -> DragEffect {
    DragEffect::Forwarded { reason }
}

/// `point` with its y pulled into `row`'s vertical extent.
fn nearest_in_row(row: Rect, point: Point) -> Point {
    let last = row.bottom().saturating_sub(1).max(row.y);
    Point::new(point.x, point.y.max(row.y).min(last))
}
