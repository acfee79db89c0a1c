#![forbid(unsafe_code)]

//! Edge auto-scroll.
//!
//! While a drag rests on the first or last visible row, the list scrolls one
//! row per tick and the dragged item follows it. Ticks are deferred callbacks
//! on the host's event queue ([`ListHost::post`]); there is no timer thread.
//!
//! ```text
//!            arm(dir)               tick (more rows)
//! Disarmed ──────────▶ Armed(dir) ◀─────────────┐
//!    ▲                    │ │                    │
//!    │     disarm()       │ └────────────────────┘
//!    └────────────────────┤
//!                         │ tick (boundary)
//!                         ▼
//!                  Armed(dir), exhausted
//! ```
//!
//! An exhausted session stays armed so that re-arming the same direction
//! while the pointer still rests on the edge does not restart scrolling.

use std::time::Duration;

use crate::adapter::RowAdapter;
use crate::collection::{CollectionError, ReorderableSource};
use crate::host::{ListHost, TimerToken};
use crate::reorder::{Walk, walk_to};

/// Direction the viewport scrolls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Toward position 0.
    TowardStart,
    /// Toward the last position.
    TowardEnd,
}

/// Result of handling one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The token was not the pending one (superseded or disarmed). Nothing happened.
    Stale,
    /// Scrolled one row and moved the dragged item; the next tick is scheduled.
    Scrolled {
        direction: ScrollDirection,
        walk: Walk,
    },
    /// The list boundary was reached; the dragged item sits at the boundary
    /// position and no further tick is scheduled.
    BoundaryReached {
        direction: ScrollDirection,
        walk: Walk,
    },
}

#[derive(Debug, Clone, Copy)]
struct Session {
    direction: ScrollDirection,
    pending: Option<TimerToken>,
}

/// Auto-scroll scheduler.
#[derive(Debug, Clone)]
pub struct AutoScroll {
    session: Option<Session>,
    interval: Duration,
}

impl AutoScroll {
    /// A disarmed scheduler that reschedules every `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            session: None,
            interval,
        }
    }

    /// Delay between ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Direction of the current session, if armed.
    #[must_use]
    pub fn direction(&self) -> Option<ScrollDirection> {
        self.session.map(|s| s.direction)
    }

    /// True if a session exists (possibly exhausted).
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.session.is_some()
    }

    /// The tick currently waiting on the host's queue.
    #[must_use]
    pub fn pending(&self) -> Option<TimerToken> {
        self.session.and_then(|s| s.pending)
    }

    /// Start scrolling in `direction`, ticking immediately.
    ///
    /// A no-op if already armed in the same direction. Arming the other
    /// direction cancels the pending tick and replaces the session.
    /// Returns true if a new session was started.
    pub fn arm<H: ListHost + ?Sized>(&mut self, direction: ScrollDirection, host: &mut H) -> bool {
        if let Some(session) = self.session {
            if session.direction == direction {
                return false;
            }
            if let Some(token) = session.pending {
                host.cancel(token);
            }
        }
        let token = host.post(Duration::ZERO);
        self.session = Some(Session {
            direction,
            pending: Some(token),
        });
        dragsort_core::debug!(?direction, token = token.0, "auto-scroll armed");
        true
    }

    /// Stop scrolling. Safe to call when nothing is armed.
    pub fn disarm<H: ListHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(session) = self.session.take() {
            if let Some(token) = session.pending {
                host.cancel(token);
            }
            dragsort_core::debug!(direction = ?session.direction, "auto-scroll disarmed");
        }
    }

    /// Run the tick identified by `token`.
    ///
    /// Scrolls the viewport one row past the visible edge and walks the
    /// dragged item (currently at `*hover`) to that new edge position. At the
    /// list boundary the item is walked onto the boundary position and the
    /// session is left exhausted.
    pub fn tick<H, S>(
        &mut self,
        token: TimerToken,
        host: &mut H,
        adapter: &mut RowAdapter<S>,
        hover: &mut usize,
    ) -> Result<TickOutcome, CollectionError>
    where
        H: ListHost + ?Sized,
        S: ReorderableSource,
    {
        let Some(session) = self.session.as_mut() else {
            return Ok(TickOutcome::Stale);
        };
        if session.pending != Some(token) {
            dragsort_core::trace!(token = token.0, "stale auto-scroll tick ignored");
            return Ok(TickOutcome::Stale);
        }
        session.pending = None;
        let direction = session.direction;

        let count = adapter.count();
        let edge = match direction {
            ScrollDirection::TowardEnd => host.last_visible(),
            ScrollDirection::TowardStart => host.first_visible(),
        };
        let (Some(edge), Some(last)) = (edge, count.checked_sub(1)) else {
            return Ok(TickOutcome::BoundaryReached {
                direction,
                walk: Walk {
                    from: *hover,
                    to: *hover,
                    steps: 0,
                },
            });
        };

        let (next, at_boundary) = match direction {
            ScrollDirection::TowardEnd if edge >= last => (last, true),
            ScrollDirection::TowardEnd => (edge + 1, false),
            ScrollDirection::TowardStart if edge == 0 => (0, true),
            ScrollDirection::TowardStart => (edge - 1, false),
        };

        host.smooth_scroll_to(next);
        let from = *hover;
        let walked = walk_to(adapter.source_mut(), hover, next);
        if *hover != from {
            adapter.mark_reordered();
        }
        adapter.set_hover(Some(*hover));
        let walk = walked?;

        if at_boundary {
            dragsort_core::debug!(?direction, position = next, "auto-scroll reached boundary");
            return Ok(TickOutcome::BoundaryReached { direction, walk });
        }

        let token = host.post(self.interval);
        if let Some(session) = self.session.as_mut() {
            session.pending = Some(token);
        }
        dragsort_core::trace!(?direction, position = next, token = token.0, "auto-scroll tick");
        Ok(TickOutcome::Scrolled { direction, walk })
    }
}
