#![forbid(unsafe_code)]

//! Pointer events delivered to the drag controller.
//!
//! A pointer event carries two coordinates: `position`, relative to the list
//! container (used for hit-testing rows and the handle band), and `screen`,
//! relative to the surface the floating preview is drawn on. Hosts that draw
//! the preview inside the list itself can leave the two equal, which is what
//! [`PointerEvent::new`] does.

use crate::geometry::Point;

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Primary button (left mouse button, touch contact).
    #[default]
    Primary,
    /// Secondary button (right mouse button).
    Secondary,
    /// Middle button (scroll wheel click).
    Middle,
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Button pressed down.
    Down(PointerButton),
    /// Pointer moved, with or without a button held.
    Move,
    /// Button released.
    Up(PointerButton),
    /// The platform took the gesture away (focus loss, system gesture).
    Cancel,
}

/// A single pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerKind,
    /// Position relative to the list container.
    pub position: Point,
    /// Position relative to the preview surface.
    pub screen: Point,
}

impl PointerEvent {
    /// Create a pointer event whose screen position equals its list position.
    #[must_use]
    pub const fn new(kind: PointerKind, x: u16, y: u16) -> Self {
        let position = Point::new(x, y);
        Self {
            kind,
            position,
            screen: position,
        }
    }

    /// Primary-button press at `(x, y)`.
    #[must_use]
    pub const fn down(x: u16, y: u16) -> Self {
        Self::new(PointerKind::Down(PointerButton::Primary), x, y)
    }

    /// Move to `(x, y)`.
    #[must_use]
    pub const fn moved(x: u16, y: u16) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    /// Primary-button release at `(x, y)`.
    #[must_use]
    pub const fn up(x: u16, y: u16) -> Self {
        Self::new(PointerKind::Up(PointerButton::Primary), x, y)
    }

    /// Gesture cancellation at `(x, y)`.
    #[must_use]
    pub const fn cancel(x: u16, y: u16) -> Self {
        Self::new(PointerKind::Cancel, x, y)
    }

    /// Override the screen-space position.
    #[must_use]
    pub const fn with_screen(mut self, x: u16, y: u16) -> Self {
        self.screen = Point::new(x, y);
        self
    }
}
