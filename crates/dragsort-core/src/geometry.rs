#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are cells with the origin at the top-left, the same convention
//! the list host uses for hit-testing and row layout.

/// A point in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column (0 is leftmost).
    pub x: u16,
    /// Row (0 is topmost).
    pub y: u16,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Move the point up by `dy`, returning `None` if that would cross row 0.
    #[inline]
    pub const fn checked_up(self, dy: u16) -> Option<Self> {
        match self.y.checked_sub(dy) {
            Some(y) => Some(Self { x: self.x, y }),
            None => None,
        }
    }
}

/// An axis-aligned rectangle used for row bounds and the list viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// The trailing horizontal band of `band_width` cells spanning the full
    /// height of this rectangle.
    ///
    /// The band never extends past the left edge; a band wider than the
    /// rectangle covers all of it.
    #[inline]
    pub const fn trailing_band(&self, band_width: u16) -> Rect {
        let width = if band_width < self.width {
            band_width
        } else {
            self.width
        };
        Rect::new(self.right() - width, self.y, width, self.height)
    }
}
