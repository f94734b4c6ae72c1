//! Integer geometry used by the grid and the generators
//!
//! `Position`, `Size` and `Rect` are plain `Copy` values. Rectangles are
//! half-open: a `Rect` covers `x..x + w` and `y..y + h`, so a rectangle with a
//! non-positive width or height simply covers no cells.

use std::fmt;
use std::ops::{Add, Sub};

/// A cell coordinate on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (taxicab) distance to another position
    pub fn manhattan(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Number of cells, zero for degenerate sizes
    pub fn area(&self) -> i32 {
        self.width.max(0) * self.height.max(0)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An axis-aligned rectangle: origin plus width/height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle covering a whole grid of the given size
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn origin(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Area in cells; degenerate rectangles have zero area
    pub fn area(&self) -> i32 {
        self.w.max(0) * self.h.max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.bottom()
    }

    /// Grow the rectangle by `margin` cells on every side
    pub fn expand(&self, margin: i32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.w + 2 * margin,
            self.h + 2 * margin,
        )
    }

    /// Clip this rectangle to `bounds`
    ///
    /// Disjoint rectangles produce a rectangle with a non-positive width or
    /// height, which covers no cells.
    pub fn clamp(&self, bounds: Rect) -> Rect {
        let x1 = self.x.max(bounds.x);
        let y1 = self.y.max(bounds.y);
        let x2 = self.right().min(bounds.right());
        let y2 = self.bottom().min(bounds.bottom());
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Every covered position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let Rect { x, y, w, h } = *self;
        (y..y + h.max(0)).flat_map(move |py| (x..x + w.max(0)).map(move |px| Position::new(px, py)))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {} {}x{}]", self.x, self.y, self.w, self.h)
    }
}
