//! The three interchangeable encodings of an axis-aligned integer rectangle,
//! and the single normalized representation (`Rect`) everything else in the
//! crate is built on.

use crate::cell::Cell;
use crate::error::Result;

/// A normalized axis-aligned rectangle: `c0` is top-left, `c3` is
/// bottom-right, and `c0.x <= c3.x`, `c0.y <= c3.y` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub c0: Cell,
    pub c3: Cell,
}

impl Rect {
    /// Build from two corners in any order, normalizing so `c0` ends up
    /// top-left.
    pub fn from_corners(a: Cell, b: Cell) -> Self {
        let c0 = Cell::new(a.x.min(b.x), a.y.min(b.y));
        let c3 = Cell::new(a.x.max(b.x), a.y.max(b.y));
        Rect { c0, c3 }
    }

    pub fn from_step(cell: Cell, step: Cell) -> Self {
        let step = Cell::new(step.x.max(0), step.y.max(0));
        Rect::from_corners(cell, cell + step)
    }

    pub fn from_span(cell: Cell, span: Cell) -> Self {
        let span = Cell::new(span.x.max(1), span.y.max(1));
        Rect::from_corners(cell, cell + span - Cell::new(1, 1))
    }

    pub fn as_corners(self) -> Corners {
        Corners {
            c0: self.c0,
            c3: self.c3,
        }
    }

    pub fn as_step(self) -> Step {
        Step {
            cell: self.c0,
            step: self.c3 - self.c0,
        }
    }

    pub fn as_span(self) -> Span {
        Span {
            cell: self.c0,
            span: self.c3 - self.c0 + Cell::new(1, 1),
        }
    }

    pub fn step(self) -> Cell {
        self.c3 - self.c0
    }

    pub fn span(self) -> Cell {
        self.c3 - self.c0 + Cell::new(1, 1)
    }

    pub fn area(self) -> i64 {
        let span = self.span();
        span.x * span.y
    }

    /// A zero-step rectangle: the rectangle is degenerate (a line or a
    /// point).
    pub fn is_degenerate(self) -> bool {
        self.c0.x == self.c3.x || self.c0.y == self.c3.y
    }

    pub fn translate(self, delta: Cell) -> Self {
        Rect::from_corners(self.c0 + delta, self.c3 + delta)
    }

    pub fn rotate_clockwise(self) -> Self {
        Rect::from_corners(self.c0.rotate_clockwise(), self.c3.rotate_clockwise())
    }

    pub fn rotate_counterclockwise(self) -> Self {
        Rect::from_corners(
            self.c0.rotate_counterclockwise(),
            self.c3.rotate_counterclockwise(),
        )
    }

    pub fn rotate(self, from: crate::cell::CardinalDirection, to: crate::cell::CardinalDirection) -> Result<Self> {
        Ok(Rect::from_corners(self.c0.rotate(from, to)?, self.c3.rotate(from, to)?))
    }

    pub fn mirror_horizontally(self) -> Self {
        Rect::from_corners(self.c0.mirror_horizontally(), self.c3.mirror_horizontally())
    }

    pub fn mirror_vertically(self) -> Self {
        Rect::from_corners(self.c0.mirror_vertically(), self.c3.mirror_vertically())
    }

    /// The smallest rectangle containing both `a` and `b`.
    pub fn min_max(a: Rect, b: Rect) -> Rect {
        Rect::from_corners(
            Cell::new(a.c0.x.min(b.c0.x), a.c0.y.min(b.c0.y)),
            Cell::new(a.c3.x.max(b.c3.x), a.c3.y.max(b.c3.y)),
        )
    }
}

impl From<Corners> for Rect {
    fn from(c: Corners) -> Self {
        Rect::from_corners(c.c0, c.c3)
    }
}

impl From<Step> for Rect {
    fn from(s: Step) -> Self {
        Rect::from_step(s.cell, s.step)
    }
}

impl From<Span> for Rect {
    fn from(s: Span) -> Self {
        Rect::from_span(s.cell, s.span)
    }
}

/// Corner-pair encoding: `c0` top-left, `c3` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corners {
    pub c0: Cell,
    pub c3: Cell,
}

/// Anchor-plus-step encoding: `step = c3 - c0`, both components `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub cell: Cell,
    pub step: Cell,
}

/// Anchor-plus-span encoding: `span = c3 - c0 + (1, 1)`, both components
/// `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub cell: Cell,
    pub span: Cell,
}

#[cfg(test)]
fn sample() -> Rect {
    Rect::from_corners(Cell::new(2, 3), Cell::new(9, 11))
}

#[test]
fn round_trips_through_all_three_encodings() {
    let r = sample();
    assert_eq!(Rect::from(r.as_corners()), r);
    assert_eq!(Rect::from(r.as_step()), r);
    assert_eq!(Rect::from(r.as_span()), r);
}

#[test]
fn un_normalized_corners_are_swapped() {
    let r = Rect::from_corners(Cell::new(9, 11), Cell::new(2, 3));
    assert_eq!(r, sample());
}

#[test]
fn normalize_is_idempotent() {
    let r = sample();
    assert_eq!(Rect::from_corners(r.c0, r.c3), r);
}

#[test]
fn area_matches_span_product() {
    let r = Rect::from_corners(Cell::new(0, 0), Cell::new(20, 20));
    assert_eq!(r.area(), 441);
}

#[test]
fn rotate_four_times_is_identity() {
    let r = sample();
    let mut rotated = r;
    for _ in 0..4 {
        rotated = rotated.rotate_clockwise();
    }
    assert_eq!(rotated, r);
}

#[test]
fn mirror_is_involution() {
    let r = sample();
    assert_eq!(r.mirror_horizontally().mirror_horizontally(), r);
    assert_eq!(r.mirror_vertically().mirror_vertically(), r);
}

#[test]
fn translate_inverse_restores_original() {
    let r = sample();
    let d = Cell::new(-4, 6);
    assert_eq!(r.translate(d).translate(Cell::new(-d.x, -d.y)), r);
}

#[test]
fn min_max_is_smallest_enclosing_rect() {
    let a = Rect::from_corners(Cell::new(0, 0), Cell::new(5, 5));
    let b = Rect::from_corners(Cell::new(3, -2), Cell::new(10, 4));
    assert_eq!(
        Rect::min_max(a, b),
        Rect::from_corners(Cell::new(0, -2), Cell::new(10, 5))
    );
}
