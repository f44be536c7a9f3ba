//! Axis-aligned infinite lines, used to classify tiles during structural
//! edits, compaction, and border discovery.

use crate::rect::Rect;
#[cfg(test)]
use crate::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// An infinite axis-aligned line: `{(x, coordinate) | x}` when horizontal,
/// `{(coordinate, y) | y}` when vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub coordinate: i64,
    pub orientation: Orientation,
}

impl Line {
    pub fn new(coordinate: i64, orientation: Orientation) -> Self {
        Line {
            coordinate,
            orientation,
        }
    }

    pub fn horizontal(y: i64) -> Self {
        Line::new(y, Orientation::Horizontal)
    }

    pub fn vertical(x: i64) -> Self {
        Line::new(x, Orientation::Vertical)
    }

    fn axis_min_max(self, rect: Rect) -> (i64, i64) {
        match self.orientation {
            Orientation::Horizontal => (rect.c0.y, rect.c3.y),
            Orientation::Vertical => (rect.c0.x, rect.c3.x),
        }
    }

    /// `rect` is degenerate along this line's axis and lies exactly on it.
    pub fn fully_contains(self, rect: Rect) -> bool {
        let (min, max) = self.axis_min_max(rect);
        min == max && min == self.coordinate
    }

    /// This line crosses `rect`'s extent on the relevant axis (inclusive).
    pub fn intersects(self, rect: Rect) -> bool {
        let (min, max) = self.axis_min_max(rect);
        min <= self.coordinate && self.coordinate <= max
    }

    /// `self`'s coordinate is at or past `rect`'s far edge on this axis.
    pub fn on_positive_side(self, rect: Rect) -> bool {
        let (_, max) = self.axis_min_max(rect);
        self.coordinate >= max
    }

    /// `self`'s coordinate is at or before `rect`'s near edge on this axis.
    pub fn on_negative_side(self, rect: Rect) -> bool {
        let (min, _) = self.axis_min_max(rect);
        self.coordinate <= min
    }

    pub fn rotate_clockwise(self) -> Self {
        match self.orientation {
            Orientation::Horizontal => Line::vertical(-self.coordinate),
            Orientation::Vertical => Line::horizontal(self.coordinate),
        }
    }

    pub fn rotate_counterclockwise(self) -> Self {
        match self.orientation {
            Orientation::Horizontal => Line::vertical(self.coordinate),
            Orientation::Vertical => Line::horizontal(-self.coordinate),
        }
    }
}

#[cfg(test)]
fn rect() -> Rect {
    Rect::from_corners(Cell::new(0, 0), Cell::new(5, 10))
}

#[test]
fn intersects_is_inclusive_on_both_edges() {
    let r = rect();
    assert!(Line::horizontal(0).intersects(r));
    assert!(Line::horizontal(10).intersects(r));
    assert!(!Line::horizontal(11).intersects(r));
}

#[test]
fn fully_contains_requires_degenerate_and_on_line() {
    let flat = Rect::from_corners(Cell::new(0, 4), Cell::new(5, 4));
    assert!(Line::horizontal(4).fully_contains(flat));
    assert!(!Line::horizontal(3).fully_contains(flat));
    assert!(!Line::horizontal(4).fully_contains(rect()));
}

#[test]
fn positive_and_negative_side_bracket_the_extent() {
    let r = rect();
    assert!(Line::horizontal(10).on_positive_side(r));
    assert!(Line::horizontal(0).on_negative_side(r));
    assert!(!Line::horizontal(5).on_positive_side(r));
    assert!(!Line::horizontal(5).on_negative_side(r));
}
