//! Integer lattice points and the four cardinal directions tile geometry is
//! expressed in terms of.

use std::ops::{Add, Sub};

use crate::error::{Error, Result};

/// A point on the integer plane. X grows rightward, Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub const ZERO: Cell = Cell { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Cell { x, y }
    }

    /// `(x, y) -> (-y, x)`
    pub fn rotate_clockwise(self) -> Self {
        Cell::new(-self.y, self.x)
    }

    /// `(x, y) -> (y, -x)`
    pub fn rotate_counterclockwise(self) -> Self {
        Cell::new(self.y, -self.x)
    }

    pub fn mirror_horizontally(self) -> Self {
        Cell::new(-self.x, self.y)
    }

    pub fn mirror_vertically(self) -> Self {
        Cell::new(self.x, -self.y)
    }

    /// Rotate as if turning a face pointing `side` to instead point `to`,
    /// driven by `(to - side) mod 4`.
    pub fn rotate(self, side: CardinalDirection, to: CardinalDirection) -> Result<Self> {
        Ok(match side.steps_to(to) {
            0 => self,
            1 => self.rotate_clockwise(),
            2 => self.rotate_clockwise().rotate_clockwise(),
            3 => self.rotate_counterclockwise(),
            _ => return Err(Error::Unreachable("steps_to always returns 0..4".to_string())),
        })
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, rhs: Cell) -> Cell {
        Cell::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// One of the four compass directions, used both to pick a rotation and to
/// pick which side of a tile an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum CardinalDirection {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl CardinalDirection {
    /// Number of clockwise quarter-turns from `self` to `to`, in `0..4`.
    pub fn steps_to(self, to: CardinalDirection) -> i64 {
        (to as i64 - self as i64).rem_euclid(4)
    }
}

#[test]
fn add_sub_are_inverses() {
    let a = Cell::new(3, -4);
    let d = Cell::new(-2, 7);
    assert_eq!((a + d) - d, a);
}

#[test]
fn rotate_clockwise_four_times_is_identity() {
    let c = Cell::new(5, -2);
    let mut r = c;
    for _ in 0..4 {
        r = r.rotate_clockwise();
    }
    assert_eq!(r, c);
}

#[test]
fn rotate_clockwise_and_counterclockwise_cancel() {
    let c = Cell::new(5, -2);
    assert_eq!(c.rotate_clockwise().rotate_counterclockwise(), c);
}

#[test]
fn mirror_is_involution() {
    let c = Cell::new(3, 9);
    assert_eq!(c.mirror_horizontally().mirror_horizontally(), c);
    assert_eq!(c.mirror_vertically().mirror_vertically(), c);
}

#[test]
fn rotate_by_direction_matches_explicit_rotation() {
    use CardinalDirection::*;
    let c = Cell::new(2, 3);
    assert_eq!(c.rotate(Up, Right).unwrap(), c.rotate_clockwise());
    assert_eq!(c.rotate(Up, Down).unwrap(), c.rotate_clockwise().rotate_clockwise());
    assert_eq!(c.rotate(Up, Left).unwrap(), c.rotate_counterclockwise());
    assert_eq!(c.rotate(Up, Up).unwrap(), c);
}

#[test]
fn steps_to_wraps_mod_4() {
    use CardinalDirection::*;
    assert_eq!(Left.steps_to(Right), 2);
    assert_eq!(Right.steps_to(Up), 3);
}
