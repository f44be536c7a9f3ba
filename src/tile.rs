//! `Tile`: a normalized rectangle paired with an opaque handle, plus every
//! rigid-motion and set-theoretic operation the engine needs on one.

use crate::cell::{CardinalDirection, Cell};
use crate::error::{Error, Result};
use crate::line::{Line, Orientation};
use crate::rect::Rect;

/// Handles are host-assigned and never interpreted; the core only compares
/// them for equality.
pub type Handle = u64;

/// An axis-aligned rectangle with an identity. Two tiles are equal iff both
/// their geometry and handle match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub rect: Rect,
    pub handle: Handle,
}

impl Tile {
    pub fn new(rect: Rect, handle: Handle) -> Self {
        Tile { rect, handle }
    }

    pub fn from_corners(c0: Cell, c3: Cell, handle: Handle) -> Self {
        Tile::new(Rect::from_corners(c0, c3), handle)
    }

    /// A fresh tile with the same handle but a different rectangle.
    pub fn with_rect(self, rect: Rect) -> Self {
        Tile::new(rect, self.handle)
    }

    pub fn c0(self) -> Cell {
        self.rect.c0
    }

    pub fn c3(self) -> Cell {
        self.rect.c3
    }

    pub fn area(self) -> i64 {
        self.rect.area()
    }

    /// `[top-left, top-right, bottom-left, bottom-right]`.
    pub fn corner_cells(self) -> [Cell; 4] {
        let Rect { c0, c3 } = self.rect;
        [
            c0,
            Cell::new(c3.x, c0.y),
            Cell::new(c0.x, c3.y),
            c3,
        ]
    }

    /// The rectangle common to both tiles, handling the corner-inside,
    /// plus-cross, and disjoint cases uniformly via per-axis min/max.
    pub fn intersection(self, other: Tile) -> Option<Rect> {
        rect_intersection(self.rect, other.rect)
    }

    pub fn intersects(self, other: Tile) -> bool {
        self.intersection(other).is_some()
    }

    /// `self` wholly contains `other`.
    pub fn contains(self, other: Tile) -> bool {
        self.intersection(other) == Some(other.rect)
    }

    pub fn contains_cell(self, cell: Cell) -> bool {
        let Rect { c0, c3 } = self.rect;
        c0.x <= cell.x && cell.x <= c3.x && c0.y <= cell.y && cell.y <= c3.y
    }

    /// The smallest rectangle containing both tiles' geometry.
    pub fn min_max(a: Tile, b: Tile) -> Rect {
        Rect::min_max(a.rect, b.rect)
    }

    pub fn translate(self, delta: Cell) -> Self {
        self.with_rect(self.rect.translate(delta))
    }

    pub fn rotate_clockwise(self) -> Self {
        self.with_rect(self.rect.rotate_clockwise())
    }

    pub fn rotate_counterclockwise(self) -> Self {
        self.with_rect(self.rect.rotate_counterclockwise())
    }

    pub fn rotate(self, from: CardinalDirection, to: CardinalDirection) -> Result<Self> {
        Ok(self.with_rect(self.rect.rotate(from, to)?))
    }

    pub fn mirror_horizontally(self) -> Self {
        self.with_rect(self.rect.mirror_horizontally())
    }

    pub fn mirror_vertically(self) -> Self {
        self.with_rect(self.rect.mirror_vertically())
    }

    pub fn mirror(self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => self.mirror_horizontally(),
            Orientation::Vertical => self.mirror_vertically(),
        }
    }

    /// The set of integer-coordinate horizontal and vertical lines the
    /// rectangle spans.
    pub fn shred(self) -> Vec<Line> {
        let Rect { c0, c3 } = self.rect;
        let mut lines = Vec::with_capacity((c3.x - c0.x + c3.y - c0.y + 2) as usize);
        for x in c0.x..=c3.x {
            lines.push(Line::vertical(x));
        }
        for y in c0.y..=c3.y {
            lines.push(Line::horizontal(y));
        }
        lines
    }

    /// Remove `area` from `self`, rotating into a canonical frame first when
    /// `prefer` is `Orientation::Vertical` so the cut is always chosen along
    /// the x-axis. Returns `None` when the remainder wouldn't be a
    /// rectangle.
    pub fn un_occupy(self, area: Tile, prefer: Orientation) -> Result<Option<Self>> {
        let rotate = prefer == Orientation::Vertical;

        let (curr, area) = if rotate {
            (
                self.rotate(CardinalDirection::Up, CardinalDirection::Right)?,
                area.rotate(CardinalDirection::Up, CardinalDirection::Right)?,
            )
        } else {
            (self, area)
        };

        let curr = match curr.un_occupy_horizontal(area)? {
            Some(curr) => curr,
            None => return Ok(None),
        };

        Ok(Some(if rotate {
            curr.rotate(CardinalDirection::Right, CardinalDirection::Up)?
        } else {
            curr
        }))
    }

    fn un_occupy_horizontal(self, area: Tile) -> Result<Option<Self>> {
        let curr = self;

        let inter = match curr.intersection(area) {
            Some(inter) => inter,
            None => return Ok(Some(curr)),
        };
        let inter = Tile::new(inter, area.handle);

        let curr_corners = curr.corner_cells();
        let inter_corners = inter.corner_cells();
        let matching = curr_corners
            .iter()
            .filter(|c| inter_corners.contains(c))
            .count();

        match matching {
            1 | 2 => {}
            3 => {
                return Err(Error::Unreachable(
                    "a corner-aligned proper containment cannot reach un_occupy_horizontal".to_string(),
                ))
            }
            _ => return Ok(None),
        }

        let area_to_free = Rect::from_corners(
            Cell::new(curr.c0().x, inter.c0().y),
            Cell::new(curr.c3().x, inter.c3().y),
        );

        let mirror = area_to_free.c0 == curr.c0();

        let (curr, area_to_free) = if mirror {
            (curr.mirror_vertically(), area_to_free.mirror_vertically())
        } else {
            (curr, area_to_free)
        };

        let top_right = Cell::new(area_to_free.c3.x, area_to_free.c0.y);
        let new_rect = Rect::from_corners(curr.c0(), top_right - Cell::new(0, 1));
        let curr = curr.with_rect(new_rect);

        Ok(Some(if mirror {
            curr.mirror_vertically()
        } else {
            curr
        }))
    }
}

pub(crate) fn rect_intersection(a: Rect, b: Rect) -> Option<Rect> {
    let c0 = Cell::new(a.c0.x.max(b.c0.x), a.c0.y.max(b.c0.y));
    let c3 = Cell::new(a.c3.x.min(b.c3.x), a.c3.y.min(b.c3.y));
    if c0.x <= c3.x && c0.y <= c3.y {
        Some(Rect::from_corners(c0, c3))
    } else {
        None
    }
}

#[test]
fn intersection_is_symmetric() {
    let a = Tile::from_corners(Cell::new(0, 0), Cell::new(5, 5), 0);
    let b = Tile::from_corners(Cell::new(3, 3), Cell::new(8, 8), 1);
    assert_eq!(a.intersection(b), b.intersection(a));
}

#[test]
fn touching_rectangles_intersect_at_a_single_cell() {
    let t1 = Tile::from_corners(Cell::new(0, 0), Cell::new(5, 5), 0);
    let t2 = Tile::from_corners(Cell::new(5, 5), Cell::new(10, 10), 1);
    assert_eq!(
        t1.intersection(t2),
        Some(Rect::from_corners(Cell::new(5, 5), Cell::new(5, 5)))
    );
}

#[test]
fn plus_shape_intersection_is_the_central_segment() {
    let v = Tile::from_corners(Cell::new(0, 0), Cell::new(0, 20), 0);
    let h = Tile::from_corners(Cell::new(-10, 10), Cell::new(10, 10), 1);
    assert_eq!(
        v.intersection(h),
        Some(Rect::from_corners(Cell::new(0, 10), Cell::new(0, 10)))
    );
}

#[test]
fn disjoint_rectangles_do_not_intersect() {
    let a = Tile::from_corners(Cell::new(0, 0), Cell::new(1, 1), 0);
    let b = Tile::from_corners(Cell::new(5, 5), Cell::new(6, 6), 1);
    assert_eq!(a.intersection(b), None);
}

#[test]
fn containment_matches_intersection_equal_to_inner() {
    let outer = Tile::from_corners(Cell::new(0, 0), Cell::new(10, 10), 0);
    let inner = Tile::from_corners(Cell::new(2, 2), Cell::new(4, 4), 1);
    assert!(outer.contains(inner));
    assert!(!inner.contains(outer));
}

#[test]
fn corner_cells_are_ordered_tl_tr_bl_br() {
    let t = Tile::from_corners(Cell::new(1, 2), Cell::new(5, 9), 0);
    assert_eq!(
        t.corner_cells(),
        [
            Cell::new(1, 2),
            Cell::new(5, 2),
            Cell::new(1, 9),
            Cell::new(5, 9),
        ]
    );
}

#[test]
fn un_occupy_removes_a_flush_top_strip() {
    let whole = Tile::from_corners(Cell::new(0, 0), Cell::new(9, 9), 0);
    let strip = Tile::from_corners(Cell::new(0, 0), Cell::new(9, 2), 1);
    let remainder = whole.un_occupy(strip, Orientation::Horizontal).unwrap().unwrap();
    assert_eq!(remainder.rect, Rect::from_corners(Cell::new(0, 3), Cell::new(9, 9)));
}

#[test]
fn un_occupy_removes_a_flush_bottom_strip() {
    let whole = Tile::from_corners(Cell::new(0, 0), Cell::new(9, 9), 0);
    let strip = Tile::from_corners(Cell::new(0, 7), Cell::new(9, 9), 1);
    let remainder = whole.un_occupy(strip, Orientation::Horizontal).unwrap().unwrap();
    assert_eq!(remainder.rect, Rect::from_corners(Cell::new(0, 0), Cell::new(9, 6)));
}

#[test]
fn un_occupy_returns_none_for_an_l_shaped_remainder() {
    let whole = Tile::from_corners(Cell::new(0, 0), Cell::new(9, 9), 0);
    let middle_strip = Tile::from_corners(Cell::new(0, 3), Cell::new(9, 5), 1);
    assert_eq!(whole.un_occupy(middle_strip, Orientation::Horizontal).unwrap(), None);
}

#[test]
fn un_occupy_with_no_overlap_is_unchanged() {
    let whole = Tile::from_corners(Cell::new(0, 0), Cell::new(9, 9), 0);
    let elsewhere = Tile::from_corners(Cell::new(20, 20), Cell::new(25, 25), 1);
    assert_eq!(
        whole.un_occupy(elsewhere, Orientation::Horizontal).unwrap().unwrap().rect,
        whole.rect
    );
}

#[test]
fn un_occupy_vertical_prefers_cuts_along_x() {
    let whole = Tile::from_corners(Cell::new(0, 0), Cell::new(9, 9), 0);
    let strip = Tile::from_corners(Cell::new(0, 0), Cell::new(2, 9), 1);
    let remainder = whole.un_occupy(strip, Orientation::Vertical).unwrap().unwrap();
    assert_eq!(remainder.rect, Rect::from_corners(Cell::new(3, 0), Cell::new(9, 9)));
}
