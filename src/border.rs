//! Shared-border discovery (shortest / longest matched edges between tile
//! groups), the plus-shaped four-tile cross refinement, and border
//! alignment.

use std::collections::HashSet;

use crate::cell::{CardinalDirection, Cell};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::rect::Rect;
use crate::tile::{Handle, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderMode {
    Shortest,
    Longest,
}

/// Four unordered tile groups keyed by handle, describing the tiles on
/// either side of a vertical and/or horizontal shared border.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedBorders {
    pub left: HashSet<Tile>,
    pub right: HashSet<Tile>,
    pub top: HashSet<Tile>,
    pub bottom: HashSet<Tile>,
}

impl SharedBorders {
    pub fn empty() -> Self {
        SharedBorders::default()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty() && self.top.is_empty() && self.bottom.is_empty()
    }

    /// Rebuild every set by looking up current geometry in `grid` by handle,
    /// so a `SharedBorders` survives the grid having since been edited.
    pub fn pull_coords(&self, grid: &Grid) -> Self {
        let pull = |set: &HashSet<Tile>| -> HashSet<Tile> {
            let handles: HashSet<Handle> = set.iter().map(|t| t.handle).collect();
            grid.tiles()
                .iter()
                .copied()
                .filter(|t| handles.contains(&t.handle))
                .collect()
        };

        SharedBorders {
            left: pull(&self.left),
            right: pull(&self.right),
            top: pull(&self.top),
            bottom: pull(&self.bottom),
        }
    }

    pub fn union(&self, other: &SharedBorders) -> Self {
        SharedBorders {
            left: self.left.union(&other.left).copied().collect(),
            right: self.right.union(&other.right).copied().collect(),
            top: self.top.union(&other.top).copied().collect(),
            bottom: self.bottom.union(&other.bottom).copied().collect(),
        }
    }

    /// The border line as two degenerate tiles: `(vertical, horizontal)`,
    /// each built from the near-edge corners of the matching side. Used only
    /// internally by the plus-shape refinement.
    fn as_tiles(&self) -> (Option<Rect>, Option<Rect>) {
        let vertical = rect_from_cells(
            self.right
                .iter()
                .flat_map(|t| [t.corner_cells()[0], t.corner_cells()[2]]),
        );
        let horizontal = rect_from_cells(
            self.bottom
                .iter()
                .flat_map(|t| [t.corner_cells()[0], t.corner_cells()[1]]),
        );
        (vertical, horizontal)
    }

    pub(crate) fn rotate_clockwise(&self) -> Self {
        SharedBorders {
            left: self.bottom.iter().map(|t| t.rotate_clockwise()).collect(),
            right: self.top.iter().map(|t| t.rotate_clockwise()).collect(),
            top: self.left.iter().map(|t| t.rotate_clockwise()).collect(),
            bottom: self.right.iter().map(|t| t.rotate_clockwise()).collect(),
        }
    }

    pub(crate) fn rotate_counterclockwise(&self) -> Self {
        SharedBorders {
            left: self.top.iter().map(|t| t.rotate_counterclockwise()).collect(),
            right: self.bottom.iter().map(|t| t.rotate_counterclockwise()).collect(),
            top: self.right.iter().map(|t| t.rotate_counterclockwise()).collect(),
            bottom: self.left.iter().map(|t| t.rotate_counterclockwise()).collect(),
        }
    }

    pub(crate) fn rotate(&self, from: CardinalDirection, to: CardinalDirection) -> Result<Self> {
        Ok(match from.steps_to(to) {
            0 => self.clone(),
            1 => self.rotate_clockwise(),
            2 => self.rotate_clockwise().rotate_clockwise(),
            3 => self.rotate_counterclockwise(),
            _ => return Err(Error::Unreachable("steps_to always returns 0..4".to_string())),
        })
    }

    /// The unique cell shared by the vertical and horizontal center tiles of
    /// a 4-way border, or the defining corner of a 2-way border when
    /// `strict` is false. `None` when no border exists, or when only one
    /// axis is present and `strict` is true.
    pub fn get_cross_cell(&self, strict: bool) -> Option<Cell> {
        let (vertical, horizontal) = self.as_tiles();
        match (vertical, horizontal) {
            (Some(v), Some(h)) => Some(Cell::new(v.c0.x, h.c0.y)),
            (Some(v), None) if !strict => Some(v.c0),
            (None, Some(h)) if !strict => Some(h.c0),
            _ => None,
        }
    }

    /// The smallest rectangle enclosing every tile named by this border, or
    /// `None` when the border is empty.
    pub fn border_box(&self) -> Option<Rect> {
        let mut tiles = self.left.iter().chain(&self.right).chain(&self.top).chain(&self.bottom);
        let first = tiles.next()?.rect;
        Some(tiles.fold(first, |acc, t| Rect::min_max(acc, t.rect)))
    }
}

fn rect_from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Rect> {
    let mut iter = cells.into_iter();
    let first = iter.next()?;
    let rect = iter.fold(Rect::from_corners(first, first), |acc, c| {
        Rect::min_max(acc, Rect::from_corners(c, c))
    });
    Some(rect)
}

fn closest(to: i64, out_of: [i64; 2], proximity: i64) -> Option<i64> {
    out_of
        .into_iter()
        .map(|n| (n, (n - to).abs()))
        .min_by_key(|&(_, d)| d)
        .filter(|&(_, d)| d <= proximity)
        .map(|(n, _)| n)
}

impl Grid {
    pub fn get_left_border(&self, handle: Handle, mode: BorderMode) -> Result<SharedBorders> {
        match mode {
            BorderMode::Shortest => self.get_shortest_left_border(handle),
            BorderMode::Longest => self.get_longest_left_border(handle),
        }
    }

    /// The minimal matched-edge partition anchored at `handle`'s own left
    /// edge: `right` is the group that includes `handle` itself, `left` is
    /// the group immediately beyond its left edge.
    pub fn get_shortest_left_border(&self, handle: Handle) -> Result<SharedBorders> {
        let t = self.get_tile_by_handle(handle)?;
        let boundary = t.c0().x;

        let mut pool_own: Vec<Tile> = self
            .tiles()
            .iter()
            .copied()
            .filter(|c| c.c0().x == boundary)
            .collect();
        let mut pool_outside: Vec<Tile> = self
            .tiles()
            .iter()
            .copied()
            .filter(|c| c.c3().x == boundary - 1)
            .collect();

        if pool_outside.is_empty() {
            return Ok(SharedBorders {
                left: HashSet::new(),
                right: pool_own.drain(..).collect(),
                top: HashSet::new(),
                bottom: HashSet::new(),
            });
        }

        let mut y_min = t.c0().y;
        let mut y_max = t.c3().y;
        let mut swapped = false;
        let mut accum_own: HashSet<Tile> = [t].into_iter().collect();
        let mut accum_outside: HashSet<Tile> = HashSet::new();

        loop {
            let detector = Rect::from_corners(Cell::new(boundary - 1, y_min), Cell::new(boundary, y_max));
            for cand in &pool_outside {
                if crate::tile::rect_intersection(detector, cand.rect).is_some() {
                    accum_outside.insert(*cand);
                }
            }

            let new_y_min = accum_outside.iter().map(|c| c.c0().y).min().expect(
                "accum_outside cannot be empty: pool_outside was non-empty and the detector always covers handle's own y-range on the first pass",
            );
            let new_y_max = accum_outside.iter().map(|c| c.c3().y).max().unwrap();

            if (new_y_min, new_y_max) == (y_min, y_max) {
                break;
            }
            y_min = new_y_min;
            y_max = new_y_max;

            std::mem::swap(&mut accum_own, &mut accum_outside);
            std::mem::swap(&mut pool_own, &mut pool_outside);
            swapped = !swapped;
        }

        if swapped {
            std::mem::swap(&mut accum_own, &mut accum_outside);
        }

        Ok(SharedBorders {
            left: accum_outside,
            right: accum_own,
            top: HashSet::new(),
            bottom: HashSet::new(),
        })
    }

    /// Extend the shortest left border by repeatedly absorbing tiles
    /// directly above the topmost, or below the bottommost, tile of the
    /// anchor's own-side group.
    pub fn get_longest_left_border(&self, handle: Handle) -> Result<SharedBorders> {
        let mut borders = self.get_shortest_left_border(handle)?;

        loop {
            let a = *borders
                .right
                .iter()
                .min_by_key(|t| t.c0().y)
                .expect("get_shortest_left_border always returns a non-empty right set");
            let b = *borders
                .right
                .iter()
                .max_by_key(|t| t.c3().y)
                .expect("get_shortest_left_border always returns a non-empty right set");

            let mut extended = false;
            for tile in self.tiles().to_vec() {
                let cc = tile.corner_cells();
                let a_cc = a.corner_cells();
                let b_cc = b.corner_cells();

                if cc[2] == a_cc[0] - Cell::new(0, 1) || cc[0] == b_cc[2] + Cell::new(0, 1) {
                    extended = true;
                    let extra = self.get_shortest_left_border(tile.handle)?;
                    borders = SharedBorders {
                        left: borders.left.union(&extra.left).copied().collect(),
                        right: borders.right.union(&extra.right).copied().collect(),
                        top: HashSet::new(),
                        bottom: HashSet::new(),
                    };
                }
            }

            if !extended {
                break;
            }
        }

        Ok(borders)
    }

    fn left_border_axis_pass(
        &self,
        cell: Cell,
        tile: Tile,
        proximity: i64,
        mode: BorderMode,
    ) -> Result<SharedBorders> {
        let cc = tile.corner_cells();
        let out_of = [cc[0].x, cc[1].x + 1];

        let closest_edge = match closest(cell.x, out_of, proximity) {
            Some(edge) => edge,
            None => return Ok(SharedBorders::empty()),
        };

        if cell.x < closest_edge {
            // closest_edge == cc[1].x + 1: the cursor is nearer the right
            // edge, so hop to the tile on the other side of it and ask for
            // its left border (the same shared edge, from the other side).
            match self.try_get_tile_by_cell(Cell::new(cc[1].x + 1, cell.y)) {
                Some(new_tile) => self.get_left_border(new_tile.handle, mode),
                None => Ok(SharedBorders::empty()),
            }
        } else {
            // closest_edge == cc[0].x: the cursor is nearer this tile's own
            // left edge.
            self.get_left_border(tile.handle, mode)
        }
    }

    pub fn get_shared_borders_near(
        &self,
        cell: Cell,
        proximity: i64,
        mode: BorderMode,
        ignore_plus: bool,
    ) -> Result<SharedBorders> {
        let tile = match self.try_get_tile_by_cell(cell) {
            Some(t) => t,
            None => return Ok(SharedBorders::empty()),
        };

        let vertical_borders = self.left_border_axis_pass(cell, tile, proximity, mode)?;

        let rotated_grid = self.rotate_counterclockwise();
        let rotated_cell = cell.rotate_counterclockwise();
        let rotated_tile = tile.rotate_counterclockwise();
        let horizontal_borders =
            rotated_grid.left_border_axis_pass(rotated_cell, rotated_tile, proximity, mode)?;

        let combined = SharedBorders {
            left: vertical_borders.left,
            right: vertical_borders.right,
            top: horizontal_borders.left,
            bottom: horizontal_borders.right,
        }
        .pull_coords(self);

        if ignore_plus || mode == BorderMode::Longest {
            return Ok(combined);
        }

        let (vertical, horizontal) = combined.as_tiles();
        let (vertical, horizontal) = match (vertical, horizontal) {
            (Some(v), Some(h)) => (v, h),
            _ => return Ok(combined),
        };

        let vertical = Rect::from_corners(vertical.c0, vertical.c3 + Cell::new(0, 1));
        let horizontal = Rect::from_corners(horizontal.c0, horizontal.c3 + Cell::new(1, 0));

        let v1 = vertical.c0;
        let v2 = Cell::new(vertical.c0.x, vertical.c3.y);
        let h1 = horizontal.c0;
        let h2 = Cell::new(horizontal.c3.x, horizontal.c0.y);

        if !(v1 == h1 || v1 == h2 || v2 == h1 || v2 == h2) {
            return Ok(combined);
        }

        let delta = Cell::new(
            if h1 == v1 || h1 == v2 { -1 } else { 1 },
            if v1 == h1 || v1 == h2 { -1 } else { 1 },
        );

        let intersection = crate::tile::Tile::new(vertical, 0)
            .intersection(crate::tile::Tile::new(horizontal, 0))
            .expect("vertical and horizontal borders share a corner, so they must intersect");

        let new_base_cell = intersection.c0 + delta;

        let recursed = self.get_shared_borders_near(new_base_cell, proximity, BorderMode::Shortest, true)?;
        Ok(recursed.union(&combined))
    }

    pub fn align_below_tile_left_border_to_left(&self, handle: Handle, proximity: i64) -> Result<Self> {
        let t = self.get_tile_by_handle(handle)?;

        let mut min_x: Option<i64> = None;
        let mut found: Option<Tile> = None;
        for t2 in self.tiles() {
            if t2.c0().y == t.c3().y + 1
                && t.c0().x <= t2.c0().x
                && t2.c0().x <= t.c3().x
                && (t2.c0().x - t.c0().x) <= proximity
                && min_x.map_or(true, |m| t2.c0().x < m)
            {
                min_x = Some(t2.c0().x);
                found = Some(*t2);
            }
        }

        let t2 = match found {
            Some(t2) => t2,
            None => return Ok(self.clone()),
        };

        let delta_x = t.c0().x - t2.c0().x;
        let borders = self.get_longest_left_border(t2.handle)?;

        let replacements = borders
            .left
            .iter()
            .map(|tile| tile.with_rect(Rect::from_corners(tile.c0(), tile.c3() + Cell::new(delta_x, 0))))
            .chain(borders.right.iter().map(|tile| {
                tile.with_rect(Rect::from_corners(tile.c0() + Cell::new(delta_x, 0), tile.c3()))
            }));

        Ok(self.replace_tiles(replacements))
    }

    fn align_left_borders_to_left(&self, proximity: i64) -> Result<Self> {
        let mut curr = self.clone();
        for tile in self.tiles() {
            curr = curr.align_below_tile_left_border_to_left(tile.handle, proximity)?;
        }
        Ok(curr)
    }

    /// Nudge every near-aligned tile edge into exact alignment, visiting
    /// each of the four border orientations via the mirror/rotate framings
    /// that reduce them all to the left-border primitive.
    pub fn align_borders(&self, proximity: i64) -> Result<Self> {
        let g = self.align_left_borders_to_left(proximity)?;
        let g = g.mirror_horizontally();
        let g = g.align_left_borders_to_left(proximity)?;
        let g = g.mirror_vertically();
        let g = g.align_left_borders_to_left(proximity)?;
        let g = g.mirror_horizontally();
        let g = g.align_left_borders_to_left(proximity)?;
        let g = g.mirror_vertically();
        let g = g.rotate_clockwise();
        let g = g.align_left_borders_to_left(proximity)?;
        let g = g.mirror_horizontally();
        let g = g.align_left_borders_to_left(proximity)?;
        let g = g.mirror_vertically();
        let g = g.align_left_borders_to_left(proximity)?;
        let g = g.mirror_horizontally();
        let g = g.align_left_borders_to_left(proximity)?;
        let g = g.mirror_vertically();
        let g = g.rotate_counterclockwise();
        Ok(g)
    }
}

#[cfg(test)]
fn tile(c0: (i64, i64), c3: (i64, i64), handle: Handle) -> Tile {
    Tile::from_corners(Cell::new(c0.0, c0.1), Cell::new(c3.0, c3.1), handle)
}

#[cfg(test)]
fn s4_grid() -> Grid {
    Grid::new([
        tile((0, 0), (5, 5), 3),
        tile((0, 6), (5, 10), 4),
        tile((6, 0), (10, 5), 1),
        tile((6, 6), (10, 10), 2),
    ])
}

#[test]
fn shortest_left_border_matches_two_on_two_scenario() {
    let grid = s4_grid();
    let borders = grid.get_shortest_left_border(1).unwrap();
    let left_handles: HashSet<Handle> = borders.left.iter().map(|t| t.handle).collect();
    let right_handles: HashSet<Handle> = borders.right.iter().map(|t| t.handle).collect();
    assert_eq!(left_handles, [3].into_iter().collect());
    assert_eq!(right_handles, [1].into_iter().collect());
}

#[test]
fn longest_left_border_matches_two_on_two_scenario() {
    let grid = s4_grid();
    let borders = grid.get_longest_left_border(1).unwrap();
    let left_handles: HashSet<Handle> = borders.left.iter().map(|t| t.handle).collect();
    let right_handles: HashSet<Handle> = borders.right.iter().map(|t| t.handle).collect();
    assert_eq!(left_handles, [3, 4].into_iter().collect());
    assert_eq!(right_handles, [1, 2].into_iter().collect());
}

#[test]
fn align_below_tile_left_border_to_left_matches_scenario() {
    let grid = Grid::new([
        tile((6, 0), (10, 5), 1),
        tile((7, 6), (10, 10), 2),
        tile((0, 0), (5, 5), 3),
        tile((0, 6), (6, 10), 4),
    ]);
    let result = grid.align_below_tile_left_border_to_left(1, 1).unwrap();
    assert_eq!(result.try_get_tile_by_handle(2).unwrap().c0(), Cell::new(6, 6));
    // T4 is the matched-edge neighbor immediately left of T2; its right
    // edge must shift by the same delta or the two tiles would overlap
    // once T2 moves.
    assert_eq!(result.try_get_tile_by_handle(4).unwrap().c3(), Cell::new(5, 10));
    result.assert_invariants().unwrap();
}

#[test]
fn align_below_tile_left_border_to_left_is_a_no_op_without_a_candidate() {
    let grid = Grid::new([tile((0, 0), (5, 5), 0), tile((0, 20), (5, 25), 1)]);
    let result = grid.align_below_tile_left_border_to_left(0, 1).unwrap();
    assert_eq!(result, grid);
}

#[test]
fn get_shared_borders_near_returns_empty_off_grid() {
    let grid = s4_grid();
    let borders = grid
        .get_shared_borders_near(Cell::new(1000, 1000), 1, BorderMode::Shortest, false)
        .unwrap();
    assert!(borders.is_empty());
}

#[test]
fn get_shared_borders_near_finds_the_vertical_border_between_two_tiles() {
    let grid = s4_grid();
    let borders = grid
        .get_shared_borders_near(Cell::new(6, 1), 1, BorderMode::Shortest, false)
        .unwrap();
    assert!(!borders.is_empty());
}

#[test]
fn get_cross_cell_is_the_corner_shared_by_a_four_tile_cross() {
    let borders = SharedBorders {
        left: [tile((0, 6), (5, 10), 4)].into_iter().collect(),
        right: [tile((6, 6), (10, 10), 2)].into_iter().collect(),
        top: [tile((6, 0), (10, 5), 1)].into_iter().collect(),
        bottom: [tile((6, 6), (10, 10), 2)].into_iter().collect(),
    };
    assert_eq!(borders.get_cross_cell(false), Some(Cell::new(6, 6)));
}

#[test]
fn get_cross_cell_falls_back_to_the_defining_corner_for_a_two_way_border() {
    let borders = SharedBorders {
        left: [tile((0, 6), (5, 10), 4)].into_iter().collect(),
        right: [tile((6, 6), (10, 10), 2)].into_iter().collect(),
        top: HashSet::new(),
        bottom: HashSet::new(),
    };
    assert_eq!(borders.get_cross_cell(false), Some(Cell::new(6, 6)));
    assert_eq!(borders.get_cross_cell(true), None);
}

#[test]
fn get_cross_cell_is_none_for_an_empty_border() {
    assert_eq!(SharedBorders::empty().get_cross_cell(false), None);
    assert_eq!(SharedBorders::empty().get_cross_cell(true), None);
}

#[test]
fn pull_coords_is_idempotent() {
    let grid = s4_grid();
    let borders = grid.get_shortest_left_border(1).unwrap();
    let once = borders.pull_coords(&grid);
    let twice = once.pull_coords(&grid);
    assert_eq!(once, twice);
}
