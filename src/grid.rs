//! `Grid`: an ordered collection of non-overlapping tiles tightly covering
//! their bounding box, plus the structural edits and invariant checks that
//! keep it that way.

use itertools::Itertools;

use crate::cell::{CardinalDirection, Cell};
use crate::error::{Error, Result};
use crate::line::{Line, Orientation};
use crate::tile::{Handle, Tile};

/// An ordered, non-empty collection of tiles. Index 0 is the origin: the
/// anchor for `centralize_origin`, and immune to `delete_by_handle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Tile>,
}

/// Where a cell sits relative to the grid's origin tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridSection {
    Origin,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// The structured result of `Grid::get_invariant_errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvariantErrors {
    pub duplicate_handles: Vec<Handle>,
    pub overlapping_pairs: Vec<(Tile, Tile)>,
    pub area_mismatch: i64,
}

impl InvariantErrors {
    pub fn has_errors(&self) -> bool {
        !self.duplicate_handles.is_empty()
            || !self.overlapping_pairs.is_empty()
            || self.area_mismatch != 0
    }
}

impl Grid {
    /// Build a grid from tiles. The first tile becomes the origin.
    pub fn new(tiles: impl IntoIterator<Item = Tile>) -> Self {
        let tiles: Vec<Tile> = tiles.into_iter().collect();
        assert!(!tiles.is_empty(), "a grid needs at least one tile");
        Grid { tiles }
    }

    pub fn single(tile: Tile) -> Self {
        Grid::new([tile])
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn origin(&self) -> Tile {
        self.tiles[0]
    }

    pub fn get_box(&self) -> Tile {
        let mut iter = self.tiles.iter().copied();
        let first = iter.next().expect("a grid always has at least one tile");
        let box_rect = iter.fold(first.rect, |acc, t| crate::rect::Rect::min_max(acc, t.rect));
        Tile::new(box_rect, first.handle)
    }

    pub fn try_get_tile_by_handle(&self, handle: Handle) -> Option<Tile> {
        self.tiles.iter().copied().find(|t| t.handle == handle)
    }

    pub fn get_tile_by_handle(&self, handle: Handle) -> Result<Tile> {
        self.try_get_tile_by_handle(handle)
            .ok_or(Error::NotFound(handle))
    }

    pub fn try_get_tile_by_cell(&self, cell: Cell) -> Option<Tile> {
        self.tiles.iter().copied().find(|t| t.contains_cell(cell))
    }

    /// Replace tiles in place by handle, preserving order and any tile not
    /// named in `new`.
    pub fn replace_tiles(&self, new: impl IntoIterator<Item = Tile>) -> Self {
        let by_handle: std::collections::HashMap<Handle, Tile> =
            new.into_iter().map(|t| (t.handle, t)).collect();
        Grid::new(
            self.tiles
                .iter()
                .map(|t| by_handle.get(&t.handle).copied().unwrap_or(*t)),
        )
    }

    fn duplicate_handles(&self) -> Vec<Handle> {
        let mut counts: std::collections::HashMap<Handle, usize> = std::collections::HashMap::new();
        for t in &self.tiles {
            *counts.entry(t.handle).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .filter(|&(_, count)| count != 1)
            .map(|(handle, _)| handle)
            .collect()
    }

    fn overlapping_pairs(&self) -> Vec<(Tile, Tile)> {
        self.tiles
            .iter()
            .copied()
            .tuple_combinations()
            .filter(|(a, b)| a.intersects(*b))
            .collect()
    }

    fn area_mismatch(&self) -> i64 {
        let box_area = self.get_box().area();
        let tiles_area: i64 = self.tiles.iter().map(|t| t.area()).sum();
        box_area - tiles_area
    }

    pub fn get_invariant_errors(&self) -> InvariantErrors {
        InvariantErrors {
            duplicate_handles: self.duplicate_handles(),
            overlapping_pairs: self.overlapping_pairs(),
            area_mismatch: self.area_mismatch(),
        }
    }

    pub fn assert_invariants(&self) -> Result<()> {
        let errors = self.get_invariant_errors();
        if errors.has_errors() {
            Err(Error::InvariantViolation(errors))
        } else {
            Ok(())
        }
    }

    pub fn rotate_clockwise(&self) -> Self {
        Grid::new(self.tiles.iter().map(|t| t.rotate_clockwise()))
    }

    pub fn rotate_counterclockwise(&self) -> Self {
        Grid::new(self.tiles.iter().map(|t| t.rotate_counterclockwise()))
    }

    pub fn rotate(&self, from: CardinalDirection, to: CardinalDirection) -> Result<Self> {
        let tiles: Result<Vec<Tile>> = self.tiles.iter().map(|t| t.rotate(from, to)).collect();
        Ok(Grid::new(tiles?))
    }

    pub fn mirror_horizontally(&self) -> Self {
        Grid::new(self.tiles.iter().map(|t| t.mirror_horizontally()))
    }

    pub fn mirror_vertically(&self) -> Self {
        Grid::new(self.tiles.iter().map(|t| t.mirror_vertically()))
    }

    pub fn mirror(&self, orientation: Orientation) -> Self {
        Grid::new(self.tiles.iter().map(|t| t.mirror(orientation)))
    }

    pub fn translate(&self, delta: Cell) -> Self {
        Grid::new(self.tiles.iter().map(|t| t.translate(delta)))
    }

    pub fn centralize_origin(&self) -> Self {
        let delta = Cell::ZERO - self.origin().c0();
        self.translate(delta)
    }

    /// Removes the tile with `handle`. The origin tile is immune: calling
    /// this with the origin's handle is a no-op.
    pub fn delete_by_handle(&self, handle: Handle) -> Self {
        if self.origin().handle == handle {
            return self.clone();
        }
        Grid::new(self.tiles.iter().copied().filter(|t| t.handle != handle))
    }

    /// `insert_to_right` generalised to any direction via rotate-to-canonical.
    pub fn insert(
        &self,
        anchor_handle: Handle,
        direction: CardinalDirection,
        new_tile_handle: Handle,
    ) -> Result<Self> {
        self.rotate(direction, CardinalDirection::Right)?
            .insert_to_right(anchor_handle, new_tile_handle)
            .rotate(CardinalDirection::Right, direction)
    }

    pub fn insert_to_right(&self, anchor_handle: Handle, new_tile_handle: Handle) -> Self {
        let anchor = match self.try_get_tile_by_handle(anchor_handle) {
            Some(a) => a,
            None => return self.clone(),
        };

        let line = Line::vertical(anchor.c3().x);
        let mut new_tiles: Vec<Tile> = Vec::with_capacity(self.tiles.len() + 1);

        for tile in &self.tiles {
            let tile = *tile;
            if tile.handle == anchor_handle {
                new_tiles.push(tile);
            } else if !line.intersects(tile.rect) && line.on_positive_side(tile.rect) {
                new_tiles.push(tile);
            } else if line.intersects(tile.rect) {
                new_tiles.push(tile.with_rect(crate::rect::Rect::from_corners(
                    tile.c0(),
                    tile.c3() + Cell::new(1, 0),
                )));
            } else if !line.intersects(tile.rect) && line.on_negative_side(tile.rect) {
                new_tiles.push(tile.with_rect(crate::rect::Rect::from_corners(
                    tile.c0() + Cell::new(1, 0),
                    tile.c3() + Cell::new(1, 0),
                )));
            }
        }

        new_tiles.push(Tile::new(
            crate::rect::Rect::from_step(
                anchor.c3() + Cell::new(1, 0),
                Cell::new(0, -anchor.rect.step().y),
            ),
            new_tile_handle,
        ));

        Grid::new(new_tiles)
    }

    pub fn split_tile(
        &self,
        tile_handle: Handle,
        direction: CardinalDirection,
        new_tile_handle: Handle,
    ) -> Result<Self> {
        self.rotate(direction, CardinalDirection::Right)?
            .split_tile_to_right(tile_handle, new_tile_handle)
            .rotate(CardinalDirection::Right, direction)
    }

    pub fn split_tile_to_right(&self, tile_handle: Handle, new_tile_handle: Handle) -> Self {
        if self.try_get_tile_by_handle(tile_handle).is_none() {
            return self.clone();
        }

        let mut new_tiles: Vec<Tile> = Vec::with_capacity(self.tiles.len() + 1);
        for tile in &self.tiles {
            let tile = *tile;
            let width = tile.c3().x - tile.c0().x;

            if tile.handle != tile_handle || width < 2 {
                new_tiles.push(tile);
                continue;
            }

            let c3 = Cell::new(tile.c0().x + width / 2, tile.c3().y);
            let c0 = Cell::new(c3.x + 1, tile.c0().y);

            new_tiles.push(tile.with_rect(crate::rect::Rect::from_corners(tile.c0(), c3)));
            new_tiles.push(Tile::from_corners(c0, tile.c3(), new_tile_handle));
        }

        Grid::new(new_tiles)
    }
}

/// Classify `cell` by its position relative to `origin_tile`.
pub fn get_grid_section(cell: Cell, origin_tile: Tile) -> GridSection {
    if origin_tile.contains_cell(cell) {
        return GridSection::Origin;
    }

    let c0 = origin_tile.c0();
    let c3 = origin_tile.c3();

    if cell.x >= c0.x && cell.x <= c3.x && cell.y < c0.y {
        return GridSection::Top;
    }
    if cell.x >= c0.x && cell.x <= c3.x && cell.y > c3.y {
        return GridSection::Bottom;
    }
    if cell.y >= c0.y && cell.y <= c3.y && cell.x < c0.x {
        return GridSection::Left;
    }
    if cell.y >= c0.y && cell.y <= c3.y && cell.x > c3.x {
        return GridSection::Right;
    }
    if cell.x < c0.x && cell.y < c0.y {
        return GridSection::TopLeft;
    }
    if cell.x > c3.x && cell.y < c0.y {
        return GridSection::TopRight;
    }
    if cell.x < c0.x && cell.y > c3.y {
        return GridSection::BottomLeft;
    }
    GridSection::BottomRight
}

#[cfg(test)]
fn tile(c0: (i64, i64), c3: (i64, i64), handle: Handle) -> Tile {
    Tile::from_corners(Cell::new(c0.0, c0.1), Cell::new(c3.0, c3.1), handle)
}

#[test]
fn split_tile_to_right_matches_the_21x21_scenario() {
    let grid = Grid::single(tile((0, 0), (20, 20), 0));
    let result = grid.split_tile(0, CardinalDirection::Right, 1).unwrap();
    assert_eq!(result.tiles().len(), 2);
    assert_eq!(
        result.try_get_tile_by_handle(0).unwrap(),
        tile((0, 0), (10, 20), 0)
    );
    assert_eq!(
        result.try_get_tile_by_handle(1).unwrap(),
        tile((11, 0), (20, 20), 1)
    );
    result.assert_invariants().unwrap();
}

#[test]
fn split_tile_below_width_2_is_a_no_op() {
    let grid = Grid::single(tile((0, 0), (0, 20), 0));
    let result = grid.split_tile(0, CardinalDirection::Right, 1).unwrap();
    assert_eq!(result.tiles().len(), 1);
}

#[test]
fn delete_by_handle_is_a_no_op_on_the_origin() {
    let grid = Grid::new([tile((0, 0), (5, 5), 0), tile((6, 0), (10, 5), 1)]);
    let result = grid.delete_by_handle(0);
    assert_eq!(result, grid);
}

#[test]
fn delete_by_handle_removes_a_non_origin_tile() {
    let grid = Grid::new([tile((0, 0), (5, 5), 0), tile((6, 0), (10, 5), 1)]);
    let result = grid.delete_by_handle(1);
    assert_eq!(result.tiles().len(), 1);
    assert!(result.try_get_tile_by_handle(1).is_none());
}

#[test]
fn insert_widens_the_row_the_anchor_is_in() {
    let grid = Grid::new([tile((0, 0), (5, 5), 0), tile((0, 6), (5, 10), 1)]);
    let result = grid.insert(0, CardinalDirection::Right, 2).unwrap();
    result.assert_invariants().unwrap();
    let inserted = result.try_get_tile_by_handle(2).unwrap();
    assert_eq!(inserted.c0(), Cell::new(6, 0));
}

#[test]
fn centralize_origin_moves_origin_c0_to_zero() {
    let grid = Grid::new([tile((3, 4), (8, 9), 0), tile((9, 4), (12, 9), 1)]);
    let result = grid.centralize_origin();
    assert_eq!(result.origin().c0(), Cell::ZERO);
}

#[test]
fn invariant_errors_report_overlaps() {
    let grid = Grid::new([tile((0, 0), (5, 5), 0), tile((3, 3), (8, 8), 1)]);
    let errors = grid.get_invariant_errors();
    assert_eq!(errors.overlapping_pairs.len(), 1);
    assert!(errors.has_errors());
}

#[test]
fn invariant_errors_report_duplicate_handles() {
    let grid = Grid::new([tile((0, 0), (5, 5), 0), tile((6, 0), (10, 5), 0)]);
    let errors = grid.get_invariant_errors();
    assert_eq!(errors.duplicate_handles, vec![0]);
}

#[test]
fn a_tight_grid_has_no_invariant_errors() {
    let grid = Grid::new([tile((0, 0), (5, 10), 0), tile((6, 0), (10, 10), 1)]);
    assert!(grid.assert_invariants().is_ok());
}

#[test]
fn get_grid_section_classifies_all_nine_regions() {
    let origin = tile((0, 0), (10, 10), 0);
    assert_eq!(get_grid_section(Cell::new(5, 5), origin), GridSection::Origin);
    assert_eq!(get_grid_section(Cell::new(5, -1), origin), GridSection::Top);
    assert_eq!(get_grid_section(Cell::new(5, 11), origin), GridSection::Bottom);
    assert_eq!(get_grid_section(Cell::new(-1, 5), origin), GridSection::Left);
    assert_eq!(get_grid_section(Cell::new(11, 5), origin), GridSection::Right);
    assert_eq!(get_grid_section(Cell::new(-1, -1), origin), GridSection::TopLeft);
    assert_eq!(get_grid_section(Cell::new(11, -1), origin), GridSection::TopRight);
    assert_eq!(get_grid_section(Cell::new(-1, 11), origin), GridSection::BottomLeft);
    assert_eq!(get_grid_section(Cell::new(11, 11), origin), GridSection::BottomRight);
}
