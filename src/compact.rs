//! Bounding-box compaction and expansion. Kept as a separate `impl Grid`
//! block since both operations share the "walk every row/column line" shape
//! but serve opposite ends of the normalize idiom (`compact -> expand ->
//! compact`).

use crate::cell::Cell;
use crate::grid::Grid;
use crate::line::{Line, Orientation};
use crate::rect::Rect;

impl Grid {
    /// Eliminate every empty row and column, shrinking the bounding box as
    /// far as possible. A contraction: the output box area is `<=` the
    /// input's.
    pub fn compact(&self) -> Self {
        let mut current = self.clone();
        let box_tile = self.get_box();

        let mut lines: Vec<Line> = box_tile
            .shred()
            .into_iter()
            .filter(|l| l.orientation == Orientation::Horizontal)
            .collect();
        lines.sort_by_key(|l| std::cmp::Reverse(l.coordinate));

        let mut vertical: Vec<Line> = box_tile
            .shred()
            .into_iter()
            .filter(|l| l.orientation == Orientation::Vertical)
            .collect();
        vertical.sort_by_key(|l| std::cmp::Reverse(l.coordinate));
        lines.extend(vertical);

        for line in lines {
            let delta = match line.orientation {
                Orientation::Horizontal => Cell::new(0, -1),
                Orientation::Vertical => Cell::new(-1, 0),
            };

            let mut new_tiles = Vec::with_capacity(current.tiles().len());
            let mut aborted = false;

            for tile in current.tiles() {
                let tile = *tile;
                if line.fully_contains(tile.rect) {
                    aborted = true;
                    break;
                } else if !line.intersects(tile.rect) {
                    if line.on_positive_side(tile.rect) {
                        new_tiles.push(tile);
                    } else if line.on_negative_side(tile.rect) {
                        new_tiles.push(tile.translate(delta));
                    }
                } else {
                    new_tiles.push(tile.with_rect(Rect::from_corners(tile.c0(), tile.c3() + delta)));
                }
            }

            if !aborted {
                current = Grid::new(new_tiles);
            }
        }

        current
    }

    /// Grow every tile by at most one cell per pass, in RIGHT, DOWN, LEFT, UP
    /// preference order, as long as it stays within the original bounding
    /// box and doesn't collide with another tile. Output box equals input
    /// box.
    pub fn expand(&self) -> Self {
        let tiles = self.tiles().to_vec();
        let box_tile = self.get_box();
        let mut new_tiles = tiles.clone();

        for (i, tile) in tiles.iter().enumerate() {
            let tile = *tile;
            let candidates = [
                tile.with_rect(Rect::from_corners(tile.c0(), tile.c3() + Cell::new(1, 0))),
                tile.with_rect(Rect::from_corners(tile.c0(), tile.c3() + Cell::new(0, 1))),
                tile.with_rect(Rect::from_corners(tile.c0() + Cell::new(-1, 0), tile.c3())),
                tile.with_rect(Rect::from_corners(tile.c0() + Cell::new(0, -1), tile.c3())),
            ];

            let grown = candidates.into_iter().find(|candidate| {
                box_tile.contains(*candidate)
                    && !new_tiles
                        .iter()
                        .enumerate()
                        .any(|(j, other)| j != i && other.intersects(*candidate))
            });

            if let Some(candidate) = grown {
                new_tiles[i] = candidate;
            }
        }

        Grid::new(new_tiles)
    }
}

#[cfg(test)]
use crate::tile::Tile;

#[cfg(test)]
fn tile(c0: (i64, i64), c3: (i64, i64), handle: u64) -> Tile {
    Tile::from_corners(Cell::new(c0.0, c0.1), Cell::new(c3.0, c3.1), handle)
}

#[test]
fn compact_is_a_contraction() {
    let grid = Grid::new([
        tile((0, 0), (5, 5), 0),
        tile((6, 0), (10, 5), 1),
        tile((0, 6), (10, 20), 2),
    ]);
    let before = grid.get_box().area();
    let after = grid.compact().get_box().area();
    assert!(after <= before);
}

#[test]
fn compact_squeezes_a_single_cell_row() {
    let grid = Grid::new([
        tile((0, 0), (10, 4), 0),
        tile((0, 5), (10, 5), 1),
        tile((0, 6), (10, 10), 2),
    ]);
    let before_box = grid.get_box();
    let after = grid.compact();
    let after_box = after.get_box();
    assert_eq!(after_box.rect.span().y, before_box.rect.span().y - 1);

    let t0 = after.try_get_tile_by_handle(0).unwrap();
    let t2 = after.try_get_tile_by_handle(2).unwrap();
    assert_eq!(t0.rect.span().y, 5);
    assert_eq!(t2.rect.span().y, 4);
    after.assert_invariants().unwrap();
}

#[test]
fn expand_leaves_the_box_unchanged() {
    let grid = Grid::new([tile((0, 0), (5, 5), 0), tile((6, 0), (10, 5), 1)]);
    let before_box = grid.get_box();
    let after = grid.expand();
    assert_eq!(after.get_box().rect, before_box.rect);
    after.assert_invariants().unwrap();
}

#[test]
fn compact_then_expand_then_compact_is_stable() {
    let grid = Grid::new([
        tile((0, 0), (10, 4), 0),
        tile((0, 5), (10, 5), 1),
        tile((0, 6), (10, 10), 2),
    ]);
    let normalized = grid.compact().expand().compact();
    normalized.assert_invariants().unwrap();
}
