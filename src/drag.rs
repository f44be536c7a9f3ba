//! The interactive border-drag state machine: a cache built once per
//! mouse-down, then queried cheaply per mouse-move. No prior-art file in the
//! reference pack covers this directly; the shape below follows the prose
//! description of build/drag faithfully rather than porting a literal port.

use crate::border::SharedBorders;
use crate::cell::Cell;
use crate::grid::Grid;
use crate::line::Orientation;
use crate::rect::Rect;
use crate::tile::Tile;
#[cfg(test)]
use crate::border::BorderMode;

/// A precomputed snapshot answering many `drag(to)` queries at a stable
/// frame rate without re-walking the grid on every mouse-move.
#[derive(Debug, Clone)]
pub struct BorderDragCache {
    cursor: Cell,
    borders: SharedBorders,
    grid: Grid,
    cross_cell: Option<Cell>,
    max_delta_left: i64,
    max_delta_right: i64,
    max_delta_top: i64,
    max_delta_bottom: i64,
    snap_points_x: Vec<i64>,
    snap_points_y: Vec<i64>,
}

fn min_span(set: &std::collections::HashSet<Tile>, orientation: Orientation) -> i64 {
    set.iter()
        .map(|t| match orientation {
            Orientation::Vertical => t.rect.span().x,
            Orientation::Horizontal => t.rect.span().y,
        })
        .min()
        .unwrap_or(1)
}

/// Tiles just outside `border_box` on its top edge, each contributing the
/// x-coordinate where it would leave a visually aligned edge.
fn potential_top_snap_points(grid: &Grid, border_box: Rect) -> Vec<i64> {
    let y = border_box.c0.y - 1;
    let detector = Rect::from_corners(Cell::new(border_box.c0.x, y), Cell::new(border_box.c3.x, y));
    grid.tiles()
        .iter()
        .filter(|t| t.c3().y == y)
        .filter_map(|t| crate::tile::rect_intersection(detector, t.rect))
        .map(|inter| inter.c0.x)
        .collect()
}

fn x_snap_points(grid: &Grid, border_box: Rect) -> Vec<i64> {
    let mut points = potential_top_snap_points(grid, border_box);
    let mirrored_grid = grid.mirror_vertically();
    let mirrored_box = border_box.mirror_vertically();
    points.extend(potential_top_snap_points(&mirrored_grid, mirrored_box));
    points
}

fn y_snap_points(grid: &Grid, border_box: Rect) -> Vec<i64> {
    let rotated_grid = grid.rotate_counterclockwise();
    let rotated_box = border_box.rotate_counterclockwise();
    let mut points = potential_top_snap_points(&rotated_grid, rotated_box);
    let mirrored_grid = rotated_grid.mirror_vertically();
    let mirrored_box = rotated_box.mirror_vertically();
    points.extend(potential_top_snap_points(&mirrored_grid, mirrored_box));
    points
}

fn nearest_within(value: i64, points: &[i64], proximity: i64) -> Option<i64> {
    points
        .iter()
        .copied()
        .map(|p| (p, (p - value).abs()))
        .filter(|&(_, d)| d <= proximity)
        .min_by_key(|&(p, d)| (d, p.abs()))
        .map(|(p, _)| p)
}

impl BorderDragCache {
    pub fn build(borders: SharedBorders, grid: Grid, cursor: Cell) -> Self {
        let max_delta_left = min_span(&borders.left, Orientation::Vertical) - 1;
        let max_delta_right = min_span(&borders.right, Orientation::Vertical) - 1;
        let max_delta_top = min_span(&borders.top, Orientation::Horizontal) - 1;
        let max_delta_bottom = min_span(&borders.bottom, Orientation::Horizontal) - 1;

        let cross_cell = borders.get_cross_cell(false);

        let (snap_points_x, snap_points_y) = match (cross_cell, borders.border_box()) {
            (Some(cross), Some(border_box)) => {
                let xs = x_snap_points(&grid, border_box)
                    .into_iter()
                    .filter(|&x| (-max_delta_left..=max_delta_right).contains(&(x - cross.x)))
                    .collect();
                let ys = y_snap_points(&grid, border_box)
                    .into_iter()
                    .filter(|&y| (-max_delta_top..=max_delta_bottom).contains(&(y - cross.y)))
                    .collect();
                (xs, ys)
            }
            _ => (Vec::new(), Vec::new()),
        };

        BorderDragCache {
            cursor,
            borders,
            grid,
            cross_cell,
            max_delta_left,
            max_delta_right,
            max_delta_top,
            max_delta_bottom,
            snap_points_x,
            snap_points_y,
        }
    }

    pub fn cross_cell(&self) -> Option<Cell> {
        self.cross_cell
    }

    /// Drag to an absolute cursor position.
    pub fn drag(&self, to: Cell, snap_proximity: i64) -> (Grid, SharedBorders) {
        self.drag_delta(to - self.cursor, snap_proximity)
    }

    /// Drag by a relative offset from the cursor the cache was built at.
    pub fn drag_delta(&self, delta: Cell, snap_proximity: i64) -> (Grid, SharedBorders) {
        let clamped_x = delta.x.clamp(-self.max_delta_left, self.max_delta_right);
        let clamped_y = delta.y.clamp(-self.max_delta_top, self.max_delta_bottom);

        let mut dx = clamped_x;
        let mut dy = clamped_y;

        if let Some(cross) = self.cross_cell {
            let new_x = cross.x + clamped_x;
            if let Some(snapped) = nearest_within(new_x, &self.snap_points_x, snap_proximity) {
                dx += snapped - new_x;
            }
            let new_y = cross.y + clamped_y;
            if let Some(snapped) = nearest_within(new_y, &self.snap_points_y, snap_proximity) {
                dy += snapped - new_y;
            }
        }

        let x_shifted = self
            .borders
            .left
            .iter()
            .map(|t| t.with_rect(Rect::from_corners(t.c0(), t.c3() + Cell::new(dx, 0))))
            .chain(
                self.borders
                    .right
                    .iter()
                    .map(|t| t.with_rect(Rect::from_corners(t.c0() + Cell::new(dx, 0), t.c3()))),
            );
        let grid_after_x = self.grid.replace_tiles(x_shifted);
        let borders_after_x = self.borders.pull_coords(&grid_after_x);

        let y_shifted = borders_after_x
            .top
            .iter()
            .map(|t| t.with_rect(Rect::from_corners(t.c0(), t.c3() + Cell::new(0, dy))))
            .chain(
                borders_after_x
                    .bottom
                    .iter()
                    .map(|t| t.with_rect(Rect::from_corners(t.c0() + Cell::new(0, dy), t.c3()))),
            );
        let grid_after_y = grid_after_x.replace_tiles(y_shifted);
        let borders_final = borders_after_x.pull_coords(&grid_after_y);

        (grid_after_y, borders_final)
    }
}

#[cfg(test)]
fn tile(c0: (i64, i64), c3: (i64, i64), handle: u64) -> Tile {
    Tile::from_corners(Cell::new(c0.0, c0.1), Cell::new(c3.0, c3.1), handle)
}

#[cfg(test)]
fn side_by_side() -> Grid {
    Grid::new([tile((0, 0), (5, 10), 0), tile((6, 0), (10, 10), 1)])
}

#[test]
fn drag_delta_zero_is_the_identity() {
    let grid = side_by_side();
    let borders = grid
        .get_shared_borders_near(Cell::new(6, 5), 1, BorderMode::Shortest, false)
        .unwrap();
    let cache = BorderDragCache::build(borders.clone(), grid.clone(), Cell::new(6, 5));
    let (new_grid, new_borders) = cache.drag_delta(Cell::new(0, 0), 1);
    assert_eq!(new_grid, grid);
    assert_eq!(new_borders, borders);
}

#[test]
fn drag_clamps_to_max_delta_left() {
    let grid = side_by_side();
    let borders = grid
        .get_shared_borders_near(Cell::new(6, 5), 1, BorderMode::Shortest, false)
        .unwrap();
    let cache = BorderDragCache::build(borders, grid, Cell::new(6, 5));
    let (new_grid, _) = cache.drag_delta(Cell::new(-1000, 0), 0);
    new_grid.assert_invariants().unwrap();
    let left = new_grid.try_get_tile_by_handle(0).unwrap();
    assert_eq!(left.rect.span().x, 1);
}

#[test]
fn drag_shifts_the_shared_border_by_delta() {
    let grid = side_by_side();
    let borders = grid
        .get_shared_borders_near(Cell::new(6, 5), 1, BorderMode::Shortest, false)
        .unwrap();
    let cache = BorderDragCache::build(borders, grid, Cell::new(6, 5));
    let (new_grid, _) = cache.drag_delta(Cell::new(-2, 0), 0);
    new_grid.assert_invariants().unwrap();
    let left = new_grid.try_get_tile_by_handle(0).unwrap();
    let right = new_grid.try_get_tile_by_handle(1).unwrap();
    assert_eq!(left.c3().x, 3);
    assert_eq!(right.c0().x, 4);
}
