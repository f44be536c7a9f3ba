//! Constraint-solved horizontal resizing. Grounded on the same Cassowary
//! linear-constraint approach a terminal multiplexer's pane resizer uses for
//! an equivalent problem shape: per-pane position/size variables, required
//! row-contiguity equations, and a preference constraint steering the
//! solver toward a minimum-deviation solution.

use std::collections::HashMap;

use cassowary::strength::{REQUIRED, STRONG};
use cassowary::WeightedRelation::*;
use cassowary::{Expression, Solver, Variable};

use crate::cell::{CardinalDirection, Cell};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::line::Line;
use crate::rect::Rect;
use crate::tile::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeMode {
    Scale,
    Balance,
}

impl Grid {
    /// Redistribute tile widths so every horizontal row sums to `new_width`.
    /// The y-extents are unchanged. Calls `assert_invariants` on entry, per
    /// the contract.
    pub fn resize_along_x(&self, new_width: i64, mode: ResizeMode) -> Result<Self> {
        self.assert_invariants()?;

        if new_width < 1 {
            return Err(Error::Unsupported(format!(
                "resize_along_x: new_width must be >= 1, got {new_width}"
            )));
        }

        let box_tile = self.get_box();
        let old_box_width = box_tile.rect.span().x;

        let mut seen_groups: Vec<Vec<Handle>> = Vec::new();
        let mut row_groups: Vec<Vec<Handle>> = Vec::new();
        for y in row_group_anchors(self) {
            let line = Line::horizontal(y);
            let mut group: Vec<Handle> = self
                .tiles()
                .iter()
                .filter(|t| line.intersects(t.rect))
                .map(|t| t.handle)
                .collect();
            group.sort_by_key(|h| self.get_tile_by_handle(*h).unwrap().c0().x);
            if !seen_groups.contains(&group) {
                seen_groups.push(group.clone());
                row_groups.push(group);
            }
        }

        let max_row_tiles = row_groups.iter().map(|g| g.len() as i64).max().unwrap_or(1);

        let mut vars: HashMap<Handle, (Variable, Variable)> = HashMap::new();
        for t in self.tiles() {
            vars.entry(t.handle).or_insert_with(|| (Variable::new(), Variable::new()));
        }

        let mut solver = Solver::new();
        let mut constraints = Vec::new();

        for t in self.tiles() {
            let (_, span_var) = vars[&t.handle];
            constraints.push(span_var | GE(REQUIRED) | 1.0);
            constraints.push(span_var | LE(REQUIRED) | new_width as f64);

            let min_width = match mode {
                ResizeMode::Scale => {
                    let old_span = t.rect.span().x;
                    (old_span * new_width / old_box_width.max(1)).max(1) as f64
                }
                ResizeMode::Balance => (new_width / max_row_tiles.max(1)).max(1) as f64,
            };
            constraints.push(span_var | GE(REQUIRED) | min_width);
            constraints.push(span_var | EQ(STRONG) | min_width);
        }

        for group in &row_groups {
            let first_pos = vars[&group[0]].0;
            constraints.push(first_pos | EQ(REQUIRED) | 0.0);

            let mut sum: Expression = vars[&group[0]].1.into();
            for handle in &group[1..] {
                sum = sum + vars[handle].1;
            }
            constraints.push(sum | EQ(REQUIRED) | new_width as f64);

            for pair in group.windows(2) {
                let (pos_l, span_l) = vars[&pair[0]];
                let pos_r = vars[&pair[1]].0;
                constraints.push((pos_l + span_l) | EQ(REQUIRED) | pos_r);
            }
        }

        solver.add_constraints(&constraints).map_err(|_| {
            Error::Unsupported(
                "resize_along_x: constraint system infeasible for this geometry".to_string(),
            )
        })?;

        let new_tiles = self.tiles().iter().map(|t| {
            let (pos_var, span_var) = vars[&t.handle];
            let cell_x = solver.get_value(pos_var).round() as i64;
            let span_x = solver.get_value(span_var).round().max(1.0) as i64;
            let c0 = Cell::new(cell_x, t.c0().y);
            let c3 = Cell::new(cell_x + span_x - 1, t.c3().y);
            t.with_rect(Rect::from_corners(c0, c3))
        });

        Ok(Grid::new(new_tiles))
    }

    /// Resize along both axes: `new_boundary.x` is the target row width,
    /// `new_boundary.y` the target column height.
    pub fn resize(&self, new_boundary: Cell, mode: ResizeMode) -> Result<Self> {
        let resized_x = self.resize_along_x(new_boundary.x, mode)?;
        let rotated = resized_x.rotate(CardinalDirection::Up, CardinalDirection::Right)?;
        let resized_y = rotated.resize_along_x(new_boundary.y, mode)?;
        resized_y.rotate(CardinalDirection::Right, CardinalDirection::Up)
    }
}

fn row_group_anchors(grid: &Grid) -> Vec<i64> {
    let mut ys: Vec<i64> = grid
        .tiles()
        .iter()
        .flat_map(|t| [t.c0().y, t.c3().y])
        .collect();
    ys.sort_unstable();
    ys.dedup();
    ys
}

#[cfg(test)]
use crate::tile::Tile;

#[cfg(test)]
fn tile(c0: (i64, i64), c3: (i64, i64), handle: Handle) -> Tile {
    Tile::from_corners(Cell::new(c0.0, c0.1), Cell::new(c3.0, c3.1), handle)
}

#[test]
fn resize_along_x_keeps_every_row_at_the_new_width() {
    let grid = Grid::new([tile((0, 0), (5, 5), 0), tile((6, 0), (10, 5), 1)]);
    let resized = grid.resize_along_x(20, ResizeMode::Scale).unwrap();
    resized.assert_invariants().unwrap();
    let a = resized.try_get_tile_by_handle(0).unwrap();
    let b = resized.try_get_tile_by_handle(1).unwrap();
    assert_eq!(a.rect.span().x + b.rect.span().x, 20);
    assert_eq!(a.c0().x, 0);
    assert_eq!(b.c0().x, a.c3().x + 1);
}

#[test]
fn resize_along_x_preserves_y_extents() {
    let grid = Grid::new([tile((0, 0), (5, 5), 0), tile((6, 0), (10, 5), 1)]);
    let resized = grid.resize_along_x(16, ResizeMode::Balance).unwrap();
    for (before, after) in grid.tiles().iter().zip(resized.tiles()) {
        assert_eq!(before.c0().y, after.c0().y);
        assert_eq!(before.c3().y, after.c3().y);
    }
}

#[test]
fn resize_along_x_rejects_nonpositive_width() {
    let grid = Grid::single(tile((0, 0), (5, 5), 0));
    assert!(matches!(
        grid.resize_along_x(0, ResizeMode::Scale),
        Err(Error::Unsupported(_))
    ));
}
