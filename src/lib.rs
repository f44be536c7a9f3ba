//! A pure, deterministic geometry-and-constraints engine for a 2D
//! tiling-window layout.
//!
//! A [`Grid`] is an ordered set of non-overlapping [`Tile`]s that tightly
//! cover a bounding box on the integer plane (x grows rightward, y grows
//! downward). Every operation is a value transform: structural edits
//! (`split_tile`, `insert`, `delete_by_handle`), layout transforms
//! (`compact`, `expand`, `resize_along_x`, rotate/mirror/translate), and
//! border queries all take a `&Grid` and return a new one, never mutating in
//! place. Identity across generations is carried by an opaque host-assigned
//! [`Handle`], not by pointer or structural equality.
//!
//! ```
//! use tilegrid::{CardinalDirection, Cell, Grid, Tile};
//!
//! let grid = Grid::single(Tile::from_corners(Cell::new(0, 0), Cell::new(20, 20), 0));
//! let split = grid.split_tile(0, CardinalDirection::Right, 1).unwrap();
//! assert_eq!(split.tiles().len(), 2);
//! split.assert_invariants().unwrap();
//! ```

mod border;
mod cell;
mod compact;
mod drag;
mod error;
mod grid;
mod line;
mod rect;
mod resize;
mod tile;

pub use border::{BorderMode, SharedBorders};
pub use cell::{CardinalDirection, Cell};
pub use drag::BorderDragCache;
pub use error::{Error, Result};
pub use grid::{get_grid_section, Grid, GridSection, InvariantErrors};
pub use line::{Line, Orientation};
pub use rect::{Corners, Rect, Span, Step};
pub use resize::ResizeMode;
pub use tile::{Handle, Tile};
