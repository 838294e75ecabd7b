//! Board geometry and timing constants.

use std::time::Duration;

use crate::snake::Direction;
use crate::{Cell, Coord};

/// Width of the board, in pixels.
pub const GRID_WIDTH: Coord = 400;

/// Height of the board, in pixels.
pub const GRID_HEIGHT: Coord = 400;

/// Side of one grid cell, in pixels. The board is 20×20 cells.
pub const CELL_SIZE: Coord = 20;

/// Wall-clock interval between simulation steps while a run is active.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Number of segments a fresh snake spawns with.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Direction a fresh snake faces.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Head cell of a fresh snake: a quarter of the way in horizontally,
/// vertically centered, snapped to the cell grid. The body extends to the
/// left of it.
pub const SPAWN_CELL: Cell = (
    GRID_WIDTH / 4 / CELL_SIZE * CELL_SIZE,
    GRID_HEIGHT / 2 / CELL_SIZE * CELL_SIZE,
);
