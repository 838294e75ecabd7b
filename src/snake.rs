use std::collections::VecDeque;

use crate::config::CELL_SIZE;
use crate::{Cell, Coord};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Unit offset in cells; y grows downward.
    fn delta(self) -> (Coord, Coord) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// The snake body, head first. Segments are cell-aligned board positions and
/// never duplicate while a run is live.
#[derive(Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    /// Lays out `length` segments starting at `head` and extending opposite
    /// the facing direction.
    pub fn new(head: Cell, length: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length as Coord)
            .map(|i| (head.0 - dx * CELL_SIZE * i, head.1 - dy * CELL_SIZE * i))
            .collect();
        Snake { body, direction }
    }

    pub fn head(&self) -> Cell {
        // The body is never empty: it spawns with segments and only ever
        // shrinks by the one tail cell of a growth-free step.
        *self.body.front().unwrap()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Adopts a new facing direction unless it would reverse the current
    /// one; a reversal request is silently ignored.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction.opposite() != self.direction {
            self.direction = new_direction;
        }
    }

    /// The cell the head would occupy after one step in the facing
    /// direction. Not bounds-checked; that is the controller's call.
    pub fn next_head(&self) -> Cell {
        let (dx, dy) = self.direction.delta();
        let (x, y) = self.head();
        (x + dx * CELL_SIZE, y + dy * CELL_SIZE)
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub fn pop_tail(&mut self) {
        self.body.pop_back();
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: &[Cell], direction: Direction) -> Self {
        Snake {
            body: cells.iter().copied().collect(),
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_extends_body_behind_the_head() {
        let snake = Snake::new((100, 200), 3, Right);
        let cells: Vec<Cell> = snake.cells().collect();
        assert_eq!(cells, vec![(100, 200), (80, 200), (60, 200)]);
        assert_eq!(snake.head(), (100, 200));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn spawn_facing_up_extends_downward() {
        let snake = Snake::new((200, 200), 3, Up);
        let cells: Vec<Cell> = snake.cells().collect();
        assert_eq!(cells, vec![(200, 200), (200, 220), (200, 240)]);
    }

    #[test]
    fn next_head_steps_one_cell() {
        for (direction, expected) in [
            (Up, (100, 180)),
            (Down, (100, 220)),
            (Left, (80, 200)),
            (Right, (120, 200)),
        ] {
            let snake = Snake::from_cells(&[(100, 200)], direction);
            assert_eq!(snake.next_head(), expected);
        }
    }

    #[test]
    fn reversal_requests_are_ignored() {
        let mut snake = Snake::new((100, 200), 3, Right);
        snake.set_direction(Left);
        assert_eq!(snake.direction(), Right);

        snake.set_direction(Up);
        assert_eq!(snake.direction(), Up);
        snake.set_direction(Down);
        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn occupies_covers_every_segment() {
        let snake = Snake::new((100, 200), 3, Right);
        assert!(snake.occupies((100, 200)));
        assert!(snake.occupies((60, 200)));
        assert!(!snake.occupies((120, 200)));
    }

    #[test]
    fn push_and_pop_keep_head_first_order() {
        let mut snake = Snake::new((100, 200), 3, Right);
        snake.push_head((120, 200));
        snake.pop_tail();
        let cells: Vec<Cell> = snake.cells().collect();
        assert_eq!(cells, vec![(120, 200), (100, 200), (80, 200)]);
    }
}
