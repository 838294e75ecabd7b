use log::debug;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::command::Command;
use crate::config::{
    CELL_SIZE, GRID_HEIGHT, GRID_WIDTH, INITIAL_DIRECTION, INITIAL_SNAKE_LENGTH, SPAWN_CELL,
};
use crate::snake::{Direction, Snake};
use crate::Cell;

/// How often a food cell is drawn blind before falling back to scanning the
/// free cells. The board has 400 cells, so the fallback only matters once
/// the snake covers most of it.
const FOOD_SAMPLE_TRIES: usize = 100;

/// Coarse lifecycle of a run. Collision is a state transition here, not an
/// error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    Running,
    Ended,
}

/// The game loop controller: exclusive owner of the snake, the food cell,
/// the score and the lifecycle state. It is advanced purely by [`apply`]ing
/// commands, so a timer or a keyboard is only needed by the embedding loop,
/// never by the game itself.
///
/// [`apply`]: SnakeGame::apply
pub struct SnakeGame<R = ThreadRng> {
    snake: Snake,
    food: Cell,
    pending_direction: Option<Direction>,
    score: u32,
    state: GameState,
    rng: R,
}

impl SnakeGame<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl<R: Rng> SnakeGame<R> {
    pub fn with_rng(mut rng: R) -> Self {
        let snake = spawn_snake();
        let food = sample_food(&snake, &mut rng).expect("spawn layout leaves free cells");
        SnakeGame {
            snake,
            food,
            pending_direction: None,
            score: 0,
            state: GameState::NotStarted,
            rng,
        }
    }

    /// Consumes one command. Commands that do not fit the current state are
    /// silently dropped: ticks and steering outside a running game, and
    /// start requests while one is in progress.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Tick => self.tick(),
            Command::SetDirection(direction) => {
                if self.state == GameState::Running {
                    // Single-slot buffer: the last request before a tick wins.
                    self.pending_direction = Some(direction);
                }
            }
            Command::StartOrRestart => {
                if matches!(self.state, GameState::NotStarted | GameState::Ended) {
                    self.reset();
                    self.state = GameState::Running;
                }
            }
        }
    }

    /// One simulation step: adopt the buffered direction, move the head one
    /// cell, and resolve collisions and food.
    fn tick(&mut self) {
        if self.state != GameState::Running {
            return;
        }

        if let Some(direction) = self.pending_direction.take() {
            // A reversal of the current direction dies here, inside the
            // snake's own guard.
            self.snake.set_direction(direction);
        }

        let new_head = self.snake.next_head();
        if !in_bounds(new_head) || self.snake.occupies(new_head) {
            // Terminal collision: snake, food and score stay frozen at their
            // pre-tick values.
            self.state = GameState::Ended;
            return;
        }

        self.snake.push_head(new_head);
        if new_head == self.food {
            self.score += 1;
            // The tail stays put on exactly this step, so the snake nets one
            // segment of growth.
            match sample_food(&self.snake, &mut self.rng) {
                Some(cell) => self.food = cell,
                // The snake covers the whole board; nowhere left to go.
                None => self.state = GameState::Ended,
            }
        } else {
            self.snake.pop_tail();
        }
    }

    fn reset(&mut self) {
        self.snake = spawn_snake();
        self.food = sample_food(&self.snake, &mut self.rng).expect("spawn layout leaves free cells");
        self.pending_direction = None;
        self.score = 0;
    }
}

impl<R> SnakeGame<R> {
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }
}

fn spawn_snake() -> Snake {
    Snake::new(SPAWN_CELL, INITIAL_SNAKE_LENGTH, INITIAL_DIRECTION)
}

fn in_bounds(cell: Cell) -> bool {
    (0..GRID_WIDTH).contains(&cell.0) && (0..GRID_HEIGHT).contains(&cell.1)
}

/// Draws a food cell uniformly from the cells the snake does not occupy:
/// first by bounded rejection sampling, then by scanning the free cells when
/// the board is dense. `None` means the board is full.
fn sample_food<R: Rng>(snake: &Snake, rng: &mut R) -> Option<Cell> {
    let cols = GRID_WIDTH / CELL_SIZE;
    let rows = GRID_HEIGHT / CELL_SIZE;

    for _ in 0..FOOD_SAMPLE_TRIES {
        let cell = (
            rng.gen_range(0..cols) * CELL_SIZE,
            rng.gen_range(0..rows) * CELL_SIZE,
        );
        if !snake.occupies(cell) {
            return Some(cell);
        }
    }

    debug!("food sampling fell back to a free-cell scan");
    let free: Vec<Cell> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (col * CELL_SIZE, row * CELL_SIZE)))
        .filter(|&cell| !snake.occupies(cell))
        .collect();
    free.choose(rng).copied()
}
