//! A small terminal snake game: a fixed 400×400 px grid of 20 px cells,
//! advanced one step per 100 ms tick by a command-driven controller.
//!
//! The controller ([`game::SnakeGame`]) is pure state and consumes
//! [`command::Command`] values one at a time, so it can be driven from tests
//! without a timer or a terminal. The binary wires it to a crossterm
//! front-end ([`term::TermManager`]) through the event loop in [`app`].

pub mod app;
pub mod command;
pub mod config;
pub mod game;
pub mod snake;
pub mod term;

/// One axis of a board position, in pixels. Signed so that a step past the
/// left or top wall is representable during the collision check.
pub type Coord = i32;

/// A board position, always quantized to [`config::CELL_SIZE`].
pub type Cell = (Coord, Coord);
