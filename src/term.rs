use std::{
    collections::HashSet,
    io::{self, stdout, Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::config::{CELL_SIZE, GRID_HEIGHT, GRID_WIDTH};
use crate::game::{GameState, SnakeGame};
use crate::{Cell, Coord};

const BOARD_COLS: u16 = (GRID_WIDTH / CELL_SIZE) as u16;
const BOARD_ROWS: u16 = (GRID_HEIGHT / CELL_SIZE) as u16;

// Wide enough for the widest overlay box, tall enough for the framed board
// plus the score line.
const MIN_COLS: u16 = 28;
const MIN_ROWS: u16 = BOARD_ROWS + 3;

pub struct TermManager {
    stdout: Stdout,
    size: (u16, u16),
    origin: (u16, u16),
    last_state: Option<GameState>,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "terminal is {}x{}, need at least {}x{}",
                    cols, rows, MIN_COLS, MIN_ROWS
                ),
            ));
        }

        // Center the board, leaving one row above the frame for the score.
        let origin = (
            (cols - (BOARD_COLS + 2)) / 2,
            (rows - (BOARD_ROWS + 3)) / 2 + 1,
        );

        Ok(TermManager {
            stdout: stdout(),
            size: (cols, rows),
            origin,
            last_state: None,
        })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.set_raw_mode(true)?;
        self.set_cursor_visibility(false)?;
        self.set_cursor_blink(false)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        self.set_raw_mode(false)?;
        self.set_cursor_visibility(true)?;
        self.set_cursor_blink(true)?;
        execute!(self.stdout, LeaveAlternateScreen)
    }

    /// Blocks until the next key event.
    pub fn wait_key(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Waits at most `timeout` for a key event. `None` means the timeout
    /// elapsed first. Non-key events spend the remaining budget instead of
    /// cutting the wait short.
    pub fn poll_key(&self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !poll(remaining)? {
                return Ok(None);
            }
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
    }

    /// Repaints the whole board from the game's current state, plus the
    /// intro or game-over overlay when no run is in progress.
    pub fn render<R>(&mut self, game: &SnakeGame<R>) -> io::Result<()> {
        let state = game.state();
        if self.last_state != Some(state) {
            execute!(self.stdout, terminal::Clear(ClearType::All))?;
            self.draw_border()?;
            self.last_state = Some(state);
        }

        self.draw_score(game.score())?;
        self.draw_cells(game)?;

        match state {
            GameState::NotStarted => {
                self.draw_message(&[
                    "Arrow keys or WASD to move",
                    "Enter or Space to start",
                    "q or CTRL+C to quit",
                ])?;
            }
            GameState::Ended => {
                self.draw_message(&[
                    "Game over!",
                    &*format!("Score: {}", game.score()),
                    "",
                    "Enter or Space to restart",
                    "q or CTRL+C to quit",
                ])?;
            }
            GameState::Running => {}
        }

        self.flush()
    }

    fn draw_border(&mut self) -> io::Result<()> {
        let (left, top) = self.origin;
        let end_x = left + BOARD_COLS + 1;
        let end_y = top + BOARD_ROWS + 1;

        for x in left..=end_x {
            let ch = if x == left || x == end_x { '+' } else { '-' };
            self.print_at((x, top), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in top + 1..end_y {
            self.print_at((left, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    fn draw_score(&mut self, score: u32) -> io::Result<()> {
        let (left, top) = self.origin;
        queue!(
            self.stdout,
            cursor::MoveTo(left, top - 1),
            style::Print(format!("Score: {}", score))
        )
    }

    fn draw_cells<R>(&mut self, game: &SnakeGame<R>) -> io::Result<()> {
        let body: HashSet<Cell> = game.snake().cells().collect();

        for row in 0..BOARD_ROWS {
            for col in 0..BOARD_COLS {
                let cell = (col as Coord * CELL_SIZE, row as Coord * CELL_SIZE);
                let ch = cell_glyph(game, &body, cell);
                let pos = self.cell_pos(cell);
                self.print_at(pos, ch)?;
            }
        }

        Ok(())
    }

    fn draw_message(&mut self, lines: &[&str]) -> io::Result<()> {
        let longest = lines.iter().map(|line| line.len()).max().unwrap_or(0);
        let box_width = (longest + 2) as u16;
        let box_height = lines.len() as u16 + 2;
        let top_left = (
            self.size.0.saturating_sub(box_width) / 2,
            self.size.1.saturating_sub(box_height) / 2,
        );

        // Blank rows above and below the text
        for y in [top_left.1, top_left.1 + box_height - 1] {
            for x_diff in 0..box_width {
                self.print_at((top_left.0 + x_diff, y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", line = line, width = box_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (x_diff, ch) in padded.char_indices() {
                self.print_at((top_left.0 + x_diff as u16, y), ch)?;
            }
        }

        Ok(())
    }

    // Terminal position of a grid cell, inside the border.
    fn cell_pos(&self, cell: Cell) -> (u16, u16) {
        let (left, top) = self.origin;
        (
            left + 1 + (cell.0 / CELL_SIZE) as u16,
            top + 1 + (cell.1 / CELL_SIZE) as u16,
        )
    }

    fn print_at(&mut self, pos: (u16, u16), ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    fn set_raw_mode(&self, option: bool) -> io::Result<()> {
        if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        }
    }

    fn set_cursor_visibility(&mut self, option: bool) -> io::Result<()> {
        if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        }
    }

    fn set_cursor_blink(&mut self, option: bool) -> io::Result<()> {
        if option {
            execute!(self.stdout, cursor::EnableBlinking)
        } else {
            execute!(self.stdout, cursor::DisableBlinking)
        }
    }
}

// Glyph for one interior cell. Once the run has ended the whole snake reads
// as dead, head included.
fn cell_glyph<R>(game: &SnakeGame<R>, body: &HashSet<Cell>, cell: Cell) -> char {
    let snake = game.snake();
    if game.state() == GameState::Ended && body.contains(&cell) {
        'X'
    } else if cell == snake.head() {
        snake.head_char()
    } else if body.contains(&cell) {
        '█'
    } else if cell == game.food() {
        'O'
    } else {
        ' '
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::command::Command;

    fn running_game() -> SnakeGame<StdRng> {
        let mut game = SnakeGame::with_rng(StdRng::seed_from_u64(7));
        game.apply(Command::StartOrRestart);
        game
    }

    fn occupancy(game: &SnakeGame<StdRng>) -> HashSet<Cell> {
        game.snake().cells().collect()
    }

    #[test]
    fn live_board_glyphs() {
        let game = running_game();
        let body = occupancy(&game);

        assert_eq!(cell_glyph(&game, &body, (100, 200)), '>');
        assert_eq!(cell_glyph(&game, &body, (80, 200)), '█');
        assert_eq!(cell_glyph(&game, &body, (60, 200)), '█');
        assert_eq!(cell_glyph(&game, &body, game.food()), 'O');

        let empty = [(0, 0), (20, 0)]
            .into_iter()
            .find(|&cell| cell != game.food() && !body.contains(&cell))
            .unwrap();
        assert_eq!(cell_glyph(&game, &body, empty), ' ');
    }

    #[test]
    fn every_segment_reads_dead_after_the_run_ends() {
        let mut game = running_game();
        // 15 steps from (100, 200) heading right is one past the wall.
        for _ in 0..15 {
            game.apply(Command::Tick);
        }
        assert_eq!(game.state(), GameState::Ended);

        let body = occupancy(&game);
        for cell in game.snake().cells() {
            assert_eq!(cell_glyph(&game, &body, cell), 'X');
        }
        // The frozen food cell still shows under the overlay.
        assert_eq!(cell_glyph(&game, &body, game.food()), 'O');
    }
}
