use std::io;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;

use crate::command::Command;
use crate::config::TICK_INTERVAL;
use crate::game::{GameState, SnakeGame};
use crate::term::TermManager;

/// Ties the game to a terminal: turns key presses and tick deadlines into
/// commands and repaints after every one the game consumes.
pub struct App {
    term: TermManager,
    game: SnakeGame,
}

impl App {
    pub fn new() -> io::Result<Self> {
        Ok(App {
            term: TermManager::new()?,
            game: SnakeGame::new(),
        })
    }

    /// Runs until the player quits. The terminal is restored on every exit,
    /// including a setup that failed partway through.
    pub fn run(&mut self) -> io::Result<()> {
        let res = self.term.setup().and_then(|_| self.run_loop());
        let restored = self.term.restore();
        res.and(restored)
    }

    fn run_loop(&mut self) -> io::Result<()> {
        self.term.render(&self.game)?;
        let mut next_tick = Instant::now() + TICK_INTERVAL;

        loop {
            if self.game.state() == GameState::Running {
                let timeout = next_tick.saturating_duration_since(Instant::now());
                match self.term.poll_key(timeout)? {
                    // Key handling leaves the deadline alone, so input never
                    // delays a tick.
                    Some(event) => {
                        if self.handle_key(event)? {
                            return Ok(());
                        }
                    }
                    None => {
                        self.dispatch(Command::Tick)?;
                        next_tick = Instant::now() + TICK_INTERVAL;
                    }
                }
            } else {
                // No run in progress means no timer: just block on input.
                let event = self.term.wait_key()?;
                if self.handle_key(event)? {
                    return Ok(());
                }
                next_tick = Instant::now() + TICK_INTERVAL;
            }
        }
    }

    /// Returns `Ok(true)` when the player asked to quit.
    fn handle_key(&mut self, event: KeyEvent) -> io::Result<bool> {
        if event.kind == KeyEventKind::Release {
            return Ok(false);
        }
        if is_quit(&event) {
            info!("quit requested");
            return Ok(true);
        }
        if let Some(command) = Command::from_key_event(event) {
            self.dispatch(command)?;
        }
        Ok(false)
    }

    fn dispatch(&mut self, command: Command) -> io::Result<()> {
        let before = self.game.state();
        self.game.apply(command);
        let after = self.game.state();

        if before != after {
            match after {
                GameState::Running => info!("run started"),
                GameState::Ended => info!("run over, final score {}", self.game.score()),
                GameState::NotStarted => {}
            }
        }

        self.term.render(&self.game)
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('q')
        || event.code == KeyCode::Esc
        || (event.code == KeyCode::Char('c') && event.modifiers == KeyModifiers::CONTROL)
}
