use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::snake::Direction;

/// Everything that can happen to the game, fed to
/// [`SnakeGame::apply`](crate::game::SnakeGame::apply) one at a time. The
/// timer produces `Tick`; the keyboard produces the other two.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Tick,
    SetDirection(Direction),
    StartOrRestart,
}

impl Command {
    /// Maps a key event to a command: arrows or WASD steer, Enter or Space
    /// starts/restarts. Every other key, and every key release, maps to
    /// nothing.
    pub fn from_key_event(event: KeyEvent) -> Option<Command> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        match event.code {
            KeyCode::Up | KeyCode::Char('w') => Some(Command::SetDirection(Direction::Up)),
            KeyCode::Down | KeyCode::Char('s') => Some(Command::SetDirection(Direction::Down)),
            KeyCode::Left | KeyCode::Char('a') => Some(Command::SetDirection(Direction::Left)),
            KeyCode::Right | KeyCode::Char('d') => Some(Command::SetDirection(Direction::Right)),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::StartOrRestart),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_steer() {
        for (code, direction) in [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Char('s'), Direction::Down),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Char('d'), Direction::Right),
        ] {
            assert_eq!(
                Command::from_key_event(press(code)),
                Some(Command::SetDirection(direction))
            );
        }
    }

    #[test]
    fn enter_and_space_start() {
        assert_eq!(
            Command::from_key_event(press(KeyCode::Enter)),
            Some(Command::StartOrRestart)
        );
        assert_eq!(
            Command::from_key_event(press(KeyCode::Char(' '))),
            Some(Command::StartOrRestart)
        );
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        assert_eq!(Command::from_key_event(press(KeyCode::Char('x'))), None);
        assert_eq!(Command::from_key_event(press(KeyCode::Tab)), None);
        assert_eq!(Command::from_key_event(press(KeyCode::F(1))), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(Command::from_key_event(release), None);
    }
}
