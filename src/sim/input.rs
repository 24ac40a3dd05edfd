//! Keyboard mapping
//!
//! Keys are identified by `KeyboardEvent.code`. Commands apply to the state as
//! soon as the event arrives; the next tick sees the result.

use super::state::{GamePhase, GameState};

/// Discrete keyboard events from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent<'a> {
    Down(&'a str),
    Up(&'a str),
}

/// Player-facing actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    Shoot,
    /// Start from idle or restart after the round ended
    Start,
    /// Hand control to the autopilot and back
    ToggleIdle,
}

impl Command {
    /// Map a key code to a command, ignoring unbound keys
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(Command::MoveUp),
            "ArrowDown" | "KeyS" => Some(Command::MoveDown),
            "Space" => Some(Command::Shoot),
            "Enter" => Some(Command::Start),
            "KeyI" => Some(Command::ToggleIdle),
            _ => None,
        }
    }
}

/// Translate a key event; releases never map to a command
pub fn command_for(event: KeyEvent<'_>) -> Option<Command> {
    match event {
        KeyEvent::Down(code) => Command::from_key_code(code),
        KeyEvent::Up(_) => None,
    }
}

/// Apply a gameplay command to the session
///
/// Movement and shooting only act while running. `Start` and `ToggleIdle`
/// are handled by the frame loop driver and are ignored here. Returns whether
/// the state changed.
pub fn apply_command(state: &mut GameState, command: Command) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }
    match command {
        Command::MoveUp => {
            let before = state.player.lane;
            state.move_player(-1);
            state.player.lane != before
        }
        Command::MoveDown => {
            let before = state.player.lane;
            state.move_player(1);
            state.player.lane != before
        }
        Command::Shoot => state.player_shoot(),
        Command::Start | Command::ToggleIdle => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::sim::lanes::Viewport;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key_code("ArrowUp"), Some(Command::MoveUp));
        assert_eq!(Command::from_key_code("KeyW"), Some(Command::MoveUp));
        assert_eq!(Command::from_key_code("ArrowDown"), Some(Command::MoveDown));
        assert_eq!(Command::from_key_code("KeyS"), Some(Command::MoveDown));
        assert_eq!(Command::from_key_code("Space"), Some(Command::Shoot));
        assert_eq!(Command::from_key_code("KeyQ"), None);
        assert_eq!(command_for(KeyEvent::Up("Space")), None);
        assert_eq!(command_for(KeyEvent::Down("Space")), Some(Command::Shoot));
    }

    #[test]
    fn test_commands_ignored_unless_running() {
        let mut state = GameState::new(&Settings::default(), Viewport::default(), 1);
        assert!(!apply_command(&mut state, Command::Shoot));
        assert!(!apply_command(&mut state, Command::MoveUp));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.lane, 1);
    }

    #[test]
    fn test_commands_move_and_shoot() {
        let mut state = GameState::new(&Settings::default(), Viewport::default(), 1);
        state.start(1);
        assert!(apply_command(&mut state, Command::MoveUp));
        assert!(!apply_command(&mut state, Command::MoveUp));
        assert_eq!(state.player.lane, 0);
        assert!(apply_command(&mut state, Command::Shoot));
        assert!(!apply_command(&mut state, Command::Shoot));
        assert_eq!(state.projectiles.len(), 1);
    }
}
