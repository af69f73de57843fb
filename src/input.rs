//! Keyboard and button mapping
//!
//! Arrow keys or WASD steer, Space toggles pause, Enter starts and `R`
//! resets. The three on-screen buttons map to the same commands.

pub use crate::sim::Command;
use crate::sim::Direction;

impl Command {
    /// Map a `KeyboardEvent.key` value (or Tk-style keysym) to a command
    pub fn from_key(key: &str) -> Option<Self> {
        let cmd = match key {
            "ArrowUp" | "Up" | "w" | "W" => Command::Turn(Direction::Up),
            "ArrowDown" | "Down" | "s" | "S" => Command::Turn(Direction::Down),
            "ArrowLeft" | "Left" | "a" | "A" => Command::Turn(Direction::Left),
            "ArrowRight" | "Right" | "d" | "D" => Command::Turn(Direction::Right),
            " " | "Spacebar" | "space" => Command::TogglePause,
            "Enter" => Command::Start,
            "r" | "R" => Command::Reset,
            _ => return None,
        };
        Some(cmd)
    }

    /// Map an on-screen button id to a command
    pub fn from_button(id: &str) -> Option<Self> {
        match id {
            "start-btn" => Some(Command::Start),
            "pause-btn" => Some(Command::TogglePause),
            "reset-btn" => Some(Command::Reset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key("ArrowUp"), Some(Command::Turn(Direction::Up)));
        assert_eq!(Command::from_key("Left"), Some(Command::Turn(Direction::Left)));
        assert_eq!(Command::from_key("d"), Some(Command::Turn(Direction::Right)));
        assert_eq!(Command::from_key(" "), Some(Command::TogglePause));
        assert_eq!(Command::from_key("space"), Some(Command::TogglePause));
        assert_eq!(Command::from_key("Enter"), Some(Command::Start));
        assert_eq!(Command::from_key("R"), Some(Command::Reset));
        assert_eq!(Command::from_key("q"), None);
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(Command::from_button("start-btn"), Some(Command::Start));
        assert_eq!(Command::from_button("pause-btn"), Some(Command::TogglePause));
        assert_eq!(Command::from_button("reset-btn"), Some(Command::Reset));
        assert_eq!(Command::from_button("help-btn"), None);
    }
}
