use thiserror::Error;

use crate::game::Severity;

/// Every way an operation on a [`GameSession`](crate::game::GameSession) can be
/// refused. A refused operation never mutates the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Please enter valid numbers!")]
    Parse { field: &'static str, input: String },
    #[error("Invalid pattern format! Use numbers separated by commas.")]
    PatternFormat { input: String },
    #[error("Enter a valid pattern (e.g., 1,2,3)")]
    PatternLength,
    #[error("Index out of bounds!")]
    Range { index: i64, len: usize },
    #[error("Digits must be between 0 and 9!")]
    Digit { value: i64 },
    #[error("Nothing to delete at this index!")]
    EmptySlot { index: usize },
    #[error("Array is full!")]
    Capacity { capacity: usize },
    #[error("The game is not running")]
    Inactive,
    #[error("Wait for the current search to finish!")]
    Busy,
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GameError {
    /// Feedback severity used when this error is shown to the player.
    pub fn severity(&self) -> Severity {
        match self {
            GameError::PatternLength | GameError::Busy => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// `Inactive` is swallowed at the boundary: input simply does nothing while
    /// the game is paused or over.
    pub fn is_silent(&self) -> bool {
        matches!(self, GameError::Inactive)
    }
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Config(err.to_string())
    }
}

pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_player_feedback() {
        assert_eq!(GameError::Capacity { capacity: 10 }.to_string(), "Array is full!");
        assert_eq!(
            GameError::EmptySlot { index: 3 }.to_string(),
            "Nothing to delete at this index!"
        );
        assert_eq!(
            GameError::Range { index: 12, len: 8 }.to_string(),
            "Index out of bounds!"
        );
    }

    #[test]
    fn severities() {
        assert_eq!(GameError::PatternLength.severity(), Severity::Warning);
        assert_eq!(GameError::Busy.severity(), Severity::Warning);
        assert_eq!(
            GameError::Parse { field: "index", input: "x".into() }.severity(),
            Severity::Error
        );
        assert!(GameError::Inactive.is_silent());
        assert!(!GameError::Busy.is_silent());
    }
}
