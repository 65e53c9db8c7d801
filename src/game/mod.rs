//! Core game model: array store, target patterns, the paced pattern search and
//! the level / countdown state machine. Nothing in here touches the browser;
//! the `web` adapter drives a [`GameSession`] with timestamps and turns the
//! [`GameEvent`]s it emits into DOM updates and sounds.

mod array_store;
mod clock;
mod pattern;
mod search;
mod session;

pub use array_store::ArrayStore;
pub use clock::{Clock, ManualClock, SecondTimer};
pub use pattern::{PatternGenerator, pattern_len};
pub use search::{SearchOutcome, SearchScan, SearchStep, find, highlight_slots};
pub use session::GameSession;

/// One array position: a digit 0-9 or empty.
pub type Slot = Option<u8>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Lost,
    WonGame,
}

impl Outcome {
    pub fn title(self) -> &'static str {
        match self {
            Outcome::Lost => "⏰ Time's Up!",
            Outcome::WonGame => "🏆 Congratulations!",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::Lost => "The vault remains locked. Try again, hacker!",
            Outcome::WonGame => "You've completed all levels! You are now a master code breaker!",
        }
    }
}

/// `Celebrating` is the pause after a level objective is met: input is blocked
/// while the countdown keeps running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Running,
    Celebrating,
    Over(Outcome),
}

impl GameState {
    pub fn is_active(self) -> bool {
        self == GameState::Running
    }

    pub fn is_over(self) -> bool {
        matches!(self, GameState::Over(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// CSS class suffix for the feedback line.
    pub fn as_class(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub severity: Severity,
}

impl Feedback {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self { message: message.into(), severity }
    }
}

/// Everything observable that happened inside a session, in order.
///
/// Search highlights are addressed by compacted index; use
/// [`highlight_slots`] to find the raw cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted { level: u32, target: Vec<u8> },
    TimerTick { remaining: u32 },
    Inserted { index: usize, value: u8 },
    Deleted { index: usize, value: u8 },
    ArrayReset,
    SearchStarted { pattern: Vec<u8> },
    /// The window at `offset` is about to be compared.
    Probing { offset: usize, len: usize },
    ProbeMissed { offset: usize },
    SearchFound { offset: usize, len: usize },
    SearchNotFound,
    /// An in-flight scan was dropped; any search highlight is stale.
    SearchCancelled,
    LevelComplete { level: u32, target: Vec<u8> },
    LevelStarted { level: u32, target: Vec<u8> },
    GameOver(Outcome),
}

impl GameEvent {
    /// True when the slot row must be redrawn after this event.
    pub fn changes_array(&self) -> bool {
        matches!(
            self,
            GameEvent::GameStarted { .. }
                | GameEvent::Inserted { .. }
                | GameEvent::Deleted { .. }
                | GameEvent::ArrayReset
                | GameEvent::LevelStarted { .. }
        )
    }

    /// Player-facing status line for this event, if it has one.
    pub fn feedback(&self) -> Option<Feedback> {
        use Severity::*;
        let fb = match self {
            GameEvent::GameStarted { .. } => Feedback::new(
                "New game started! Find the hidden pattern to crack the code!",
                Normal,
            ),
            GameEvent::Inserted { index, value } => {
                Feedback::new(format!("Inserted {value} at index {index}!"), Success)
            }
            GameEvent::Deleted { index, .. } => {
                Feedback::new(format!("Deleted element at index {index}."), Success)
            }
            GameEvent::ArrayReset => Feedback::new("Array reset to initial state.", Warning),
            GameEvent::SearchStarted { pattern } => Feedback::new(
                format!("Searching for pattern {}...", format_pattern(pattern)),
                Warning,
            ),
            GameEvent::SearchFound { offset, .. } => {
                Feedback::new(format!("Pattern found at index {offset}!"), Success)
            }
            GameEvent::SearchNotFound => Feedback::new("Pattern not found in the array.", Warning),
            GameEvent::LevelComplete { level, target } => Feedback::new(
                format!(
                    "🎉 Level {level} Complete! Pattern {} found!",
                    format_pattern(target)
                ),
                Success,
            ),
            GameEvent::LevelStarted { level, target } => Feedback::new(
                format!("Level {level} started! Find pattern {}", format_pattern(target)),
                Success,
            ),
            GameEvent::TimerTick { .. }
            | GameEvent::Probing { .. }
            | GameEvent::ProbeMissed { .. }
            | GameEvent::SearchCancelled
            | GameEvent::GameOver(_) => return None,
        };
        Some(fb)
    }
}

/// `[1, 4]` style rendering used in feedback and the target display.
pub fn format_pattern(pattern: &[u8]) -> String {
    let parts: Vec<String> = pattern.iter().map(u8::to_string).collect();
    format!("[{}]", parts.join(", "))
}
