//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Append a character to the guess input.
    Type(char),
    /// Delete the last character of the guess input.
    Backspace,
    /// Replace the input with the first suggestion.
    Complete,
    /// Submit the guess input.
    Guess,
    /// Give up the round.
    GiveUp,
    /// Start a new round.
    Restart,
    /// Switch to the next display language.
    CycleLanguage,
    /// Switch to the next generation and start a new round.
    CycleGeneration,
    /// Leave the game.
    Quit,
    /// Unbound key.
    Ignore,
}

/// Maps a key press to an intent.
pub fn intent_for(key: KeyEvent) -> Intent {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Intent::Quit,
        KeyCode::Char('c') if ctrl => Intent::Quit,
        KeyCode::Char('g') if ctrl => Intent::GiveUp,
        KeyCode::Char('r') if ctrl => Intent::Restart,
        KeyCode::Char('l') if ctrl => Intent::CycleLanguage,
        KeyCode::Char('n') if ctrl => Intent::CycleGeneration,
        KeyCode::Char(_) if ctrl => Intent::Ignore,
        KeyCode::Char(c) => Intent::Type(c),
        KeyCode::Backspace => Intent::Backspace,
        KeyCode::Tab => Intent::Complete,
        KeyCode::Enter => Intent::Guess,
        _ => Intent::Ignore,
    }
}
