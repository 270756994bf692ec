// Library interface for factle
// This allows integration tests to access internal modules

pub mod cli;
pub mod game;
pub mod logging;
pub mod questions;
pub mod round;
pub mod scoring;
pub mod tui;

// Re-export commonly used items for easier testing
pub use game::{GameInterface, UserAction, game_loop};
pub use questions::{load_questions_from_file, load_questions_from_str, question_for_date};
pub use round::{Round, RoundState};
pub use scoring::{Tile, classify_guess};
