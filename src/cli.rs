use crate::game::{GameInterface, UserAction};
use crate::questions::Question;
use crate::round::{Attempt, MAX_ATTEMPTS, Round};
use clap::Parser;
use std::io::BufRead;

/// Factle CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a questions JSON file
    #[arg(short = 'i', long = "input")]
    pub questions_path: Option<String>,

    /// Play the question scheduled for this date (YYYY-MM-DD) instead of today
    #[arg(short = 'd', long = "date")]
    pub date: Option<String>,

    /// Use the line-based prompt instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// Validate the questions file and exit
    #[arg(long)]
    pub check: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

fn parse_option_index(input: &str, option_count: usize) -> Option<usize> {
    let n: usize = input.parse().ok()?;
    (1..=option_count).contains(&n).then(|| n - 1)
}

pub fn display_question(question: &Question) {
    println!("\n{}", question.prompt);
    println!("Guess the top 5 in ranked order. You have {MAX_ATTEMPTS} attempts.");
    for (i, option) in question.options.iter().enumerate() {
        println!("{:>2}. {}", i + 1, option);
    }
}

pub fn display_selection(round: &Round) {
    let labels: Vec<&str> = round.selection().iter().map(String::as_str).collect();
    println!(
        "Current guess [{}/5]: {}",
        labels.len(),
        labels.join(" | ")
    );
}

pub fn display_attempt(round: &Round, attempt: &Attempt) {
    println!("\nAttempt {}/{MAX_ATTEMPTS}:", round.attempts_used());
    for (label, tile) in attempt.labels.iter().zip(attempt.tiles.iter()) {
        println!("  {} {}", tile.symbol(), label);
    }
}

pub fn display_incomplete_selection(selected: usize) {
    println!("Pick exactly 5 options before submitting ({selected} selected).");
}

pub fn display_win(round: &Round, source: Option<&str>) {
    println!("\nCorrect! Solved in {}.", round.score_indicator());
    display_result_footer(source);
}

pub fn display_loss(round: &Round, source: Option<&str>) {
    println!("\nOut of attempts. The top 5 in order:");
    for (i, answer) in round.answers().iter().enumerate() {
        println!("{}. {}", i + 1, answer);
    }
    display_result_footer(source);
}

fn display_result_footer(source: Option<&str>) {
    if let Some(source) = source {
        println!("Source: {source}");
    }
    println!("Type 'share' for a shareable result, or 'exit' to quit.");
}

pub fn display_share(digest: &str) {
    println!("\n{digest}");
}

/// Read one action from the reader. Returns None for input that was
/// reported as invalid; EOF and read errors exit so a closed pipe cannot
/// spin the loop forever.
pub fn read_action<R: BufRead>(reader: &mut R, options: &[String]) -> Option<UserAction> {
    println!("\nEnter an option number, 'b' to undo, 's' to submit, 'share', or 'exit':");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => return Some(UserAction::Exit),
        Ok(_) => {}
    }
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "" => None,
        "exit" | "quit" => Some(UserAction::Exit),
        "b" | "back" => Some(UserAction::Backspace),
        "s" | "submit" => Some(UserAction::Submit),
        "share" => Some(UserAction::Share),
        _ => match parse_option_index(&input, options.len()) {
            Some(index) => Some(UserAction::Select(options[index].clone())),
            None => {
                println!(
                    "Invalid input. Enter a number between 1 and {}.",
                    options.len()
                );
                None
            }
        },
    }
}

/// Line-based implementation of the GameInterface trait
/// This struct wraps a BufRead reader and prints to stdout, so tests can
/// script a whole round through a Cursor
pub struct PromptInterface<R: BufRead> {
    reader: R,
    options: Vec<String>,
    source: Option<String>,
}

impl<R: BufRead> PromptInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            options: Vec::new(),
            source: None,
        }
    }
}

impl<R: BufRead> GameInterface for PromptInterface<R> {
    fn display_question(&mut self, question: &Question) {
        self.options.clone_from(&question.options);
        self.source.clone_from(&question.source);
        display_question(question);
    }

    fn display_selection(&mut self, round: &Round) {
        display_selection(round);
    }

    fn display_attempt(&mut self, round: &Round, attempt: &Attempt) {
        display_attempt(round, attempt);
    }

    fn display_incomplete_selection(&mut self, selected: usize) {
        display_incomplete_selection(selected);
    }

    fn display_win(&mut self, round: &Round) {
        display_win(round, self.source.as_deref());
    }

    fn display_loss(&mut self, round: &Round) {
        display_loss(round, self.source.as_deref());
    }

    fn display_share(&mut self, digest: &str) {
        display_share(digest);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        read_action(&mut self.reader, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn options() -> Vec<String> {
        ["Alpha", "Beta", "Gamma", "Delta"].map(String::from).to_vec()
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli {
            questions_path: None,
            date: None,
            plain: false,
            check: false,
        };
        assert_eq!(cli.questions_path, None);
        assert_eq!(cli.date, None);
        assert!(!cli.plain);
    }

    #[test]
    fn test_cli_with_path_and_date() {
        let cli = Cli {
            questions_path: Some("custom_questions.json".to_string()),
            date: Some("2026-08-22".to_string()),
            plain: true,
            check: false,
        };
        assert_eq!(
            cli.questions_path,
            Some("custom_questions.json".to_string())
        );
        assert_eq!(cli.date, Some("2026-08-22".to_string()));
        assert!(cli.plain);
    }

    #[test]
    fn test_parse_option_index() {
        assert_eq!(parse_option_index("1", 4), Some(0));
        assert_eq!(parse_option_index("4", 4), Some(3));
        assert_eq!(parse_option_index("0", 4), None); // 1-based
        assert_eq!(parse_option_index("5", 4), None); // Out of range
        assert_eq!(parse_option_index("abc", 4), None);
        assert_eq!(parse_option_index("-1", 4), None);
        assert_eq!(parse_option_index("", 4), None);
    }

    #[test]
    fn test_read_action_selects_by_number() {
        let mut reader = Cursor::new("2\n");
        match read_action(&mut reader, &options()) {
            Some(UserAction::Select(label)) => assert_eq!(label, "Beta"),
            other => panic!("Expected Select, got {other:?}"),
        }
    }

    #[test]
    fn test_read_action_trims_whitespace() {
        let mut reader = Cursor::new("  3  \n");
        match read_action(&mut reader, &options()) {
            Some(UserAction::Select(label)) => assert_eq!(label, "Gamma"),
            other => panic!("Expected Select, got {other:?}"),
        }
    }

    #[test]
    fn test_read_action_commands() {
        let cases = [
            ("b\n", UserAction::Backspace),
            ("back\n", UserAction::Backspace),
            ("s\n", UserAction::Submit),
            ("submit\n", UserAction::Submit),
            ("share\n", UserAction::Share),
            ("exit\n", UserAction::Exit),
            ("quit\n", UserAction::Exit),
            ("EXIT\n", UserAction::Exit), // Case-insensitive
        ];
        for (input, expected) in cases {
            let mut reader = Cursor::new(input);
            assert_eq!(read_action(&mut reader, &options()), Some(expected));
        }
    }

    #[test]
    fn test_read_action_rejects_out_of_range() {
        let mut reader = Cursor::new("9\n");
        assert_eq!(read_action(&mut reader, &options()), None);
    }

    #[test]
    fn test_read_action_rejects_garbage() {
        let mut reader = Cursor::new("banana\n");
        assert_eq!(read_action(&mut reader, &options()), None);
    }

    #[test]
    fn test_read_action_blank_line_ignored() {
        let mut reader = Cursor::new("\n");
        assert_eq!(read_action(&mut reader, &options()), None);
    }

    #[test]
    fn test_read_action_eof_exits() {
        let mut reader = Cursor::new("");
        assert_eq!(
            read_action(&mut reader, &options()),
            Some(UserAction::Exit)
        );
    }
}
