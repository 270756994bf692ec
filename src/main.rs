use chrono::NaiveDate;
use factle::cli::{Cli, PromptInterface, parse_cli};
use factle::game::game_loop;
use factle::logging;
use factle::questions::{self, EMBEDDED_QUESTIONS, LoadError, QuestionEntry};
use factle::tui::TuiInterface;
use std::io;

fn main() {
    let cli = parse_cli();
    logging::init(!cli.plain && !cli.check);

    let entries = match load_entries(&cli) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Failed to load questions: {e}");
            std::process::exit(1);
        }
    };

    if cli.check {
        run_check(&entries);
        return;
    }

    let date = match &cli.date {
        Some(text) => match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                eprintln!("Invalid date '{text}' (expected YYYY-MM-DD): {e}");
                std::process::exit(1);
            }
        },
        None => chrono::Local::now().date_naive(),
    };

    let Some(question) = questions::question_for_date(&entries, date) else {
        println!("No question scheduled for {date}.");
        if let Some((first, last)) = questions::date_range(&entries) {
            println!("This question set covers {first} to {last}.");
        }
        return;
    };

    if cli.plain {
        let stdin = io::stdin();
        let mut interface = PromptInterface::new(stdin.lock());
        game_loop(&question, &mut interface);
    } else {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to initialize the terminal UI: {e}");
                eprintln!("Try again with --plain for the line-based interface.");
                std::process::exit(1);
            }
        };
        game_loop(&question, &mut interface);
    }
}

/// Resolution order: explicit --input path, then the per-user data file if
/// one exists, then the question set baked into the binary.
fn load_entries(cli: &Cli) -> Result<Vec<QuestionEntry>, LoadError> {
    if let Some(path) = &cli.questions_path {
        return questions::load_questions_from_file(path);
    }
    if let Some(path) = questions::default_questions_path()
        && path.exists()
    {
        return questions::load_questions_from_file(&path.to_string_lossy());
    }
    questions::load_questions_from_str(EMBEDDED_QUESTIONS)
}

fn run_check(entries: &[QuestionEntry]) {
    println!("Loaded {} questions.", entries.len());
    if let Some((first, last)) = questions::date_range(entries) {
        println!("Dates covered: {first} to {last}.");
    }
    let dupes = questions::duplicate_dates(entries);
    if dupes.is_empty() {
        println!("No duplicate dates.");
    } else {
        for date in &dupes {
            eprintln!("Duplicate date: {date}");
        }
        std::process::exit(1);
    }
}
