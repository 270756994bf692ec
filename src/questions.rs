use crate::scoring::ANSWER_SLOTS;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// Question set shipped inside the binary, used when no file is supplied.
pub const EMBEDDED_QUESTIONS: &str = include_str!("resources/questions.json");

/// One dated entry as stored on disk. Options carry the five answers plus
/// distractors; the stored order is not safe to display as-is.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionEntry {
    pub id: u32,
    pub date: NaiveDate,
    pub question: String,
    pub options: Vec<String>,
    pub answers: Vec<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Deserialize)]
struct QuestionFile {
    questions: Vec<QuestionEntry>,
}

/// A playable question: prompt, shuffled options, and the ranked answers.
#[derive(Clone, Debug)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub answers: [String; ANSWER_SLOTS],
    pub source: Option<String>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read questions file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse questions file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("question {id} ({date}): {problem}")]
    InvalidEntry {
        id: u32,
        date: NaiveDate,
        problem: String,
    },
}

/// Parse and validate a whole questions file. Any bad entry fails the load
/// so a broken file is caught at startup rather than on its scheduled day.
pub fn load_questions_from_str(data: &str) -> Result<Vec<QuestionEntry>, LoadError> {
    let file: QuestionFile = serde_json::from_str(data)?;
    for entry in &file.questions {
        if let Err(problem) = validate_entry(entry) {
            return Err(LoadError::InvalidEntry {
                id: entry.id,
                date: entry.date,
                problem,
            });
        }
    }
    Ok(file.questions)
}

pub fn load_questions_from_file(path: &str) -> Result<Vec<QuestionEntry>, LoadError> {
    let data = std::fs::read_to_string(path)?;
    load_questions_from_str(&data)
}

fn validate_entry(entry: &QuestionEntry) -> Result<(), String> {
    if entry.question.trim().is_empty() {
        return Err("empty question text".to_string());
    }
    if entry.answers.len() != ANSWER_SLOTS {
        return Err(format!(
            "expected {ANSWER_SLOTS} answers, found {}",
            entry.answers.len()
        ));
    }
    let mut seen = HashSet::new();
    for answer in &entry.answers {
        if !seen.insert(answer.as_str()) {
            return Err(format!("duplicate answer {answer:?}"));
        }
    }
    if entry.options.len() < ANSWER_SLOTS {
        return Err(format!(
            "needs at least {ANSWER_SLOTS} options, found {}",
            entry.options.len()
        ));
    }
    let mut seen = HashSet::new();
    for option in &entry.options {
        if !seen.insert(option.as_str()) {
            return Err(format!("duplicate option {option:?}"));
        }
    }
    for answer in &entry.answers {
        if !entry.options.contains(answer) {
            return Err(format!("answer {answer:?} missing from options"));
        }
    }
    Ok(())
}

/// Resolve the entry scheduled for `date`, if any. Options are shuffled on
/// the way out because the stored layout keeps the answers at the front.
pub fn question_for_date(entries: &[QuestionEntry], date: NaiveDate) -> Option<Question> {
    let entry = entries.iter().find(|e| e.date == date)?;
    let answers: [String; ANSWER_SLOTS] = entry.answers.clone().try_into().ok()?;
    let mut options = entry.options.clone();
    options.shuffle(&mut rand::rng());
    Some(Question {
        prompt: entry.question.clone(),
        options,
        answers,
        source: entry.source.clone(),
    })
}

/// Dates scheduled more than once. Only the first entry for a date is ever
/// served, so these are authoring mistakes worth reporting.
pub fn duplicate_dates(entries: &[QuestionEntry]) -> Vec<NaiveDate> {
    let mut seen = HashSet::new();
    let mut dupes = Vec::new();
    for entry in entries {
        if !seen.insert(entry.date) && !dupes.contains(&entry.date) {
            dupes.push(entry.date);
        }
    }
    dupes
}

pub fn date_range(entries: &[QuestionEntry]) -> Option<(NaiveDate, NaiveDate)> {
    let first = entries.iter().map(|e| e.date).min()?;
    let last = entries.iter().map(|e| e.date).max()?;
    Some((first, last))
}

pub fn default_questions_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("factle").join("questions.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "questions": [
                {
                    "id": 1,
                    "date": "2026-08-20",
                    "question": "Top 5 largest moons?",
                    "options": ["Ganymede", "Titan", "Callisto", "Io", "Luna", "Europa", "Triton"],
                    "answers": ["Ganymede", "Titan", "Callisto", "Io", "Luna"],
                    "source": "https://example.org/moons"
                },
                {
                    "id": 2,
                    "date": "2026-08-21",
                    "question": "Top 5 something else?",
                    "options": ["A", "B", "C", "D", "E", "F"],
                    "answers": ["A", "B", "C", "D", "E"]
                }
            ]
        }"#
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_valid_file() {
        let entries = load_questions_from_str(sample_json()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[0].date, date(2026, 8, 20));
        assert_eq!(entries[0].options.len(), 7);
        assert_eq!(
            entries[0].source.as_deref(),
            Some("https://example.org/moons")
        );
        // source is optional
        assert_eq!(entries[1].source, None);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let result = load_questions_from_str("{ not json");
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn test_load_rejects_wrong_answer_count() {
        let json = r#"{"questions": [{
            "id": 7, "date": "2026-01-01", "question": "Q?",
            "options": ["A", "B", "C", "D", "E"],
            "answers": ["A", "B", "C", "D"]
        }]}"#;
        match load_questions_from_str(json) {
            Err(LoadError::InvalidEntry { id: 7, problem, .. }) => {
                assert!(problem.contains("expected 5 answers"));
            }
            other => panic!("expected InvalidEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_duplicate_options() {
        let json = r#"{"questions": [{
            "id": 3, "date": "2026-01-01", "question": "Q?",
            "options": ["A", "B", "C", "D", "E", "A"],
            "answers": ["A", "B", "C", "D", "E"]
        }]}"#;
        match load_questions_from_str(json) {
            Err(LoadError::InvalidEntry { problem, .. }) => {
                assert!(problem.contains("duplicate option"));
            }
            other => panic!("expected InvalidEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_answer_outside_options() {
        let json = r#"{"questions": [{
            "id": 4, "date": "2026-01-01", "question": "Q?",
            "options": ["A", "B", "C", "D", "E"],
            "answers": ["A", "B", "C", "D", "Z"]
        }]}"#;
        match load_questions_from_str(json) {
            Err(LoadError::InvalidEntry { problem, .. }) => {
                assert!(problem.contains("missing from options"));
            }
            other => panic!("expected InvalidEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_empty_prompt() {
        let json = r#"{"questions": [{
            "id": 5, "date": "2026-01-01", "question": "   ",
            "options": ["A", "B", "C", "D", "E"],
            "answers": ["A", "B", "C", "D", "E"]
        }]}"#;
        match load_questions_from_str(json) {
            Err(LoadError::InvalidEntry { problem, .. }) => {
                assert!(problem.contains("empty question"));
            }
            other => panic!("expected InvalidEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_question_for_date_resolves_scheduled_entry() {
        let entries = load_questions_from_str(sample_json()).unwrap();
        let question = question_for_date(&entries, date(2026, 8, 20)).unwrap();
        assert_eq!(question.prompt, "Top 5 largest moons?");
        assert_eq!(question.answers[0], "Ganymede");
        assert_eq!(question.answers[4], "Luna");

        // Shuffling keeps the option set intact
        let mut got: Vec<&str> = question.options.iter().map(String::as_str).collect();
        got.sort_unstable();
        let mut want = vec![
            "Callisto", "Europa", "Ganymede", "Io", "Luna", "Titan", "Triton",
        ];
        want.sort_unstable();
        assert_eq!(got, want);
    }

    #[test]
    fn test_question_for_date_misses_unscheduled_day() {
        let entries = load_questions_from_str(sample_json()).unwrap();
        assert!(question_for_date(&entries, date(2026, 8, 22)).is_none());
    }

    #[test]
    fn test_duplicate_dates_reported_once() {
        let mut entries = load_questions_from_str(sample_json()).unwrap();
        let mut extra = entries[0].clone();
        extra.id = 9;
        entries.push(extra.clone());
        entries.push(extra);
        assert_eq!(duplicate_dates(&entries), vec![date(2026, 8, 20)]);
    }

    #[test]
    fn test_date_range_spans_entries() {
        let entries = load_questions_from_str(sample_json()).unwrap();
        assert_eq!(
            date_range(&entries),
            Some((date(2026, 8, 20), date(2026, 8, 21)))
        );
        assert_eq!(date_range(&[]), None);
    }

    #[test]
    fn test_embedded_questions_are_valid() {
        let entries = load_questions_from_str(EMBEDDED_QUESTIONS).unwrap();
        assert!(!entries.is_empty());
        assert!(duplicate_dates(&entries).is_empty());
    }
}
