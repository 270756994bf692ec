use crate::scoring::{ANSWER_SLOTS, Tile, classify_guess, digest_line};
use std::collections::HashMap;
use thiserror::Error;

pub const MAX_ATTEMPTS: usize = 5;

/// One completed submission and the classification recorded for it.
#[derive(Clone, Debug)]
pub struct Attempt {
    pub labels: Vec<String>,
    pub tiles: [Tile; ANSWER_SLOTS],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("pick exactly 5 options before submitting ({selected} selected)")]
    IncompleteSelection { selected: usize },
    #[error("the round is already over")]
    RoundOver,
}

/// One day's play session: the in-progress selection, the attempt history,
/// and the per-label feedback aggregate. Owned by the game loop; once the
/// state leaves `InProgress` every mutating call becomes a no-op.
pub struct Round {
    answers: [String; ANSWER_SLOTS],
    selection: Vec<String>,
    attempts: Vec<Attempt>,
    state: RoundState,
    statuses: HashMap<String, Tile>,
}

impl Round {
    pub fn new(answers: [String; ANSWER_SLOTS]) -> Self {
        Self {
            answers,
            selection: Vec::new(),
            attempts: Vec::new(),
            state: RoundState::InProgress,
            statuses: HashMap::new(),
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state != RoundState::InProgress
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn attempts_used(&self) -> usize {
        self.attempts.len()
    }

    pub fn attempts_left(&self) -> usize {
        MAX_ATTEMPTS - self.attempts.len()
    }

    pub fn answers(&self) -> &[String; ANSWER_SLOTS] {
        &self.answers
    }

    /// Best feedback tier seen for a label across all attempts so far.
    pub fn option_status(&self, label: &str) -> Option<Tile> {
        self.statuses.get(label).copied()
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selection.iter().any(|l| l == label)
    }

    /// Append a label to the in-progress guess. Ignored (returns false) once
    /// the round is over, when the label is already selected, or when the
    /// guess already holds 5 labels.
    pub fn select(&mut self, label: &str) -> bool {
        if self.is_over() || self.selection.len() >= ANSWER_SLOTS || self.is_selected(label) {
            return false;
        }
        self.selection.push(label.to_string());
        true
    }

    /// Remove the most recently selected label, if any.
    pub fn deselect(&mut self) -> Option<String> {
        if self.is_over() {
            return None;
        }
        self.selection.pop()
    }

    /// Score the current guess. A selection short of 5 labels is rejected
    /// without consuming an attempt; a finished round rejects outright. On
    /// success the attempt is recorded, per-label feedback is merged
    /// upgrade-only, the selection empties, and the round moves to `Won` on
    /// an exact match or `Lost` when the attempt limit is spent.
    pub fn submit(&mut self) -> Result<Attempt, SubmitError> {
        if self.is_over() {
            return Err(SubmitError::RoundOver);
        }
        if self.selection.len() != ANSWER_SLOTS {
            return Err(SubmitError::IncompleteSelection {
                selected: self.selection.len(),
            });
        }

        let labels = std::mem::take(&mut self.selection);
        let tiles = classify_guess(&labels, &self.answers);
        for (label, tile) in labels.iter().zip(tiles.iter()) {
            self.statuses
                .entry(label.clone())
                .and_modify(|current| *current = current.merge(*tile))
                .or_insert(*tile);
        }

        let attempt = Attempt { labels, tiles };
        self.attempts.push(attempt.clone());

        if tiles.iter().all(|t| *t == Tile::Correct) {
            self.state = RoundState::Won;
        } else if self.attempts.len() >= MAX_ATTEMPTS {
            self.state = RoundState::Lost;
        }

        Ok(attempt)
    }

    /// One 5-symbol row per completed attempt, in submission order.
    pub fn digest_lines(&self) -> Vec<String> {
        self.attempts.iter().map(|a| digest_line(&a.tiles)).collect()
    }

    pub fn score_indicator(&self) -> String {
        match self.state {
            RoundState::Lost => format!("X/{MAX_ATTEMPTS}"),
            _ => format!("{}/{MAX_ATTEMPTS}", self.attempts.len()),
        }
    }

    /// Plain-text result for sharing: score header plus the symbol rows.
    pub fn share_digest(&self) -> String {
        let mut lines = vec![format!("Factle {}", self.score_indicator())];
        lines.extend(self.digest_lines());
        lines.join("\n")
    }
}
