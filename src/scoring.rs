pub const ANSWER_SLOTS: usize = 5;

/// Per-position feedback for one submitted label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Correct,
    Present,
    Absent,
}

impl Tile {
    pub fn symbol(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }

    /// Combine feedback for the same label across attempts. Tiers only ever
    /// improve: Correct stays Correct, Present never falls back to Absent.
    pub fn merge(self, later: Tile) -> Tile {
        if later.tier() > self.tier() { later } else { self }
    }

    fn tier(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
            Self::Correct => 2,
        }
    }
}

/// Classify a full guess against the ordered answers. Position wins over
/// mere membership: same label at the same slot is Correct, a label found
/// elsewhere in the answers is Present, anything else is Absent.
///
/// `guess` must hold exactly `ANSWER_SLOTS` labels; `Round::submit`
/// guarantees that before calling.
pub fn classify_guess(guess: &[String], answers: &[String; ANSWER_SLOTS]) -> [Tile; ANSWER_SLOTS] {
    debug_assert_eq!(guess.len(), ANSWER_SLOTS);
    std::array::from_fn(|i| {
        if guess[i] == answers[i] {
            Tile::Correct
        } else if answers.contains(&guess[i]) {
            Tile::Present
        } else {
            Tile::Absent
        }
    })
}

/// Render one attempt as its 5-symbol share row.
pub fn digest_line(tiles: &[Tile; ANSWER_SLOTS]) -> String {
    tiles.iter().map(|t| t.symbol()).collect()
}
