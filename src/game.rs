use crate::questions::Question;
use crate::round::{Attempt, Round, RoundState, SubmitError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    Select(String),
    Backspace,
    Submit,
    Share,
    Exit,
}

/// Frontend seam for the game loop. Implementations own presentation and
/// input; the loop owns the rules.
pub trait GameInterface {
    fn display_question(&mut self, question: &Question);
    fn display_selection(&mut self, round: &Round);
    fn display_attempt(&mut self, round: &Round, attempt: &Attempt);
    fn display_incomplete_selection(&mut self, selected: usize);
    fn display_win(&mut self, round: &Round);
    fn display_loss(&mut self, round: &Round);
    fn display_share(&mut self, digest: &str);
    fn read_action(&mut self) -> Option<UserAction>;
}

/// Drive one round of the daily question until the player exits. The loop
/// keeps running after a win or loss so the result can still be shared;
/// selection and submission become no-ops once the round is decided.
pub fn game_loop<I: GameInterface>(question: &Question, interface: &mut I) -> RoundState {
    let mut round = Round::new(question.answers.clone());
    interface.display_question(question);

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };

        match action {
            UserAction::Select(label) => {
                round.select(&label);
                interface.display_selection(&round);
            }
            UserAction::Backspace => {
                round.deselect();
                interface.display_selection(&round);
            }
            UserAction::Submit => match round.submit() {
                Ok(attempt) => {
                    interface.display_attempt(&round, &attempt);
                    match round.state() {
                        RoundState::Won => interface.display_win(&round),
                        RoundState::Lost => interface.display_loss(&round),
                        RoundState::InProgress => interface.display_selection(&round),
                    }
                }
                Err(SubmitError::IncompleteSelection { selected }) => {
                    interface.display_incomplete_selection(selected);
                }
                Err(SubmitError::RoundOver) => {}
            },
            UserAction::Share => {
                interface.display_share(&round.share_digest());
            }
            UserAction::Exit => break,
        }
    }

    round.state()
}
