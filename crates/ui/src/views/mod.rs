mod high_scores;
mod question;
mod quiz;
mod results;
mod state;
mod welcome;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use high_scores::HighScoresPanel;
pub use question::QuestionCard;
pub use quiz::QuizView;
pub use results::ResultsPanel;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use welcome::WelcomePanel;
