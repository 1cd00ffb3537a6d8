//! Game constants and the end-of-game score computation.

use std::time::Duration;

pub const POINTS_PER_CORRECT_ANSWER: u32 = 5;
pub const POINTS_PER_SECOND_REMAINING: u32 = 1;
pub const INCORRECT_TIME_PENALTY_SECS: u32 = 10;
pub const TIME_PER_QUESTION_SECS: u32 = 10;
pub const FEEDBACK_DISPLAY: Duration = Duration::from_millis(2000);
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Tunable rules of a quiz game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRules {
    pub time_per_question_secs: u32,
    pub incorrect_penalty_secs: u32,
    pub points_per_correct_answer: u32,
    pub points_per_second_remaining: u32,
    /// How long answer feedback stays visible.
    pub feedback_display: Duration,
    pub tick_period: Duration,
}

impl Default for QuizRules {
    fn default() -> Self {
        Self {
            time_per_question_secs: TIME_PER_QUESTION_SECS,
            incorrect_penalty_secs: INCORRECT_TIME_PENALTY_SECS,
            points_per_correct_answer: POINTS_PER_CORRECT_ANSWER,
            points_per_second_remaining: POINTS_PER_SECOND_REMAINING,
            feedback_display: FEEDBACK_DISPLAY,
            tick_period: TICK_PERIOD,
        }
    }
}

impl QuizRules {
    /// Starting clock for a bank of `question_count` questions.
    #[must_use]
    pub fn starting_time(&self, question_count: usize) -> i64 {
        let count = i64::try_from(question_count).unwrap_or(i64::MAX);
        count.saturating_mul(i64::from(self.time_per_question_secs))
    }

    /// Final score for a finished game.
    ///
    /// No points at all without a correct answer, even if time remains.
    /// Negative remaining time counts as zero.
    #[must_use]
    pub fn score(&self, correct_answers: u32, time_remaining: i64) -> u32 {
        if correct_answers == 0 {
            return 0;
        }
        let seconds = u32::try_from(time_remaining.max(0)).unwrap_or(u32::MAX);
        self.points_per_correct_answer
            .saturating_mul(correct_answers)
            .saturating_add(self.points_per_second_remaining.saturating_mul(seconds))
    }
}

/// Score with the default rules.
#[must_use]
pub fn score(correct_answers: u32, time_remaining: i64) -> u32 {
    QuizRules::default().score(correct_answers, time_remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_correct_scores_zero() {
        assert_eq!(score(0, 0), 0);
        assert_eq!(score(0, 70), 0);
        assert_eq!(score(0, -12), 0);
    }

    #[test]
    fn correct_answers_plus_time_bonus() {
        assert_eq!(score(3, 7), 22);
        assert_eq!(score(1, 0), 5);
    }

    #[test]
    fn negative_time_is_clamped() {
        assert_eq!(score(2, -5), 10);
    }

    #[test]
    fn custom_rules_apply() {
        let rules = QuizRules {
            points_per_correct_answer: 10,
            points_per_second_remaining: 2,
            ..QuizRules::default()
        };
        assert_eq!(rules.score(2, 4), 28);
    }

    #[test]
    fn starting_time_scales_with_question_count() {
        let rules = QuizRules::default();
        assert_eq!(rules.starting_time(7), 70);
        assert_eq!(rules.starting_time(0), 0);
    }
}
