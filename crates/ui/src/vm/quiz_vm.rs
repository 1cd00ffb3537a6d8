use std::sync::Arc;

use quiz_core::{QuestionBank, QuizRules};
use services::{
    QuizController, QuizPhase, QuizSnapshot, Scheduler, SessionError, TimerFired,
};

use crate::vm::sanitize_markup;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    Answer(usize),
    ViewHighScores,
    GoHome,
}

/// Facts shown on the welcome screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizIntro {
    pub question_count: usize,
    pub time_limit_secs: i64,
    pub penalty_secs: u32,
    pub points_per_correct_answer: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub slot: usize,
    /// Sanitized markup.
    pub html: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizBodyVm {
    Welcome {
        title: String,
        rules: String,
    },
    Question {
        question_html: String,
        choices: Vec<ChoiceVm>,
    },
    Results {
        score: u32,
        score_label: String,
    },
    HighScores,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizScreenVm {
    pub timer_label: Option<String>,
    pub feedback: Option<String>,
    pub show_high_scores_link: bool,
    pub body: QuizBodyVm,
}

/// Leaving these phases throws away the current game or its unsaved score.
#[must_use]
pub fn needs_leave_confirmation(phase: QuizPhase) -> bool {
    matches!(phase, QuizPhase::Playing | QuizPhase::Finished)
}

#[must_use]
pub fn map_quiz_screen(snapshot: &QuizSnapshot, intro: QuizIntro) -> QuizScreenVm {
    let body = match snapshot.phase {
        QuizPhase::Idle => QuizBodyVm::Welcome {
            title: "Coding Quiz Challenge".to_string(),
            rules: format!(
                "Answer {} questions within {} seconds. \
                 Each wrong answer costs {} seconds. \
                 Your score is {} points per correct answer plus the seconds left on the clock.",
                intro.question_count,
                intro.time_limit_secs,
                intro.penalty_secs,
                intro.points_per_correct_answer
            ),
        },
        QuizPhase::Playing => QuizBodyVm::Question {
            question_html: snapshot
                .question
                .as_deref()
                .map(sanitize_markup)
                .unwrap_or_default(),
            choices: snapshot
                .choices
                .iter()
                .enumerate()
                .map(|(slot, text)| ChoiceVm {
                    slot,
                    html: sanitize_markup(text),
                })
                .collect(),
        },
        QuizPhase::Finished => {
            let score = snapshot.result.map_or(0, |result| result.score);
            QuizBodyVm::Results {
                score,
                score_label: format!("Your final score is {score}."),
            }
        }
        QuizPhase::ReviewingScores => QuizBodyVm::HighScores,
    };

    let timer_label = (snapshot.phase == QuizPhase::Playing)
        .then(|| format!("Time left: {}", snapshot.time_remaining.max(0)));

    QuizScreenVm {
        timer_label,
        feedback: snapshot.feedback.clone(),
        show_high_scores_link: snapshot.phase != QuizPhase::ReviewingScores,
        body,
    }
}

/// Presentation wrapper around a [`QuizController`].
pub struct QuizVm<S: Scheduler> {
    controller: QuizController<S>,
    intro: QuizIntro,
}

impl<S: Scheduler> QuizVm<S> {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, rules: QuizRules, scheduler: S) -> Self {
        let intro = QuizIntro {
            question_count: bank.count(),
            time_limit_secs: rules.starting_time(bank.count()),
            penalty_secs: rules.incorrect_penalty_secs,
            points_per_correct_answer: rules.points_per_correct_answer,
        };
        Self {
            controller: QuizController::new(bank, rules, scheduler),
            intro,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &QuizController<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut QuizController<S> {
        &mut self.controller
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.controller.phase()
    }

    /// Score awaiting submission on the results screen.
    #[must_use]
    pub fn pending_score(&self) -> Option<u32> {
        match self.controller.phase() {
            QuizPhase::Finished => self.controller.session().result().map(|r| r.score),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// Returns the `SessionError` of an action that is not valid in the
    /// current phase; the game is left unchanged.
    pub fn apply(&mut self, intent: QuizIntent) -> Result<(), SessionError> {
        match intent {
            QuizIntent::Start => self.controller.start().map(|_| ()),
            QuizIntent::Answer(slot) => self.controller.submit_answer(slot).map(|_| ()),
            QuizIntent::ViewHighScores => {
                self.controller.show_high_scores();
                Ok(())
            }
            QuizIntent::GoHome => self.controller.go_home(),
        }
    }

    pub fn handle_timer(&mut self, fired: TimerFired) -> bool {
        self.controller.handle_timer(fired)
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreenVm {
        map_quiz_screen(&self.controller.snapshot(), self.intro)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use services::ManualScheduler;

    use super::*;

    fn vm() -> QuizVm<ManualScheduler> {
        QuizVm::new(
            Arc::new(QuestionBank::builtin()),
            QuizRules::default(),
            ManualScheduler::new(),
        )
    }

    fn correct_slot(vm: &QuizVm<ManualScheduler>) -> usize {
        vm.controller()
            .session()
            .current_question()
            .expect("question on screen")
            .correct_slot
    }

    #[test]
    fn idle_screen_describes_the_rules() {
        let screen = vm().screen();

        assert_eq!(screen.timer_label, None);
        assert!(screen.show_high_scores_link);
        let QuizBodyVm::Welcome { rules, .. } = screen.body else {
            panic!("expected welcome screen");
        };
        assert!(rules.contains("Answer 7 questions within 70 seconds"), "{rules}");
        assert!(rules.contains("costs 10 seconds"), "{rules}");
    }

    #[test]
    fn playing_screen_shows_four_sanitized_choices_and_timer() {
        let mut vm = vm();
        vm.apply(QuizIntent::Start).unwrap();

        let screen = vm.screen();
        assert_eq!(screen.timer_label.as_deref(), Some("Time left: 70"));
        let QuizBodyVm::Question { choices, .. } = screen.body else {
            panic!("expected question screen");
        };
        assert_eq!(choices.len(), 4);
        assert_eq!(
            choices.iter().map(|c| c.slot).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn wrong_answer_shows_penalty_then_clears() {
        let mut vm = vm();
        vm.apply(QuizIntent::Start).unwrap();
        let wrong = (correct_slot(&vm) + 1) % 4;
        vm.apply(QuizIntent::Answer(wrong)).unwrap();

        let screen = vm.screen();
        assert_eq!(
            screen.feedback.as_deref(),
            Some("Wrong answer! You lose 10 seconds!")
        );
        assert_eq!(screen.timer_label.as_deref(), Some("Time left: 60"));

        vm.controller_mut().advance(Duration::from_millis(2000));
        assert_eq!(vm.screen().feedback, None);
    }

    #[test]
    fn finishing_moves_to_results_with_pending_score() {
        let mut vm = vm();
        vm.apply(QuizIntent::Start).unwrap();
        while vm.phase() == QuizPhase::Playing {
            let slot = correct_slot(&vm);
            vm.apply(QuizIntent::Answer(slot)).unwrap();
        }

        assert_eq!(vm.pending_score(), Some(7 * 5 + 70));
        let screen = vm.screen();
        assert_eq!(screen.timer_label, None);
        assert_eq!(screen.feedback.as_deref(), Some("Correct!"));
        assert_eq!(
            screen.body,
            QuizBodyVm::Results {
                score: 105,
                score_label: "Your final score is 105.".to_string(),
            }
        );
    }

    #[test]
    fn high_scores_screen_hides_the_link() {
        let mut vm = vm();
        vm.apply(QuizIntent::ViewHighScores).unwrap();

        let screen = vm.screen();
        assert_eq!(screen.body, QuizBodyVm::HighScores);
        assert!(!screen.show_high_scores_link);

        vm.apply(QuizIntent::GoHome).unwrap();
        assert_eq!(vm.phase(), QuizPhase::Idle);
    }

    #[test]
    fn go_home_is_rejected_mid_game() {
        let mut vm = vm();
        vm.apply(QuizIntent::Start).unwrap();

        assert!(vm.apply(QuizIntent::GoHome).is_err());
        assert_eq!(vm.phase(), QuizPhase::Playing);
    }

    #[test]
    fn leaving_needs_confirmation_only_with_unsaved_progress() {
        assert!(!needs_leave_confirmation(QuizPhase::Idle));
        assert!(needs_leave_confirmation(QuizPhase::Playing));
        assert!(needs_leave_confirmation(QuizPhase::Finished));
        assert!(!needs_leave_confirmation(QuizPhase::ReviewingScores));
    }
}
