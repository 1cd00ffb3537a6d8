use std::collections::VecDeque;
use std::sync::Arc;

use quiz_core::model::MIN_DISTRACTORS;
use quiz_core::{QuestionBank, QuizRules, shuffle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SessionError;

/// Number of answer choices shown for every question.
pub const ANSWER_SLOTS: usize = MIN_DISTRACTORS + 1;

//
// ─── STATES & OUTCOMES ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Welcome screen.
    Idle,
    Playing,
    /// Results screen, score not yet submitted.
    Finished,
    ReviewingScores,
}

/// The question currently on screen with its answers in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedQuestion {
    pub question_index: usize,
    pub question: String,
    pub choices: [String; ANSWER_SLOTS],
    pub correct_slot: usize,
}

/// Feedback for the previous answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { penalty_secs: u32 },
}

impl Feedback {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Feedback::Correct => "Correct!".to_string(),
            Feedback::Incorrect { penalty_secs } => {
                format!("Wrong answer! You lose {penalty_secs} seconds!")
            }
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct)
    }
}

/// Final tally of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub correct_answers: u32,
    pub time_remaining: i64,
    pub score: u32,
}

/// Where the game went after moving past a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Question(PresentedQuestion),
    Finished(QuizResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub feedback: Feedback,
    pub step: Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { time_remaining: i64 },
    Finished(QuizResult),
    /// The tick arrived outside of a game and was dropped.
    Ignored,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through of the quiz.
///
/// Pure state machine: it never schedules anything itself. Whoever owns it
/// (normally `QuizController`) calls [`QuizSession::tick`] once per second
/// while the phase is `Playing`.
pub struct QuizSession<R = StdRng> {
    bank: Arc<QuestionBank>,
    rules: QuizRules,
    rng: R,
    phase: QuizPhase,
    time_remaining: i64,
    unpicked: VecDeque<usize>,
    correct_answers: u32,
    current: Option<PresentedQuestion>,
    result: Option<QuizResult>,
}

impl QuizSession<StdRng> {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, rules: QuizRules) -> Self {
        Self::with_rng(bank, rules, StdRng::from_os_rng())
    }
}

impl<R: Rng> QuizSession<R> {
    #[must_use]
    pub fn with_rng(bank: Arc<QuestionBank>, rules: QuizRules, rng: R) -> Self {
        Self {
            bank,
            rules,
            rng,
            phase: QuizPhase::Idle,
            time_remaining: 0,
            unpicked: VecDeque::new(),
            correct_answers: 0,
            current: None,
            result: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn rules(&self) -> &QuizRules {
        &self.rules
    }

    #[must_use]
    pub fn time_remaining(&self) -> i64 {
        self.time_remaining
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    /// Bank indices still waiting to be asked, in the order they will be asked.
    #[must_use]
    pub fn unpicked_questions(&self) -> &VecDeque<usize> {
        &self.unpicked
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&PresentedQuestion> {
        self.current.as_ref()
    }

    /// Result of the last finished game, until the session returns to `Idle`.
    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.result
    }

    /// Begin a game: reset the clock and counters, shuffle the question order
    /// and present the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is `Idle`.
    pub fn start(&mut self) -> Result<Step, SessionError> {
        if self.phase != QuizPhase::Idle {
            return Err(SessionError::InvalidTransition {
                action: "start a game",
                phase: self.phase,
            });
        }

        let mut order: Vec<usize> = (0..self.bank.count()).collect();
        shuffle(&mut order, &mut self.rng);

        self.time_remaining = self.rules.starting_time(self.bank.count());
        self.unpicked = order.into();
        self.correct_answers = 0;
        self.current = None;
        self.result = None;
        self.phase = QuizPhase::Playing;
        tracing::debug!(
            questions = self.unpicked.len(),
            time = self.time_remaining,
            "quiz started"
        );

        self.next_question()
    }

    /// One second of the countdown. The game ends once the clock reaches zero,
    /// whether or not questions remain.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != QuizPhase::Playing {
            return TickOutcome::Ignored;
        }

        self.time_remaining -= 1;
        if self.time_remaining <= 0 {
            return TickOutcome::Finished(self.finish());
        }
        TickOutcome::Running {
            time_remaining: self.time_remaining,
        }
    }

    /// Present the next question in the shuffled order, or finish if none are left.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotPlaying` outside of a game.
    pub fn next_question(&mut self) -> Result<Step, SessionError> {
        if self.phase != QuizPhase::Playing {
            return Err(SessionError::NotPlaying);
        }

        while let Some(question_index) = self.unpicked.pop_front() {
            if let Some(presented) = self.present(question_index) {
                self.current = Some(presented.clone());
                return Ok(Step::Question(presented));
            }
        }
        Ok(Step::Finished(self.finish()))
    }

    /// Check an answer, update score or clock, and move to the next question.
    ///
    /// An incorrect answer may push the clock below zero; the next tick ends
    /// the game and scoring clamps the remainder.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotPlaying` outside of a game and
    /// `SessionError::InvalidSlot` for a slot that is not displayed.
    pub fn submit_answer(&mut self, slot: usize) -> Result<AnswerOutcome, SessionError> {
        if self.phase != QuizPhase::Playing {
            return Err(SessionError::NotPlaying);
        }
        if slot >= ANSWER_SLOTS {
            return Err(SessionError::InvalidSlot { slot });
        }
        let Some(current) = self.current.as_ref() else {
            return Err(SessionError::NotPlaying);
        };

        let feedback = if slot == current.correct_slot {
            self.correct_answers += 1;
            Feedback::Correct
        } else {
            let penalty_secs = self.rules.incorrect_penalty_secs;
            self.time_remaining -= i64::from(penalty_secs);
            Feedback::Incorrect { penalty_secs }
        };
        tracing::debug!(
            slot,
            correct = feedback.is_correct(),
            time = self.time_remaining,
            "answer submitted"
        );

        let step = self.next_question()?;
        Ok(AnswerOutcome { feedback, step })
    }

    /// End the game now and compute the score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotPlaying` outside of a game.
    pub fn end(&mut self) -> Result<QuizResult, SessionError> {
        if self.phase != QuizPhase::Playing {
            return Err(SessionError::NotPlaying);
        }
        Ok(self.finish())
    }

    /// Jump to the high-score list from any screen. A game in progress is
    /// abandoned without a score.
    pub fn show_high_scores(&mut self) {
        if self.phase == QuizPhase::Playing {
            tracing::debug!(time = self.time_remaining, "quiz abandoned");
            self.unpicked.clear();
            self.current = None;
        }
        self.phase = QuizPhase::ReviewingScores;
    }

    /// Return to the welcome screen, discarding the previous result.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` while a game is in progress.
    pub fn go_home(&mut self) -> Result<(), SessionError> {
        if self.phase == QuizPhase::Playing {
            return Err(SessionError::InvalidTransition {
                action: "return to the welcome screen",
                phase: self.phase,
            });
        }
        self.phase = QuizPhase::Idle;
        self.current = None;
        self.result = None;
        Ok(())
    }

    fn finish(&mut self) -> QuizResult {
        let result = QuizResult {
            correct_answers: self.correct_answers,
            time_remaining: self.time_remaining,
            score: self
                .rules
                .score(self.correct_answers, self.time_remaining),
        };
        self.phase = QuizPhase::Finished;
        self.current = None;
        self.result = Some(result);
        tracing::info!(
            score = result.score,
            correct = result.correct_answers,
            time = result.time_remaining,
            "quiz finished"
        );
        result
    }

    /// Pick three distractors (a shuffled index list cut to three), then
    /// insert the answer at a uniformly random slot.
    fn present(&mut self, question_index: usize) -> Option<PresentedQuestion> {
        let question = self.bank.get(question_index)?;

        let mut distractor_order: Vec<usize> = (0..question.distractors().len()).collect();
        shuffle(&mut distractor_order, &mut self.rng);
        distractor_order.truncate(MIN_DISTRACTORS);

        let correct_slot = self.rng.random_range(0..ANSWER_SLOTS);
        let mut distractors = distractor_order
            .into_iter()
            .map(|i| question.distractors()[i].clone());
        let choices: [String; ANSWER_SLOTS] = std::array::from_fn(|slot| {
            if slot == correct_slot {
                question.answer().to_owned()
            } else {
                distractors.next().unwrap_or_default()
            }
        });

        Some(PresentedQuestion {
            question_index,
            question: question.question().to_owned(),
            choices,
            correct_slot,
        })
    }
}
