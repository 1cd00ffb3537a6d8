use std::sync::Arc;
use std::time::Duration;

use quiz_core::{QuestionBank, QuizRules};
use rand::Rng;
use rand::rngs::StdRng;

use super::session::{AnswerOutcome, Feedback, QuizPhase, QuizResult, QuizSession, Step, TickOutcome};
use super::timer::{ManualScheduler, Scheduler, TaskHandle, TimerFired, TimerKind};
use crate::error::SessionError;

/// Everything a presentation layer needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    pub time_remaining: i64,
    pub question: Option<String>,
    /// Answer texts in display order; empty when no question is shown.
    pub choices: Vec<String>,
    pub feedback: Option<String>,
    pub result: Option<QuizResult>,
    pub questions_left: usize,
}

struct VisibleFeedback {
    feedback: Feedback,
    expiry: TaskHandle,
}

/// Owns a quiz session together with its timers.
///
/// Holds at most one countdown task and at most one feedback-expiry task.
/// Fired timers are passed back through [`QuizController::handle_timer`]; a
/// fired value whose task is no longer the active one is dropped.
pub struct QuizController<S, R = StdRng> {
    session: QuizSession<R>,
    scheduler: S,
    tick: Option<TaskHandle>,
    feedback: Option<VisibleFeedback>,
}

impl<S: Scheduler> QuizController<S, StdRng> {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, rules: QuizRules, scheduler: S) -> Self {
        Self::with_session(QuizSession::new(bank, rules), scheduler)
    }
}

impl<S: Scheduler, R: Rng> QuizController<S, R> {
    #[must_use]
    pub fn with_session(session: QuizSession<R>, scheduler: S) -> Self {
        Self {
            session,
            scheduler,
            tick: None,
            feedback: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession<R> {
        &self.session
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.session.phase()
    }

    /// Feedback currently on screen, if it has not expired.
    #[must_use]
    pub fn visible_feedback(&self) -> Option<Feedback> {
        self.feedback.as_ref().map(|visible| visible.feedback)
    }

    /// Whether the countdown task is armed.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.tick.is_some()
    }

    /// Start a game and arm the countdown.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from the session.
    pub fn start(&mut self) -> Result<Step, SessionError> {
        let step = self.session.start()?;
        self.stop_ticking();
        self.clear_feedback();
        if self.session.phase() == QuizPhase::Playing {
            let period = self.session.rules().tick_period;
            self.tick = Some(self.scheduler.schedule_repeating(period, TimerKind::Tick));
        }
        Ok(step)
    }

    /// Answer the current question and show feedback for it, replacing any
    /// feedback still on screen.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from the session.
    pub fn submit_answer(&mut self, slot: usize) -> Result<AnswerOutcome, SessionError> {
        let outcome = self.session.submit_answer(slot)?;

        self.clear_feedback();
        let display = self.session.rules().feedback_display;
        let expiry = self
            .scheduler
            .schedule_once(display, TimerKind::FeedbackExpired);
        self.feedback = Some(VisibleFeedback {
            feedback: outcome.feedback,
            expiry,
        });

        if matches!(outcome.step, Step::Finished(_)) {
            self.stop_ticking();
        }
        Ok(outcome)
    }

    /// End the game immediately.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotPlaying` outside of a game.
    pub fn end(&mut self) -> Result<QuizResult, SessionError> {
        let result = self.session.end()?;
        self.stop_ticking();
        Ok(result)
    }

    /// Go to the high-score list, abandoning any game in progress.
    pub fn show_high_scores(&mut self) {
        self.stop_ticking();
        self.session.show_high_scores();
    }

    /// Back to the welcome screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` during a game.
    pub fn go_home(&mut self) -> Result<(), SessionError> {
        self.session.go_home()?;
        self.clear_feedback();
        Ok(())
    }

    /// Apply a fired timer. Returns `false` if it was stale and ignored.
    pub fn handle_timer(&mut self, fired: TimerFired) -> bool {
        match fired.kind {
            TimerKind::Tick => {
                if !is_active(self.tick.as_ref(), &fired) {
                    return false;
                }
                match self.session.tick() {
                    TickOutcome::Running { .. } => {}
                    TickOutcome::Finished(_) | TickOutcome::Ignored => self.stop_ticking(),
                }
                true
            }
            TimerKind::FeedbackExpired => {
                let active = self.feedback.as_ref().map(|visible| &visible.expiry);
                if !is_active(active, &fired) {
                    return false;
                }
                self.feedback = None;
                true
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        let current = self.session.current_question();
        QuizSnapshot {
            phase: self.session.phase(),
            time_remaining: self.session.time_remaining(),
            question: current.map(|q| q.question.clone()),
            choices: current.map(|q| q.choices.to_vec()).unwrap_or_default(),
            feedback: self.visible_feedback().map(|f| f.message()),
            result: self.session.result(),
            questions_left: self.session.unpicked_questions().len(),
        }
    }

    fn stop_ticking(&mut self) {
        if let Some(tick) = self.tick.take() {
            tick.cancel();
        }
    }

    fn clear_feedback(&mut self) {
        if let Some(visible) = self.feedback.take() {
            visible.expiry.cancel();
        }
    }
}

impl<R: Rng> QuizController<ManualScheduler, R> {
    /// Advance virtual time, dispatching every timer that falls due on the way.
    ///
    /// Timers armed while dispatching are honoured if they fall due in the
    /// same window. Returns how many timers were applied.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.scheduler.now() + by;
        let mut applied = 0;
        while let Some(fired) = self.scheduler.next_due(until) {
            if self.handle_timer(fired) {
                applied += 1;
            }
        }
        self.scheduler.settle(until);
        applied
    }
}

fn is_active(handle: Option<&TaskHandle>, fired: &TimerFired) -> bool {
    handle.is_some_and(|handle| handle.id() == fired.task && !handle.is_cancelled())
}
