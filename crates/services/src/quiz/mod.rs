mod controller;
mod session;
mod timer;

pub use controller::{QuizController, QuizSnapshot};
pub use session::{
    ANSWER_SLOTS, AnswerOutcome, Feedback, PresentedQuestion, QuizPhase, QuizResult, QuizSession,
    Step, TickOutcome,
};
pub use timer::{ManualScheduler, Scheduler, TaskHandle, TaskId, TimerFired, TimerKind};
