mod high_score_vm;
mod markup;
mod quiz_vm;

pub use high_score_vm::{HighScoreRowVm, map_high_score_rows, submit_high_score};
pub use markup::sanitize_markup;
pub use quiz_vm::{
    ChoiceVm, QuizBodyVm, QuizIntent, QuizIntro, QuizScreenVm, QuizVm, map_quiz_screen,
    needs_leave_confirmation,
};
