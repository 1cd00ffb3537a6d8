use std::sync::Arc;
use std::time::Duration;

use quiz_core::{QuestionBank, QuizRules};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{
    HighScoreService, ManualScheduler, QuizController, QuizPhase, QuizSession, Step,
};
use storage::Storage;

fn controller(seed: u64) -> QuizController<ManualScheduler, StdRng> {
    let bank = Arc::new(QuestionBank::builtin());
    let session = QuizSession::with_rng(bank, QuizRules::default(), StdRng::seed_from_u64(seed));
    QuizController::with_session(session, ManualScheduler::new())
}

#[tokio::test]
async fn perfect_game_is_scored_and_ranked() {
    let storage = Storage::in_memory();
    let high_scores = HighScoreService::new(Arc::clone(&storage.kv));
    let mut quiz = controller(11);

    let total = QuestionBank::builtin().count();
    let mut step = quiz.start().unwrap();
    assert_eq!(quiz.session().time_remaining(), 70);

    let mut answered = 0;
    while let Step::Question(question) = step {
        quiz.advance(Duration::from_secs(1));
        step = quiz.submit_answer(question.correct_slot).unwrap().step;
        answered += 1;
    }
    assert_eq!(answered, total);

    let Step::Finished(result) = step else {
        unreachable!();
    };
    assert_eq!(quiz.phase(), QuizPhase::Finished);
    assert_eq!(result.correct_answers, 7);
    assert_eq!(result.time_remaining, 63);
    assert_eq!(result.score, 5 * 7 + 63);

    high_scores.submit("AAA", result.score).await.unwrap();
    high_scores.submit("BBB", 10).await.unwrap();
    quiz.show_high_scores();

    let ranking = high_scores.list().await.unwrap();
    assert_eq!(ranking[0].initials(), "AAA");
    assert_eq!(ranking[0].score(), 98);
    assert_eq!(ranking[1].score(), 10);

    quiz.go_home().unwrap();
    assert_eq!(quiz.phase(), QuizPhase::Idle);
}

#[tokio::test]
async fn idle_player_runs_out_of_time() {
    let mut quiz = controller(5);
    quiz.start().unwrap();

    quiz.advance(Duration::from_secs(69));
    assert_eq!(quiz.phase(), QuizPhase::Playing);
    quiz.advance(Duration::from_secs(1));

    let snapshot = quiz.snapshot();
    assert_eq!(snapshot.phase, QuizPhase::Finished);
    assert_eq!(snapshot.result.map(|r| r.score), Some(0));
    assert!(snapshot.question.is_none());
}

#[test]
fn every_answer_wrong_drains_the_clock() {
    let mut quiz = controller(9);
    let mut step = quiz.start().unwrap();

    let mut wrong_answers = 0;
    while let Step::Question(question) = step {
        let wrong = (question.correct_slot + 1) % 4;
        step = quiz.submit_answer(wrong).unwrap().step;
        wrong_answers += 1;
        if quiz.session().time_remaining() <= 0 {
            break;
        }
    }

    // Seven questions, seventy seconds, ten seconds lost per miss.
    assert_eq!(wrong_answers, 7);
    assert_eq!(quiz.session().time_remaining(), 0);
    assert_eq!(quiz.phase(), QuizPhase::Finished);
    assert_eq!(quiz.snapshot().result.map(|r| r.score), Some(0));
}
