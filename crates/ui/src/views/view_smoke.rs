use services::QuizPhase;

use super::test_harness::setup_view_harness;
use crate::vm::QuizIntent;

#[tokio::test(flavor = "current_thread")]
async fn welcome_screen_renders_start_button() {
    let mut harness = setup_view_harness();
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
    assert!(html.contains("View high scores"), "missing scores link in {html}");
    assert!(!html.contains("Time left"), "timer shown before start in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn starting_shows_question_timer_and_four_choices() {
    let mut harness = setup_view_harness();
    harness.rebuild();

    harness.dispatch(QuizIntent::Start);

    let html = harness.render();
    assert!(html.contains("Time left: 70"), "missing timer in {html}");
    assert_eq!(html.matches("class=\"choice\"").count(), 4, "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn wrong_answer_shows_penalty_message() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.dispatch(QuizIntent::Start);

    let wrong = (harness.correct_slot() + 1) % 4;
    harness.dispatch(QuizIntent::Answer(wrong));

    let html = harness.render();
    assert!(
        html.contains("Wrong answer! You lose 10 seconds!"),
        "missing feedback in {html}"
    );
    assert!(html.contains("Time left: 60"), "missing penalty in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn finishing_shows_score_and_initials_form() {
    let mut harness = setup_view_harness();
    harness.rebuild();
    harness.dispatch(QuizIntent::Start);

    while harness.phase() == QuizPhase::Playing {
        let slot = harness.correct_slot();
        harness.dispatch(QuizIntent::Answer(slot));
    }

    let html = harness.render();
    assert!(html.contains("Your final score is 105."), "missing score in {html}");
    assert!(html.contains("Enter initials:"), "missing form in {html}");
    assert!(!html.contains("Time left"), "timer still shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn high_scores_screen_lists_ranking() {
    let mut harness = setup_view_harness();
    harness.high_scores.submit("BB", 50).await.expect("submit");
    harness.high_scores.submit("AAA", 80).await.expect("submit");
    harness.rebuild();

    harness.dispatch(QuizIntent::ViewHighScores);
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    let first = html.find("AAA: 80").expect("top entry rendered");
    let second = html.find("BB: 50").expect("second entry rendered");
    assert!(first < second, "ranking out of order in {html}");
    assert!(html.contains("Go back"), "missing back button in {html}");
    assert!(html.contains("Clear high scores"), "missing clear button in {html}");
    assert!(!html.contains("View high scores"), "link shown on scores page in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn empty_high_scores_render_placeholder() {
    let mut harness = setup_view_harness();
    harness.rebuild();

    harness.dispatch(QuizIntent::ViewHighScores);
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("No high scores yet."), "missing placeholder in {html}");
}
