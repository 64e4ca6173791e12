use quiz_core::model::{AttemptRecord, QuestionBank};
use quiz_core::time::fixed_now;
use services::HISTORY_KEY;
use std::collections::BTreeMap;
use storage::repository::{KeyValueStore, Storage};

use super::test_harness::{ViewKind, sample_bank, setup_view_harness, setup_view_harness_with};
use crate::vm::QuizIntent;

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz, 3);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Computer Networks"), "missing subject in {html}");
    assert!(html.contains("Question 1 of 3"), "missing progress in {html}");
    assert!(html.contains("class=\"option\""), "missing options in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
    assert!(!html.contains("Submit"), "submit shown too early in {html}");
    assert!(!html.contains("Your previous answer"), "unexpected answer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_highlights_chosen_option() {
    let mut harness = setup_view_harness(ViewKind::Quiz, 3);
    harness.rebuild();

    harness.dispatch(QuizIntent::Choose("a".into()));
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("option selected"), "missing selection in {html}");
    assert!(
        html.contains("Your previous answer: a"),
        "missing previous answer in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_blocks_incomplete_submission() {
    let mut harness = setup_view_harness(ViewKind::Quiz, 3);
    harness.rebuild();

    harness.dispatch(QuizIntent::Next);
    harness.dispatch(QuizIntent::Next);
    harness.dispatch(QuizIntent::Choose("a".into()));
    harness.drive_async().await;
    assert!(harness.render().contains("Submit"));

    harness.submit();
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("Please answer every question before submitting."),
        "missing blocking message in {html}"
    );
    assert!(!html.contains("Score:"), "graded too early in {html}");
    assert!(harness.history.list().await.records.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_submits_and_resets() {
    let mut harness = setup_view_harness(ViewKind::Quiz, 3);
    harness.rebuild();

    for step in 0..3 {
        if step > 0 {
            harness.dispatch(QuizIntent::Next);
        }
        harness.dispatch(QuizIntent::Choose("a".into()));
    }
    harness.submit();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Score: "), "missing score in {html}");
    assert!(html.contains("/3 ("), "missing total in {html}");
    assert!(html.contains("Rationale:"), "missing rationale in {html}");
    assert!(html.contains("Reset"), "missing reset in {html}");

    let stored = harness.history.list().await;
    assert_eq!(stored.records.len(), 1);
    assert_eq!(stored.records[0].subject_name, "Computer Networks");
    assert_eq!(stored.records[0].total_count, 3);

    harness.dispatch(QuizIntent::Reset);
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "reset did not restart in {html}");
    assert!(!html.contains("Score:"), "results still shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_empty_bank() {
    let mut harness = setup_view_harness_with(
        ViewKind::Quiz,
        QuestionBank::default(),
        3,
        Storage::in_memory(),
    );
    harness.rebuild();
    let html = harness.render();

    assert!(
        html.contains("There are no questions to ask."),
        "missing empty bank message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_lists_attempts() {
    let mut harness = setup_view_harness(ViewKind::History, 3);
    let record = AttemptRecord {
        timestamp: fixed_now(),
        subject_name: "Computer Networks".into(),
        exam_label: "June 2023".into(),
        question_ids: Vec::new(),
        answers: BTreeMap::new(),
        correct_count: 2,
        total_count: 3,
        score_percent: 67,
    };
    let appended = harness.history.append(&record).await;
    assert!(appended.is_clean());

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("2/3 (67%)"), "missing score in {html}");
    assert!(html.contains("2023-11-14 22:13 UTC"), "missing date in {html}");
    assert!(html.contains("June 2023"), "missing exam in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_warns_on_unreadable_history() {
    let storage = Storage::in_memory();
    storage
        .kv
        .set(HISTORY_KEY, "{not json")
        .await
        .expect("seed corrupt history");
    let mut harness = setup_view_harness_with(ViewKind::History, sample_bank(), 3, storage);

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("class=\"warning\""), "missing warning in {html}");
    assert!(html.contains("No attempts yet."), "missing empty list in {html}");
}
