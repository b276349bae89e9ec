use std::sync::Arc;

use hub_core::grading::AnswerSheet;
use hub_core::identity::StudentIdentity;
use hub_core::model::{QuestionDraft, QuestionId, Topic, TopicDraft, TopicId};
use hub_core::time::{Clock, fixed_now};
use services::{DashboardService, ExamService, ProgressService, TopicStatus};
use storage::repository::{InMemoryRepository, TopicRepository};

fn question(id: &str, correct: usize) -> QuestionDraft {
    QuestionDraft {
        id: QuestionId::new(id),
        prompt: format!("Question {id}"),
        options: vec![
            "A".to_string(),
            "B".to_string(),
            "C".to_string(),
            "D".to_string(),
        ],
        correct_answer: correct,
    }
}

fn build_topic() -> Topic {
    TopicDraft {
        title: "HTML Basics".to_string(),
        description: "Fundamental tags and structure".to_string(),
        content: "HTML describes the structure of a web page.".to_string(),
        example: "<h1>Hello World!</h1>".to_string(),
        questions: vec![question("q1", 1), question("q2", 0)],
    }
    .validate(TopicId::new("t1"), fixed_now())
    .unwrap()
}

struct Harness {
    exams: ExamService,
    dashboard: DashboardService,
    student: StudentIdentity,
    topic: Topic,
}

async fn harness() -> Harness {
    let repo = InMemoryRepository::new();
    let topic = build_topic();
    repo.upsert_topic(&topic).await.unwrap();

    let progress = ProgressService::new(Clock::fixed(fixed_now()), Arc::new(repo.clone()));
    let exams = ExamService::new(progress);
    let dashboard = DashboardService::new(Arc::new(repo.clone()), Arc::new(repo));

    Harness {
        exams,
        dashboard,
        student: StudentIdentity::from_name("Alice"),
        topic,
    }
}

#[tokio::test]
async fn failed_attempt_still_completes_the_topic() {
    let h = harness().await;

    // One right, one wrong.
    let mut answers = AnswerSheet::new();
    answers.select(QuestionId::new("q1"), 1);
    answers.select(QuestionId::new("q2"), 2);

    let outcome = h
        .exams
        .submit_exam(&h.student, &h.topic, &answers)
        .await
        .unwrap();

    assert_eq!(outcome.grade.score_percent, 50);
    assert!(!outcome.grade.passed);
    assert!(outcome.record.completed);
    assert_eq!(outcome.record.score, Some(50));

    let overview = h.dashboard.overview(&h.student).await.unwrap();
    assert_eq!(overview.summary.completed_count, 1);
    assert_eq!(overview.summary.percentage, 100.0);
    assert_eq!(overview.summary.exams_passed_count, 0);
    assert_eq!(overview.topics[0].status, TopicStatus::Completed);
}

#[tokio::test]
async fn retake_overwrites_the_failed_score() {
    let h = harness().await;

    let mut first = AnswerSheet::new();
    first.select(QuestionId::new("q1"), 1);
    first.select(QuestionId::new("q2"), 2);
    h.exams
        .submit_exam(&h.student, &h.topic, &first)
        .await
        .unwrap();

    let mut retake = AnswerSheet::new();
    retake.select(QuestionId::new("q1"), 1);
    retake.select(QuestionId::new("q2"), 0);
    let outcome = h
        .exams
        .submit_exam(&h.student, &h.topic, &retake)
        .await
        .unwrap();

    assert_eq!(outcome.grade.score_percent, 100);
    assert!(outcome.grade.passed);

    let overview = h.dashboard.overview(&h.student).await.unwrap();
    assert_eq!(overview.summary.exams_passed_count, 1);
    assert_eq!(overview.topics[0].status, TopicStatus::ExamPassed);
    assert_eq!(overview.topics[0].score, Some(100));
}

#[tokio::test]
async fn marking_complete_then_passing_keeps_one_record() {
    let h = harness().await;

    h.exams
        .mark_complete(&h.student, h.topic.id())
        .await
        .unwrap();

    let mut answers = AnswerSheet::new();
    answers.select(QuestionId::new("q1"), 1);
    answers.select(QuestionId::new("q2"), 0);
    h.exams
        .submit_exam(&h.student, &h.topic, &answers)
        .await
        .unwrap();

    let overview = h.dashboard.overview(&h.student).await.unwrap();
    assert_eq!(overview.summary.completed_count, 1);
    assert_eq!(overview.summary.exams_passed_count, 1);
}

#[tokio::test]
async fn passing_then_marking_complete_keeps_the_score() {
    let h = harness().await;

    let mut answers = AnswerSheet::new();
    answers.select(QuestionId::new("q1"), 1);
    answers.select(QuestionId::new("q2"), 0);
    h.exams
        .submit_exam(&h.student, &h.topic, &answers)
        .await
        .unwrap();

    // Re-reading the content and marking it complete must not erase the
    // exam result.
    h.exams
        .mark_complete(&h.student, h.topic.id())
        .await
        .unwrap();

    let overview = h.dashboard.overview(&h.student).await.unwrap();
    assert_eq!(overview.topics[0].status, TopicStatus::ExamPassed);
    assert_eq!(overview.topics[0].score, Some(100));
}

#[tokio::test]
async fn progress_keys_derived_from_the_same_name_share_records() {
    let h = harness().await;

    let mut answers = AnswerSheet::new();
    answers.select(QuestionId::new("q1"), 1);
    answers.select(QuestionId::new("q2"), 0);
    h.exams
        .submit_exam(&h.student, &h.topic, &answers)
        .await
        .unwrap();

    // A fresh session under the same name resolves the same key and sees
    // the stored progress.
    let returning = StudentIdentity::from_name("Alice");
    let overview = h.dashboard.overview(&returning).await.unwrap();
    assert_eq!(overview.summary.completed_count, 1);
}
