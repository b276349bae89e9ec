use chrono::Duration;
use hub_core::model::{
    ProgressRecord, QuestionDraft, QuestionId, StudentId, Topic, TopicDraft, TopicId,
};
use hub_core::time::fixed_now;
use storage::repository::{ProgressRepository, StorageError, TopicOrder, TopicRepository};
use storage::sqlite::SqliteRepository;

fn build_topic(id: &str, minutes_after_epoch: i64) -> Topic {
    TopicDraft {
        title: format!("Topic {id}"),
        description: "desc".to_string(),
        content: "content".to_string(),
        example: "<p>hi</p>".to_string(),
        questions: vec![QuestionDraft {
            id: QuestionId::new(format!("{id}-q1")),
            prompt: "Which tag creates a table row?".to_string(),
            options: vec![
                "<td>".to_string(),
                "<tr>".to_string(),
                "<table>".to_string(),
                "<th>".to_string(),
            ],
            correct_answer: 1,
        }],
    }
    .validate(
        TopicId::new(id),
        fixed_now() + Duration::minutes(minutes_after_epoch),
    )
    .unwrap()
}

fn build_record(user: &str, topic: &str, score: Option<u8>) -> ProgressRecord {
    ProgressRecord {
        user_id: StudentId::new(user),
        topic_id: TopicId::new(topic),
        completed: true,
        score,
        completed_at: Some(fixed_now()),
    }
}

#[tokio::test]
async fn sqlite_round_trips_topic_with_questions() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_topic_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let topic = build_topic("t1", 0);
    repo.upsert_topic(&topic).await.unwrap();

    let fetched = repo.get_topic(&TopicId::new("t1")).await.unwrap().unwrap();
    assert_eq!(fetched, topic);
    assert_eq!(fetched.questions().len(), 1);
    assert_eq!(fetched.questions()[0].correct_answer(), 1);
}

#[tokio::test]
async fn sqlite_upsert_topic_preserves_created_at() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_topic_upsert?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let original = build_topic("t1", 0);
    repo.upsert_topic(&original).await.unwrap();

    // Re-save with edits and a later created_at; the stored creation time
    // must stay from the original insert.
    let edited = Topic::from_persisted(
        TopicId::new("t1"),
        "Edited title".to_string(),
        original.description().to_string(),
        original.content().to_string(),
        original.example().to_string(),
        original.questions().to_vec(),
        fixed_now() + Duration::hours(1),
    );
    repo.upsert_topic(&edited).await.unwrap();

    let fetched = repo.get_topic(&TopicId::new("t1")).await.unwrap().unwrap();
    assert_eq!(fetched.title(), "Edited title");
    assert_eq!(fetched.created_at(), original.created_at());
}

#[tokio::test]
async fn sqlite_lists_topics_in_creation_order() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_topic_order?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.upsert_topic(&build_topic("t1", 0)).await.unwrap();
    repo.upsert_topic(&build_topic("t2", 10)).await.unwrap();

    let newest_first = repo.list_topics(TopicOrder::CreatedDesc).await.unwrap();
    assert_eq!(newest_first[0].id(), &TopicId::new("t2"));
    assert_eq!(newest_first[1].id(), &TopicId::new("t1"));

    let oldest_first = repo.list_topics(TopicOrder::CreatedAsc).await.unwrap();
    assert_eq!(oldest_first[0].id(), &TopicId::new("t1"));
}

#[tokio::test]
async fn sqlite_upsert_progress_is_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress_upsert?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.upsert_topic(&build_topic("t1", 0)).await.unwrap();

    let record = build_record("u1", "t1", Some(80));
    repo.upsert_progress(&record).await.unwrap();
    repo.upsert_progress(&record).await.unwrap();

    let records = repo
        .progress_for_user(&StudentId::new("u1"))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].score, Some(80));
}

#[tokio::test]
async fn sqlite_duplicate_insert_reports_conflict() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress_conflict?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.upsert_topic(&build_topic("t1", 0)).await.unwrap();

    let record = build_record("u1", "t1", Some(50));
    repo.insert_progress(&record).await.unwrap();
    let err = repo.insert_progress(&record).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict));
}

#[tokio::test]
async fn sqlite_progress_round_trips_null_score() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress_null?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.upsert_topic(&build_topic("t1", 0)).await.unwrap();

    let record = ProgressRecord {
        user_id: StudentId::new("u1"),
        topic_id: TopicId::new("t1"),
        completed: true,
        score: None,
        completed_at: None,
    };
    repo.upsert_progress(&record).await.unwrap();

    let fetched = repo
        .find_progress(&StudentId::new("u1"), &TopicId::new("t1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched, record);
}

#[tokio::test]
async fn sqlite_deleting_topic_cascades_progress() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_cascade?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.upsert_topic(&build_topic("t1", 0)).await.unwrap();
    repo.upsert_topic(&build_topic("t2", 5)).await.unwrap();
    repo.insert_progress(&build_record("u1", "t1", Some(90)))
        .await
        .unwrap();
    repo.insert_progress(&build_record("u1", "t2", None))
        .await
        .unwrap();

    repo.delete_topic(&TopicId::new("t1")).await.unwrap();

    let records = repo
        .progress_for_user(&StudentId::new("u1"))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].topic_id, TopicId::new("t2"));
}

#[tokio::test]
async fn sqlite_delete_missing_topic_reports_not_found() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_delete_missing?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let err = repo.delete_topic(&TopicId::new("ghost")).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}
