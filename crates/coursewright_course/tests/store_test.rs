//! Tests for the in-memory course store and its JSON snapshots.

use coursewright_core::{Chapter, Course, Question, Unit, User};
use coursewright_course::InMemoryCourseStore;
use coursewright_error::{CourseErrorKind, StorageErrorKind};
use coursewright_interface::CourseStore;
use uuid::Uuid;

async fn seeded() -> (InMemoryCourseStore, Uuid, Uuid) {
    let store = InMemoryCourseStore::new();
    let course = Course::new("Rust", "https://img");
    let course_id = store.create_course(course).await.expect("course stored");
    let unit = Unit::new(course_id, "Basics");
    let unit_id = store.create_unit(unit).await.expect("unit stored");
    (store, course_id, unit_id)
}

fn chapter(unit_id: Uuid, name: &str) -> Chapter {
    Chapter::builder()
        .unit_id(unit_id)
        .name(name)
        .youtube_search_query(format!("{} explained", name))
        .build()
        .expect("valid chapter")
}

#[tokio::test]
async fn test_outline_keeps_creation_order() {
    let (store, course_id, unit_id) = seeded().await;
    store
        .create_chapters(vec![chapter(unit_id, "Ownership"), chapter(unit_id, "Borrowing")])
        .await
        .expect("chapters stored");

    let outline = store.get_course(course_id).await.expect("course found");
    let names: Vec<_> = outline.chapters().map(|c| c.name().as_str()).collect();
    assert_eq!(names, vec!["Ownership", "Borrowing"]);
}

#[tokio::test]
async fn test_orphans_rejected() {
    let (store, _, _) = seeded().await;
    let err = store
        .create_chapters(vec![chapter(Uuid::new_v4(), "Lost")])
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), CourseErrorKind::Storage(_)));

    let err = store.create_unit(Unit::new(Uuid::new_v4(), "Lost")).await.unwrap_err();
    assert!(err.to_string().contains("course not found"));
}

#[tokio::test]
async fn test_missing_chapter() {
    let store = InMemoryCourseStore::new();
    let err = store.get_chapter(Uuid::new_v4()).await.unwrap_err();
    match err.kind() {
        CourseErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::NotFound { entity: "chapter", .. }))
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_credits_decrement() {
    let store = InMemoryCourseStore::new();
    let user_id = store.insert_user(User::new("ada", 2)).await;
    assert_eq!(store.decrement_credits(user_id).await.expect("user found"), 1);
    assert_eq!(*store.get_user(user_id).await.expect("user found").credits(), 1);
    assert_eq!(
        store.find_user_by_name("ada").await.map(|u| *u.id()),
        Some(user_id)
    );
}

#[tokio::test]
async fn test_snapshot_round_trip() {
    let (store, course_id, unit_id) = seeded().await;
    let ownership = chapter(unit_id, "Ownership");
    let chapter_id = *ownership.id();
    store.create_chapters(vec![ownership]).await.expect("stored");
    store
        .create_questions(vec![Question::new(
            chapter_id,
            "What moves?",
            "Values",
            vec!["Values".into(), "Types".into(), "Traits".into(), "Crates".into()],
        )])
        .await
        .expect("stored");

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("store.json");
    store.save_to(&path).await.expect("saved");

    let loaded = InMemoryCourseStore::load_from(&path).await.expect("loaded");
    assert_eq!(
        loaded.get_course(course_id).await.expect("course"),
        store.get_course(course_id).await.expect("course")
    );
    assert_eq!(loaded.chapter_questions(chapter_id).await.expect("questions").len(), 1);
}

#[tokio::test]
async fn test_open_missing_file_starts_empty() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = InMemoryCourseStore::open(dir.path().join("absent.json"))
        .await
        .expect("opens");
    assert!(store.course_ids().await.is_empty());
}

#[tokio::test]
async fn test_corrupt_snapshot() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.json");
    tokio::fs::write(&path, "not json").await.expect("written");
    let err = InMemoryCourseStore::load_from(&path).await.unwrap_err();
    assert!(err.to_string().contains("Snapshot format error"));
}
