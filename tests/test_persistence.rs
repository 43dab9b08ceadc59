use newtab::application::command::BookmarkCommand;
use newtab::application::error::ApplicationError;
use newtab::application::services::bookmark_service::BookmarkService;
use newtab::application::BookmarkServiceImpl;
use newtab::domain::bookmark::BookmarkId;
use newtab::domain::repositories::repository::{BookmarkStore, SeedPolicy};
use newtab::domain::repositories::storage::KeyValueStorage;
use newtab::domain::services::notification::Severity;
use newtab::infrastructure::confirmation::AutoConfirm;
use newtab::infrastructure::repositories::json_bookmark_store::{JsonBookmarkStore, STORAGE_KEY};
use newtab::infrastructure::storage::file_storage::FileStorage;
use newtab::util::testing::{init_test_env, RecordingNotifier, RecordingObserver};
use rstest::*;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

struct Session {
    service: BookmarkServiceImpl<JsonBookmarkStore>,
    notifier: Arc<RecordingNotifier>,
}

fn open_session(dir: &TempDir, seed: SeedPolicy, quota: Option<usize>) -> Session {
    let _ = init_test_env();
    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(dir.path(), quota));
    let store = Arc::new(JsonBookmarkStore::new(storage, seed, "🔖"));
    let notifier = Arc::new(RecordingNotifier::default());
    let service = BookmarkServiceImpl::new(store, Arc::new(AutoConfirm(true)), notifier.clone(), "🔖");
    Session { service, notifier }
}

fn ids(service: &impl BookmarkService) -> Vec<BookmarkId> {
    service.bookmarks().iter().map(|b| b.id).collect()
}

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[rstest]
fn given_mutations_when_reopened_then_same_list(dir: TempDir) {
    let mut first = open_session(&dir, SeedPolicy::Defaults, None);
    first.service.add_bookmark("Docs", "docs.rs", Some("📚")).unwrap();
    first.service.reorder_bookmarks(3, 1).unwrap();
    first.service.remove_bookmark(2).unwrap();
    let before = first.service.bookmarks().to_vec();

    let second = open_session(&dir, SeedPolicy::Defaults, None);

    assert_eq!(second.service.bookmarks(), before.as_slice());
    assert_eq!(ids(&second.service)[..2], [3, 1]);
    assert_eq!(
        second.service.bookmarks().iter().map(|b| b.order).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[rstest]
fn given_no_blob_when_loaded_with_empty_policy_then_empty_and_nothing_written(dir: TempDir) {
    let session = open_session(&dir, SeedPolicy::Empty, None);
    assert!(session.service.bookmarks().is_empty());
    assert!(!dir.path().join(format!("{}.json", STORAGE_KEY)).exists());
}

#[rstest]
fn given_minimal_legacy_blob_when_loaded_then_order_and_ids_normalized(dir: TempDir) {
    fs::write(
        dir.path().join(format!("{}.json", STORAGE_KEY)),
        r#"[
            {"id": 5, "name": "B", "url": "https://b.example", "icon": "🅱"},
            {"id": 5, "name": "C", "url": "https://c.example", "icon": ""},
            {"name": "A", "url": "https://a.example", "icon": "🅰"}
        ]"#,
    )
    .unwrap();

    let session = open_session(&dir, SeedPolicy::Defaults, None);
    let bookmarks = session.service.bookmarks();

    assert_eq!(
        bookmarks.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
        vec!["B", "C", "A"]
    );
    assert_eq!(bookmarks[1].icon, "🔖");
    let mut unique = ids(&session.service);
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 3);
}

#[rstest]
fn given_legacy_blob_without_ids_when_reopened_then_ids_stable_and_addressable(dir: TempDir) {
    fs::write(
        dir.path().join(format!("{}.json", STORAGE_KEY)),
        r#"[
            {"name": "A", "url": "https://a.example", "icon": "🅰"},
            {"id": 5, "name": "B", "url": "https://b.example", "icon": "🅱"},
            {"id": 5, "name": "C", "url": "https://c.example", "icon": "©"}
        ]"#,
    )
    .unwrap();

    let first = ids(&open_session(&dir, SeedPolicy::Empty, None).service);
    let mut second = open_session(&dir, SeedPolicy::Empty, None);

    assert_eq!(ids(&second.service), first);
    let removed = second.service.remove_bookmark(first[0]).unwrap();
    assert_eq!(removed.map(|b| b.name), Some("A".to_string()));
}

#[rstest]
fn given_max_id_in_blob_when_loaded_then_no_overflow_and_unique_ids(dir: TempDir) {
    fs::write(
        dir.path().join(format!("{}.json", STORAGE_KEY)),
        format!(
            r#"[{{"id": {}, "name": "A", "url": "https://a.example"}}, {{"name": "B", "url": "https://b.example"}}]"#,
            i64::MAX
        ),
    )
    .unwrap();

    let mut session = open_session(&dir, SeedPolicy::Empty, None);
    let added = session.service.add_bookmark("C", "c.example", None).unwrap();

    let mut unique = ids(&session.service);
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 3);
    assert_ne!(added.id, i64::MAX);
}

#[rstest]
fn given_corrupt_blob_when_loaded_then_error_notified_and_blob_kept(dir: TempDir) {
    let path = dir.path().join(format!("{}.json", STORAGE_KEY));
    fs::write(&path, "{not json").unwrap();

    let session = open_session(&dir, SeedPolicy::Defaults, None);

    assert!(session.service.bookmarks().is_empty());
    assert_eq!(session.notifier.count(Severity::Error), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
}

#[rstest]
fn given_tiny_quota_when_add_then_storage_unavailable_but_kept_in_memory(dir: TempDir) {
    let mut session = open_session(&dir, SeedPolicy::Empty, Some(16));

    let err = session
        .service
        .execute(BookmarkCommand::Add(newtab::application::command::BookmarkDraft::new(
            "GitHub",
            "github.com",
            None,
        )))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::StorageUnavailable(_)));
    assert_eq!(session.service.bookmarks().len(), 1);
    assert!(!session.service.is_durable());
    assert_eq!(session.notifier.last().map(|n| n.severity), Some(Severity::Error));
}

#[rstest]
fn given_store_when_save_then_load_round_trips(dir: TempDir) {
    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(dir.path(), None));
    let store = JsonBookmarkStore::new(storage, SeedPolicy::Empty, "🔖");
    let list = SeedPolicy::Defaults.bookmarks();

    store.save(&list).unwrap();

    assert_eq!(store.load().unwrap(), list);
}

#[rstest]
fn given_observer_when_mutations_then_rerendered_each_time(dir: TempDir) {
    let mut session = open_session(&dir, SeedPolicy::Defaults, None);
    let observer = Arc::new(RecordingObserver::default());
    session.service.subscribe(observer.clone());

    session.service.reorder_bookmarks(1, 3).unwrap();
    session.service.reorder_bookmarks(2, 2).unwrap();
    session.service.update_bookmark(2, "Hub", "github.com", None).unwrap();

    assert_eq!(observer.renders(), 2);
    assert_eq!(
        observer.last_list().iter().map(|b| b.id).collect::<Vec<_>>(),
        vec![2, 3, 1]
    );
    assert_eq!(session.service.revision(), 2);
}
