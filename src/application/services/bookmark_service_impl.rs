// src/application/services/bookmark_service_impl.rs
use std::fmt;
use std::sync::Arc;

use crate::application::command::{BookmarkDraft, ImportReport};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::bookmark_service::BookmarkService;
use crate::domain::bookmark::{Bookmark, BookmarkFields, BookmarkId};
use crate::domain::bookmark_list::BookmarkList;
use crate::domain::repositories::repository::BookmarkStore;
use crate::domain::services::confirmation::Confirmation;
use crate::domain::services::notification::{Notification, Notifier};
use crate::domain::services::observer::ListObserver;
use chrono::Utc;
use tracing::{debug, instrument, warn};

pub struct BookmarkServiceImpl<S: BookmarkStore> {
    store: Arc<S>,
    list: BookmarkList,
    confirmation: Arc<dyn Confirmation>,
    notifier: Arc<dyn Notifier>,
    observers: Vec<Arc<dyn ListObserver>>,
    default_icon: String,
    durable: bool,
    revision: u64,
}

impl<S: BookmarkStore> fmt::Debug for BookmarkServiceImpl<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookmarkServiceImpl")
            .field("store", &self.store)
            .field("bookmarks", &self.list.len())
            .field("observers", &self.observers.len())
            .field("durable", &self.durable)
            .field("revision", &self.revision)
            .finish()
    }
}

impl<S: BookmarkStore> BookmarkServiceImpl<S> {
    /// Load the persisted list and take ownership of it.
    ///
    /// An unreadable blob is reported and replaced by an empty in-memory
    /// list; storage keeps the old blob until the next successful save.
    pub fn new(
        store: Arc<S>,
        confirmation: Arc<dyn Confirmation>,
        notifier: Arc<dyn Notifier>,
        default_icon: &str,
    ) -> Self {
        let list = match store.load() {
            Ok(bookmarks) => BookmarkList::new(bookmarks),
            Err(e) => {
                warn!("Failed to load bookmarks: {}", e);
                notifier.notify(Notification::error(format!(
                    "Could not load bookmarks: {}",
                    e
                )));
                BookmarkList::default()
            }
        };
        debug!(count = list.len(), "bookmarks loaded");

        Self {
            store,
            list,
            confirmation,
            notifier,
            observers: Vec::new(),
            default_icon: default_icon.to_string(),
            durable: true,
            revision: 0,
        }
    }

    fn parse_fields(&self, name: &str, url: &str, icon: Option<&str>) -> ApplicationResult<BookmarkFields> {
        Ok(BookmarkFields::parse(name, url, icon, &self.default_icon)?)
    }

    fn ensure_unique_name(&self, name: &str, except: Option<BookmarkId>) -> ApplicationResult<()> {
        if self.list.name_taken(name, except) {
            return Err(ApplicationError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Persist the whole list and re-render.
    ///
    /// A failed write keeps the in-memory change and marks the list as not durable.
    fn commit(&mut self) -> ApplicationResult<()> {
        self.revision += 1;
        let saved = self.store.save(self.list.as_slice());
        for observer in &self.observers {
            observer.list_changed(self.list.as_slice());
        }

        match saved {
            Ok(()) => {
                self.durable = true;
                Ok(())
            }
            Err(e) => {
                warn!("Bookmark change kept in memory only: {}", e);
                self.durable = false;
                Err(e.into())
            }
        }
    }

    /// Report the outcome of an operation to the user.
    fn surface<T>(&self, result: ApplicationResult<T>, success: Option<String>) -> ApplicationResult<T> {
        match &result {
            Ok(_) => {
                if let Some(message) = success {
                    self.notifier.notify(Notification::success(message));
                }
            }
            Err(ApplicationError::StorageUnavailable(msg)) => {
                self.notifier.notify(Notification::error(format!(
                    "Change kept for this session only, storage unavailable: {}",
                    msg
                )));
            }
            Err(e) => self.notifier.notify(Notification::error(e.to_string())),
        }
        result
    }

    fn add_inner(&mut self, name: &str, url: &str, icon: Option<&str>) -> ApplicationResult<Bookmark> {
        let fields = self.parse_fields(name, url, icon)?;
        self.ensure_unique_name(&fields.name, None)?;

        let now = Utc::now();
        let id = self.list.next_id(now.timestamp_millis());
        self.list.push(Bookmark::new(id, fields, now));
        let added = self
            .list
            .get(id)
            .cloned()
            .ok_or(ApplicationError::BookmarkNotFound(id))?;

        self.commit()?;
        Ok(added)
    }

    fn remove_inner(&mut self, id: BookmarkId) -> ApplicationResult<Option<Bookmark>> {
        let name = self
            .list
            .get(id)
            .map(|b| b.name.clone())
            .ok_or(ApplicationError::BookmarkNotFound(id))?;

        if !self
            .confirmation
            .confirm(&format!("Delete bookmark '{}'?", name))
        {
            debug!(id, "delete declined");
            self.notifier.notify(Notification::info("Delete cancelled"));
            return Ok(None);
        }

        let removed = self
            .list
            .remove(id)
            .ok_or(ApplicationError::BookmarkNotFound(id))?;
        self.commit()?;
        Ok(Some(removed))
    }

    fn update_inner(
        &mut self,
        id: BookmarkId,
        name: &str,
        url: &str,
        icon: Option<&str>,
    ) -> ApplicationResult<Bookmark> {
        if self.list.get(id).is_none() {
            return Err(ApplicationError::BookmarkNotFound(id));
        }
        let fields = self.parse_fields(name, url, icon)?;
        self.ensure_unique_name(&fields.name, Some(id))?;

        let bookmark = self
            .list
            .get_mut(id)
            .ok_or(ApplicationError::BookmarkNotFound(id))?;
        bookmark.update(fields, Utc::now());
        let updated = bookmark.clone();

        self.commit()?;
        Ok(updated)
    }
}

impl<S: BookmarkStore> BookmarkService for BookmarkServiceImpl<S> {
    fn bookmarks(&self) -> &[Bookmark] {
        self.list.as_slice()
    }

    fn get_bookmark(&self, id: BookmarkId) -> Option<&Bookmark> {
        self.list.get(id)
    }

    #[instrument(skip(self), level = "debug")]
    fn add_bookmark(&mut self, name: &str, url: &str, icon: Option<&str>) -> ApplicationResult<Bookmark> {
        let result = self.add_inner(name, url, icon);
        let message = result
            .as_ref()
            .ok()
            .map(|b| format!("Added '{}'", b.name));
        self.surface(result, message)
    }

    #[instrument(skip(self), level = "debug")]
    fn remove_bookmark(&mut self, id: BookmarkId) -> ApplicationResult<Option<Bookmark>> {
        let result = self.remove_inner(id);
        let message = match &result {
            Ok(Some(b)) => Some(format!("Deleted '{}'", b.name)),
            _ => None,
        };
        self.surface(result, message)
    }

    #[instrument(skip(self), level = "debug")]
    fn update_bookmark(
        &mut self,
        id: BookmarkId,
        name: &str,
        url: &str,
        icon: Option<&str>,
    ) -> ApplicationResult<Bookmark> {
        let result = self.update_inner(id, name, url, icon);
        let message = result
            .as_ref()
            .ok()
            .map(|b| format!("Updated '{}'", b.name));
        self.surface(result, message)
    }

    #[instrument(skip(self), level = "debug")]
    fn reorder_bookmarks(&mut self, source: BookmarkId, target: BookmarkId) -> ApplicationResult<bool> {
        if !self.list.move_to(source, target) {
            debug!("reorder is a no-op");
            return Ok(false);
        }
        let result = self.commit().map(|()| true);
        self.surface(result, None)
    }

    #[instrument(skip(self, drafts), level = "debug", fields(count = drafts.len()))]
    fn import_bookmarks(&mut self, drafts: Vec<BookmarkDraft>) -> ApplicationResult<ImportReport> {
        let mut report = ImportReport::default();
        let now = Utc::now();

        for draft in drafts {
            let fields = match self.parse_fields(&draft.name, &draft.url, draft.icon.as_deref()) {
                Ok(fields) => fields,
                Err(e) => {
                    debug!("skipping '{}': {}", draft.name, e);
                    report.skipped.push(draft.name);
                    continue;
                }
            };
            if self.list.name_taken(&fields.name, None) {
                debug!("skipping duplicate '{}'", fields.name);
                report.skipped.push(fields.name);
                continue;
            }
            let id = self.list.next_id(now.timestamp_millis());
            self.list.push(Bookmark::new(id, fields, now));
            report.added += 1;
        }

        let result = if report.added > 0 {
            self.commit().map(|()| report)
        } else {
            Ok(report)
        };
        let message = result.as_ref().ok().map(|r| {
            format!(
                "Imported {} bookmark(s), skipped {}",
                r.added,
                r.skipped.len()
            )
        });
        self.surface(result, message)
    }

    fn is_durable(&self) -> bool {
        self.durable
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn subscribe(&mut self, observer: Arc<dyn ListObserver>) {
        self.observers.push(observer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::command::{BookmarkCommand, CommandOutcome};
    use crate::domain::repositories::repository::SeedPolicy;
    use crate::domain::services::notification::Severity;
    use crate::infrastructure::confirmation::AutoConfirm;
    use crate::infrastructure::repositories::json_bookmark_store::JsonBookmarkStore;
    use crate::infrastructure::storage::memory_storage::MemoryStorage;
    use crate::util::testing::{init_test_env, RecordingNotifier, RecordingObserver};
    use rstest::*;

    struct Fixture {
        service: BookmarkServiceImpl<JsonBookmarkStore>,
        storage: Arc<MemoryStorage>,
        notifier: Arc<RecordingNotifier>,
        observer: Arc<RecordingObserver>,
    }

    fn fixture(seed: SeedPolicy, confirm: bool) -> Fixture {
        let _ = init_test_env();
        let storage = Arc::new(MemoryStorage::new());
        let store = Arc::new(JsonBookmarkStore::new(storage.clone(), seed, "🔖"));
        let notifier = Arc::new(RecordingNotifier::default());
        let observer = Arc::new(RecordingObserver::default());
        let mut service =
            BookmarkServiceImpl::new(store, Arc::new(AutoConfirm(confirm)), notifier.clone(), "🔖");
        service.subscribe(observer.clone());
        Fixture {
            service,
            storage,
            notifier,
            observer,
        }
    }

    #[test]
    fn given_empty_list_when_add_then_single_normalized_record() {
        let mut f = fixture(SeedPolicy::Empty, true);

        let added = f.service.add_bookmark("GitHub", "github.com", None).unwrap();

        assert_eq!(f.service.bookmarks().len(), 1);
        assert_eq!(added.url, "https://github.com");
        assert_eq!(added.icon, "🔖");
        assert_eq!(added.order, 0);
        assert!(added.date_added.is_some());
        assert_eq!(f.storage.write_count(), 1);
        assert_eq!(f.observer.renders(), 1);
        assert_eq!(f.notifier.last().unwrap().severity, Severity::Success);
    }

    #[test]
    fn given_seeded_list_when_add_then_new_record_is_last() {
        let mut f = fixture(SeedPolicy::Defaults, true);
        let before = f.service.bookmarks().len();

        let added = f.service.add_bookmark("Docs", "docs.rs", Some("📚")).unwrap();

        let list = f.service.bookmarks();
        assert_eq!(list.len(), before + 1);
        assert_eq!(list.last().unwrap().id, added.id);
        assert_eq!(added.order, before);
    }

    #[test]
    fn given_blank_fields_when_add_then_validation_error_and_list_unchanged() {
        let mut f = fixture(SeedPolicy::Defaults, true);
        let before = f.service.bookmarks().to_vec();

        assert!(matches!(
            f.service.add_bookmark("  ", "github.com", None),
            Err(ApplicationError::Validation(_))
        ));
        assert!(matches!(
            f.service.add_bookmark("GitHub2", "", None),
            Err(ApplicationError::Validation(_))
        ));

        assert_eq!(f.service.bookmarks(), before.as_slice());
        assert_eq!(f.storage.write_count(), 0);
        assert_eq!(f.notifier.count(Severity::Error), 2);
    }

    #[test]
    fn given_existing_name_in_other_case_when_add_then_duplicate_name() {
        let mut f = fixture(SeedPolicy::Defaults, true);
        let result = f.service.add_bookmark("github", "gitlab.com", None);
        assert!(matches!(result, Err(ApplicationError::DuplicateName(_))));
        assert_eq!(f.service.bookmarks().len(), 3);
    }

    #[test]
    fn given_confirmation_when_remove_then_record_gone_and_order_closed() {
        let mut f = fixture(SeedPolicy::Defaults, true);

        let removed = f.service.remove_bookmark(2).unwrap().unwrap();

        assert_eq!(removed.name, "GitHub");
        assert!(f.service.get_bookmark(2).is_none());
        let orders: Vec<_> = f.service.bookmarks().iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 1]);
        assert_eq!(f.storage.write_count(), 1);
    }

    #[test]
    fn given_declined_confirmation_when_remove_then_list_unchanged() {
        let mut f = fixture(SeedPolicy::Defaults, false);

        let outcome = f.service.execute(BookmarkCommand::Remove { id: 2 }).unwrap();

        assert_eq!(outcome, CommandOutcome::Cancelled);
        assert_eq!(f.service.bookmarks().len(), 3);
        assert_eq!(f.storage.write_count(), 0);
        assert_eq!(f.notifier.last().unwrap().severity, Severity::Info);
    }

    #[test]
    fn given_absent_id_when_remove_then_not_found() {
        let mut f = fixture(SeedPolicy::Defaults, true);
        assert!(matches!(
            f.service.remove_bookmark(99),
            Err(ApplicationError::BookmarkNotFound(99))
        ));
        assert_eq!(f.service.bookmarks().len(), 3);
    }

    #[test]
    fn given_own_name_in_other_case_when_update_then_allowed() {
        let mut f = fixture(SeedPolicy::Defaults, true);

        let updated = f
            .service
            .update_bookmark(2, "GITHUB", "github.com/sysid", Some("🐱"))
            .unwrap();

        assert_eq!(updated.name, "GITHUB");
        assert_eq!(updated.url, "https://github.com/sysid");
        assert!(updated.date_modified.is_some());
        assert_eq!(f.service.bookmarks()[1], updated);
    }

    #[test]
    fn given_other_name_when_update_then_duplicate_name() {
        let mut f = fixture(SeedPolicy::Defaults, true);
        assert!(matches!(
            f.service.update_bookmark(2, "google", "github.com", None),
            Err(ApplicationError::DuplicateName(_))
        ));
        assert_eq!(f.service.get_bookmark(2).unwrap().name, "GitHub");
    }

    #[rstest]
    #[case("", "github.com")]
    #[case("   ", "github.com")]
    #[case("GitHub", "")]
    #[case("GitHub", "  ")]
    fn given_blank_field_when_update_then_validation_error_and_nothing_written(
        #[case] name: &str,
        #[case] url: &str,
    ) {
        let mut f = fixture(SeedPolicy::Defaults, true);
        let before = f.service.bookmarks().to_vec();

        assert!(matches!(
            f.service.update_bookmark(2, name, url, Some("🐙")),
            Err(ApplicationError::Validation(_))
        ));

        assert_eq!(f.service.bookmarks(), before.as_slice());
        assert_eq!(f.storage.write_count(), 0);
        assert_eq!(f.observer.renders(), 0);
        assert_eq!(f.notifier.last().unwrap().severity, Severity::Error);
    }

    #[test]
    fn given_absent_id_when_update_then_not_found() {
        let mut f = fixture(SeedPolicy::Defaults, true);
        assert!(matches!(
            f.service.update_bookmark(42, "X", "x.org", None),
            Err(ApplicationError::BookmarkNotFound(42))
        ));
    }

    #[test]
    fn given_first_and_last_when_reorder_then_first_moves_to_end() {
        let mut f = fixture(SeedPolicy::Defaults, true);

        assert!(f.service.reorder_bookmarks(1, 3).unwrap());

        let ids: Vec<_> = f.service.bookmarks().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(f.storage.write_count(), 1);
        assert_eq!(f.observer.renders(), 1);
    }

    #[test]
    fn given_same_or_missing_ids_when_reorder_then_noop_without_write() {
        let mut f = fixture(SeedPolicy::Defaults, true);

        assert!(!f.service.reorder_bookmarks(1, 1).unwrap());
        assert!(!f.service.reorder_bookmarks(1, 99).unwrap());
        assert!(!f.service.reorder_bookmarks(99, 1).unwrap());

        assert_eq!(f.storage.write_count(), 0);
        assert_eq!(f.service.revision(), 0);
        assert_eq!(f.observer.renders(), 0);
    }

    #[test]
    fn given_failing_storage_when_add_then_kept_in_memory_and_not_durable() {
        let mut f = fixture(SeedPolicy::Empty, true);
        f.storage.set_fail_writes(true);

        let result = f.service.add_bookmark("GitHub", "github.com", None);

        assert!(matches!(result, Err(ApplicationError::StorageUnavailable(_))));
        assert_eq!(f.service.bookmarks().len(), 1);
        assert!(!f.service.is_durable());
        assert_eq!(f.notifier.last().unwrap().severity, Severity::Error);

        f.storage.set_fail_writes(false);
        f.service.add_bookmark("Docs", "docs.rs", None).unwrap();
        assert!(f.service.is_durable());
    }

    #[test]
    fn given_drafts_when_import_then_duplicates_and_invalid_skipped() {
        let mut f = fixture(SeedPolicy::Defaults, true);

        let report = f
            .service
            .import_bookmarks(vec![
                BookmarkDraft::new("Docs", "docs.rs", None),
                BookmarkDraft::new("google", "google.de", None),
                BookmarkDraft::new("", "nameless.org", None),
                BookmarkDraft::new("docs", "docs.rs", None),
            ])
            .unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(f.service.bookmarks().len(), 4);
        assert_eq!(f.storage.write_count(), 1);
    }

    #[test]
    fn given_rapid_adds_when_add_then_ids_unique() {
        let mut f = fixture(SeedPolicy::Empty, true);
        for i in 0..20 {
            f.service
                .add_bookmark(&format!("site{}", i), &format!("site{}.org", i), None)
                .unwrap();
        }
        let mut ids: Vec<_> = f.service.bookmarks().iter().map(|b| b.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
