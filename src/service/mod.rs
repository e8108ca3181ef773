//! Application-facing entry operations.
//!
//! [`EntryService`] wraps a [`Store`] and keeps two views: today's entry
//! and the full, newest-first entry list. Both views are re-read from the
//! store after every successful mutation instead of being patched in place.
//!
//! Per-item operations address items by `(date, index)`. Missing entries and
//! out-of-range indices are contract violations and are returned as errors.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::app::{JournalError, Result};
use crate::domain::{Clock, DailyEntry, EntryItem};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Reloading,
    Ready,
}

struct Views {
    today: DailyEntry,
    all: Vec<DailyEntry>,
    state: ViewState,
    last_error: Option<String>,
}

pub struct EntryService<S: Store> {
    store: Arc<S>,
    clock: Arc<dyn Clock + Send + Sync>,
    views: RwLock<Views>,
}

impl<S: Store> EntryService<S> {
    /// Build the service and perform the initial load.
    ///
    /// A failed initial load is recorded in [`last_error`](Self::last_error)
    /// but does not prevent construction; the service still ends up `Ready`.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let today = DailyEntry::placeholder(clock.today_key());
        let service = Self {
            store,
            clock,
            views: RwLock::new(Views {
                today,
                all: Vec::new(),
                state: ViewState::Loading,
                last_error: None,
            }),
        };

        if let Err(e) = service.reload(true) {
            warn!("Initial entry load failed: {}", e);
        }

        service
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn today_key(&self) -> String {
        self.clock.today_key()
    }

    pub fn today_entry(&self) -> DailyEntry {
        self.read_views().today.clone()
    }

    pub fn all_entries(&self) -> Vec<DailyEntry> {
        self.read_views().all.clone()
    }

    pub fn state(&self) -> ViewState {
        self.read_views().state
    }

    /// Message of the most recent failed operation, if any.
    pub fn last_error(&self) -> Option<String> {
        self.read_views().last_error.clone()
    }

    /// Re-read both views from the store.
    pub fn refresh(&self) -> Result<()> {
        self.reload(true)
    }

    /// Replace today's items with `texts`, creating today's entry if needed.
    ///
    /// Texts are stored positionally as given; blank texts are kept.
    pub fn save_entry<T: AsRef<str>>(&self, texts: &[T]) -> Result<DailyEntry> {
        let date = self.today_key();
        let saved = self.track(self.write_today(&date, texts))?;
        info!(date = %date, items = saved.items.len(), "Saved entry");
        self.reload(true)?;
        Ok(saved)
    }

    /// Plain lookup. Missing dates yield `None`, never a placeholder.
    pub fn get_entry_by_date(&self, date: &str) -> Result<Option<DailyEntry>> {
        self.track(self.store.get_by_date(date))
    }

    /// Attach `comment` to one item; also sets its requested flag.
    pub fn save_item_comment(&self, date: &str, index: usize, comment: &str) -> Result<()> {
        self.track(self.modify_item(date, index, |item| item.attach_comment(comment)))?;
        debug!(date = %date, index, "Saved item comment");
        self.reload(true)
    }

    pub fn mark_item_comment_requested(&self, date: &str, index: usize) -> Result<()> {
        self.track(self.modify_item(date, index, EntryItem::mark_requested))?;
        debug!(date = %date, index, "Marked item comment requested");
        self.reload(true)
    }

    /// Replace the full item list of an existing entry.
    pub fn update_entry<T: AsRef<str>>(&self, date: &str, texts: &[T]) -> Result<()> {
        let items = texts.iter().map(|t| EntryItem::new(t.as_ref())).collect();
        self.track(self.store.update(date, items))?;
        info!(date = %date, items = texts.len(), "Updated entry");
        self.reload(date == self.today_key())
    }

    /// Delete the entry for `date`. Deleting today resets the today view
    /// to an empty placeholder.
    pub fn delete_entry(&self, date: &str) -> Result<()> {
        self.track(self.store.delete(date))?;
        info!(date = %date, "Deleted entry");

        if date == self.today_key() {
            self.write_views().today = DailyEntry::placeholder(date);
        }
        self.reload(false)
    }

    fn write_today<T: AsRef<str>>(&self, date: &str, texts: &[T]) -> Result<DailyEntry> {
        let items: Vec<EntryItem> = texts.iter().map(|t| EntryItem::new(t.as_ref())).collect();

        let mut entry = match self.store.get_by_date(date)? {
            Some(mut existing) => {
                existing.items = items;
                existing
            }
            None => DailyEntry::new(date, items),
        };

        let id = self.store.save(&entry)?;
        entry.id = Some(id);

        Ok(self.store.get_by_date(date)?.unwrap_or(entry))
    }

    fn modify_item<F>(&self, date: &str, index: usize, f: F) -> Result<()>
    where
        F: FnOnce(&mut EntryItem),
    {
        let mut entry = self
            .store
            .get_by_date(date)?
            .ok_or_else(|| JournalError::NotFound {
                date: date.to_string(),
            })?;

        f(entry.item_mut(index)?);
        self.store.save(&entry)?;
        Ok(())
    }

    fn reload(&self, include_today: bool) -> Result<()> {
        {
            let mut views = self.write_views();
            if views.state == ViewState::Ready {
                views.state = ViewState::Reloading;
            }
        }

        let today = if include_today {
            let date = self.today_key();
            Some(
                self.store
                    .get_by_date(&date)
                    .map(|e| e.unwrap_or_else(|| DailyEntry::placeholder(date))),
            )
        } else {
            None
        };
        let all = self.store.get_all();

        let mut views = self.write_views();
        views.state = ViewState::Ready;

        let mut failure = None;
        match today {
            Some(Ok(entry)) => views.today = entry,
            Some(Err(e)) => failure = Some(e),
            None => {}
        }
        match all {
            Ok(entries) => views.all = entries,
            Err(e) => failure = failure.or(Some(e)),
        }

        match failure {
            Some(e) => {
                error!("Failed to reload entries: {}", e);
                views.last_error = Some(e.to_string());
                Err(e)
            }
            None => Ok(()),
        }
    }

    fn track<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result {
            match e {
                JournalError::NotFound { .. } | JournalError::IndexOutOfRange { .. } => {
                    warn!("{}", e)
                }
                _ => error!("Entry operation failed: {}", e),
            }
            self.write_views().last_error = Some(e.to_string());
        }
        result
    }

    fn read_views(&self) -> RwLockReadGuard<'_, Views> {
        self.views.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_views(&self) -> RwLockWriteGuard<'_, Views> {
        self.views.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FixedClock;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::store::SqliteStore;

    const TODAY: &str = "2024-06-15";

    /// A store that can be switched into failing every call.
    struct FlakyStore {
        inner: SqliteStore,
        failing: AtomicBool,
    }

    impl FlakyStore {
        fn new(failing: bool) -> Self {
            Self {
                inner: SqliteStore::in_memory().unwrap(),
                failing: AtomicBool::new(failing),
            }
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn check(&self) -> Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(JournalError::Persistence(rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
                    Some("disk gone".into()),
                )));
            }
            Ok(())
        }
    }

    impl Store for FlakyStore {
        fn get_by_date(&self, date: &str) -> Result<Option<DailyEntry>> {
            self.check()?;
            self.inner.get_by_date(date)
        }

        fn get_all(&self) -> Result<Vec<DailyEntry>> {
            self.check()?;
            self.inner.get_all()
        }

        fn save(&self, entry: &DailyEntry) -> Result<i64> {
            self.check()?;
            self.inner.save(entry)
        }

        fn update(&self, date: &str, items: Vec<EntryItem>) -> Result<()> {
            self.check()?;
            self.inner.update(date, items)
        }

        fn delete(&self, date: &str) -> Result<()> {
            self.check()?;
            self.inner.delete(date)
        }
    }

    fn flaky_service(failing: bool) -> (Arc<FlakyStore>, EntryService<FlakyStore>) {
        let store = Arc::new(FlakyStore::new(failing));
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
        let svc = EntryService::new(store.clone(), clock);
        (store, svc)
    }

    fn service() -> EntryService<SqliteStore> {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
        EntryService::new(store, clock)
    }

    #[test]
    fn test_initial_views_use_placeholder() {
        let svc = service();
        assert_eq!(svc.state(), ViewState::Ready);
        let today = svc.today_entry();
        assert_eq!(today.date, TODAY);
        assert!(today.items.is_empty());
        assert!(!today.is_persisted());
        assert!(svc.all_entries().is_empty());
        assert!(svc.last_error().is_none());
    }

    #[test]
    fn test_save_entry_creates_today() {
        let svc = service();
        let saved = svc.save_entry(&["coffee", "sunshine", "a call"]).unwrap();
        assert!(saved.is_persisted());
        assert_eq!(saved.date, TODAY);

        let fetched = svc.get_entry_by_date(TODAY).unwrap().unwrap();
        let contents: Vec<&str> = fetched.items.iter().map(|i| i.content.as_str()).collect();
        assert_eq!(contents, vec!["coffee", "sunshine", "a call"]);

        assert!(svc.today_entry().is_persisted());
        assert_eq!(svc.all_entries().len(), 1);
    }

    #[test]
    fn test_save_entry_keeps_blank_items() {
        let svc = service();
        svc.save_entry(&["first", "", "third"]).unwrap();
        let contents: Vec<String> = svc
            .today_entry()
            .items
            .into_iter()
            .map(|i| i.content)
            .collect();
        assert_eq!(contents, vec!["first", "", "third"]);
    }

    #[test]
    fn test_save_entry_twice_replaces_items() {
        let svc = service();
        svc.save_entry(&["a", "b", "c"]).unwrap();
        svc.save_entry(&["only"]).unwrap();

        assert_eq!(svc.all_entries().len(), 1);
        assert_eq!(svc.today_entry().items.len(), 1);
        assert_eq!(svc.today_entry().items[0].content, "only");
    }

    #[test]
    fn test_get_entry_by_date_missing_is_none() {
        let svc = service();
        assert!(svc.get_entry_by_date("2020-01-01").unwrap().is_none());
        assert!(svc.get_entry_by_date(TODAY).unwrap().is_none());
    }

    #[test]
    fn test_save_item_comment() {
        let svc = service();
        svc.save_entry(&["a", "b"]).unwrap();
        svc.save_item_comment(TODAY, 1, "Great!").unwrap();

        let entry = svc.get_entry_by_date(TODAY).unwrap().unwrap();
        assert_eq!(entry.items[1].ai_comment.as_deref(), Some("Great!"));
        assert!(entry.items[1].has_requested_comment);
        assert!(entry.items[0].ai_comment.is_none());
        assert!(!entry.items[0].has_requested_comment);

        assert_eq!(svc.today_entry().items[1].ai_comment.as_deref(), Some("Great!"));
        assert_eq!(
            svc.all_entries()[0].items[1].ai_comment.as_deref(),
            Some("Great!")
        );
    }

    #[test]
    fn test_save_item_comment_out_of_range_does_not_write() {
        let svc = service();
        svc.save_entry(&["a", "b"]).unwrap();
        let before = svc.get_entry_by_date(TODAY).unwrap();

        let result = svc.save_item_comment(TODAY, 2, "nope");
        match result {
            Err(JournalError::IndexOutOfRange { date, index, count }) => {
                assert_eq!(date, TODAY);
                assert_eq!(index, 2);
                assert_eq!(count, 2);
            }
            other => panic!("expected IndexOutOfRange, got {:?}", other),
        }

        assert_eq!(svc.get_entry_by_date(TODAY).unwrap(), before);
        assert!(svc.last_error().is_some());
    }

    #[test]
    fn test_save_item_comment_missing_entry() {
        let svc = service();
        let result = svc.save_item_comment("2024-01-01", 0, "hi");
        assert!(matches!(result, Err(JournalError::NotFound { .. })));
    }

    #[test]
    fn test_mark_item_comment_requested() {
        let svc = service();
        svc.save_entry(&["a", "b", "c"]).unwrap();
        svc.mark_item_comment_requested(TODAY, 2).unwrap();

        let entry = svc.get_entry_by_date(TODAY).unwrap().unwrap();
        assert!(entry.items[2].has_requested_comment);
        assert!(entry.items[2].ai_comment.is_none());
        assert!(!entry.items[0].has_requested_comment);
    }

    #[test]
    fn test_mark_requested_out_of_range() {
        let svc = service();
        svc.save_entry(&["a"]).unwrap();
        assert!(matches!(
            svc.mark_item_comment_requested(TODAY, 5),
            Err(JournalError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_update_entry_for_past_date() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        store
            .save(&DailyEntry::from_texts("2024-06-10", &["old"]))
            .unwrap();
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
        let svc = EntryService::new(store, clock);

        svc.update_entry("2024-06-10", &["new one", "new two"])
            .unwrap();

        let entry = svc.get_entry_by_date("2024-06-10").unwrap().unwrap();
        assert_eq!(entry.items.len(), 2);
        assert_eq!(entry.items[0].content, "new one");
        assert_eq!(svc.all_entries()[0].items.len(), 2);
        assert!(!svc.today_entry().is_persisted());
    }

    #[test]
    fn test_update_entry_for_today_refreshes_today_view() {
        let svc = service();
        svc.save_entry(&["a"]).unwrap();
        svc.update_entry(TODAY, &["edited"]).unwrap();
        assert_eq!(svc.today_entry().items[0].content, "edited");
    }

    #[test]
    fn test_update_missing_entry_fails() {
        let svc = service();
        assert!(matches!(
            svc.update_entry("2024-06-01", &["x"]),
            Err(JournalError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_today_resets_placeholder() {
        let svc = service();
        svc.save_entry(&["a", "b"]).unwrap();
        svc.delete_entry(TODAY).unwrap();

        assert!(svc.get_entry_by_date(TODAY).unwrap().is_none());
        let today = svc.today_entry();
        assert!(today.items.is_empty());
        assert!(!today.is_persisted());
        assert!(svc.all_entries().is_empty());

        // Saving again after the reset works without further steps
        svc.save_entry(&["again"]).unwrap();
        assert_eq!(svc.today_entry().items[0].content, "again");
    }

    #[test]
    fn test_refresh_picks_up_external_writes() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
        let svc = EntryService::new(store.clone(), clock);

        store
            .save(&DailyEntry::from_texts(TODAY, &["written elsewhere"]))
            .unwrap();
        assert!(svc.today_entry().items.is_empty());

        svc.refresh().unwrap();
        assert_eq!(svc.today_entry().items[0].content, "written elsewhere");
        assert_eq!(svc.all_entries().len(), 1);
    }

    #[test]
    fn test_delete_past_entry_keeps_today() {
        let svc = service();
        svc.save_entry(&["today"]).unwrap();
        svc.delete_entry("2024-06-01").unwrap();
        assert_eq!(svc.today_entry().items[0].content, "today");
        assert_eq!(svc.all_entries().len(), 1);
    }

    #[test]
    fn test_failed_initial_load_still_ready() {
        let (_, svc) = flaky_service(true);

        assert_eq!(svc.state(), ViewState::Ready);
        assert!(svc.last_error().unwrap().contains("disk gone"));
        let today = svc.today_entry();
        assert_eq!(today.date, TODAY);
        assert!(today.items.is_empty());
        assert!(svc.all_entries().is_empty());
    }

    #[test]
    fn test_failed_save_keeps_views_and_records_error() {
        let (store, svc) = flaky_service(false);
        svc.save_entry(&["a"]).unwrap();
        assert!(svc.last_error().is_none());

        store.set_failing(true);
        let result = svc.save_entry(&["b", "c"]);
        assert!(matches!(result, Err(JournalError::Persistence(_))));

        assert!(svc.last_error().unwrap().contains("disk gone"));
        assert_eq!(svc.state(), ViewState::Ready);
        let contents: Vec<String> = svc
            .today_entry()
            .items
            .into_iter()
            .map(|i| i.content)
            .collect();
        assert_eq!(contents, vec!["a"]);
        assert_eq!(svc.all_entries().len(), 1);
    }

    #[test]
    fn test_failed_refresh_recorded_then_recovers() {
        let (store, svc) = flaky_service(false);
        store.set_failing(true);
        assert!(svc.refresh().is_err());
        assert_eq!(svc.state(), ViewState::Ready);
        assert!(svc.last_error().is_some());

        store.set_failing(false);
        svc.refresh().unwrap();
        assert_eq!(svc.state(), ViewState::Ready);
    }
}
