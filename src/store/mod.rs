pub mod sqlite;

use crate::app::Result;
use crate::domain::{DailyEntry, EntryItem};

pub use sqlite::SqliteStore;

/// Durable date-keyed storage of daily entries.
///
/// Every mutation goes through `save`, which writes the whole entry.
pub trait Store {
    fn get_by_date(&self, date: &str) -> Result<Option<DailyEntry>>;
    /// All entries, newest date first.
    fn get_all(&self) -> Result<Vec<DailyEntry>>;
    /// Insert (no row handle) or overwrite (row handle present). Returns the row handle.
    fn save(&self, entry: &DailyEntry) -> Result<i64>;
    /// Replace the items of an existing entry.
    fn update(&self, date: &str, items: Vec<EntryItem>) -> Result<()>;
    /// Remove the entry for `date`. Missing dates are not an error.
    fn delete(&self, date: &str) -> Result<()>;
}
