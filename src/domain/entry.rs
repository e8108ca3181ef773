use serde::{Deserialize, Serialize};

use crate::app::{JournalError, Result};
use crate::domain::EntryItem;

/// Number of items a day holds in practice. Enforced at the input boundary.
pub const MAX_ITEMS_PER_DAY: usize = 3;

/// One journal day, keyed by its `YYYY-MM-DD` date.
///
/// The storage row handle is kept crate-private; everything outside the
/// store addresses entries by `date` and items by their position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    #[serde(skip)]
    pub(crate) id: Option<i64>,
    pub date: String,
    pub items: Vec<EntryItem>,
}

impl DailyEntry {
    pub fn new(date: impl Into<String>, items: Vec<EntryItem>) -> Self {
        Self {
            id: None,
            date: date.into(),
            items,
        }
    }

    /// Unsaved, empty entry shown for a day nothing was recorded yet.
    pub fn placeholder(date: impl Into<String>) -> Self {
        Self::new(date, Vec::new())
    }

    pub fn from_texts<T: AsRef<str>>(date: impl Into<String>, texts: &[T]) -> Self {
        Self::new(date, texts.iter().map(|t| EntryItem::new(t.as_ref())).collect())
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn item(&self, index: usize) -> Result<&EntryItem> {
        let count = self.items.len();
        self.items
            .get(index)
            .ok_or_else(|| JournalError::IndexOutOfRange {
                date: self.date.clone(),
                index,
                count,
            })
    }

    pub fn item_mut(&mut self, index: usize) -> Result<&mut EntryItem> {
        let count = self.items.len();
        let date = &self.date;
        match self.items.get_mut(index) {
            Some(item) => Ok(item),
            None => Err(JournalError::IndexOutOfRange {
                date: date.clone(),
                index,
                count,
            }),
        }
    }

    pub fn commented_count(&self) -> usize {
        self.items.iter().filter(|i| i.ai_comment.is_some()).count()
    }
}
