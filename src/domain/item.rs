use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Soft limit on item text. Enforced at the input boundary, not by the store.
pub const MAX_ITEM_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryItem {
    #[serde(skip)]
    pub(crate) id: Option<i64>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub ai_comment: Option<String>,
    pub has_requested_comment: bool,
}

impl EntryItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            created_at: Utc::now(),
            ai_comment: None,
            has_requested_comment: false,
        }
    }

    /// Store a fetched comment. The requested flag is always set with it.
    pub fn attach_comment(&mut self, comment: impl Into<String>) {
        self.ai_comment = Some(comment.into());
        self.has_requested_comment = true;
    }

    pub fn mark_requested(&mut self) {
        self.has_requested_comment = true;
    }
}
