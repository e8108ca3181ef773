//! Post-save comment acquisition.
//!
//! After a day is saved, [`CommentOrchestrator::run_pass`] walks the
//! non-blank items one at a time, asks the provider for a comment and
//! writes it back through the [`EntryService`]. A failing item is logged
//! and skipped; it keeps no comment and no requested flag, so it can be
//! requested again later with [`CommentOrchestrator::request_item_comment`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::{JournalError, Result};
use crate::comment::{CommentProvider, NetworkStatus};
use crate::service::EntryService;
use crate::store::Store;

pub struct CommentOrchestrator<S: Store> {
    service: Arc<EntryService<S>>,
    provider: Arc<dyn CommentProvider + Send + Sync>,
    network: Arc<dyn NetworkStatus + Send + Sync>,
}

impl<S: Store> CommentOrchestrator<S> {
    pub fn new(
        service: Arc<EntryService<S>>,
        provider: Arc<dyn CommentProvider + Send + Sync>,
        network: Arc<dyn NetworkStatus + Send + Sync>,
    ) -> Self {
        Self {
            service,
            provider,
            network,
        }
    }

    /// Fetch and store a comment for each non-blank text of `date`.
    ///
    /// Indices are dense over the non-blank texts: `["a", "", "c"]` yields
    /// requests for index 0 (`"a"`) and index 1 (`"c"`). Connectivity is
    /// checked once, before the first request. Returns one
    /// `(index, outcome)` pair per attempted item, in order.
    pub async fn run_pass<T: AsRef<str>>(
        &self,
        date: &str,
        texts: &[T],
    ) -> Vec<(usize, Result<String>)> {
        if !self.network.is_online() {
            debug!("Offline, skipping comment pass for {}", date);
            return Vec::new();
        }

        let filled: Vec<&str> = texts
            .iter()
            .map(|t| t.as_ref())
            .filter(|t| !t.trim().is_empty())
            .collect();

        let mut results = Vec::with_capacity(filled.len());
        for (index, text) in filled.into_iter().enumerate() {
            let outcome = self.comment_and_store(date, index, text).await;
            if let Err(ref e) = outcome {
                warn!(date = %date, index, "Item {} comment fetch failed: {}", index, e);
            }
            results.push((index, outcome));
        }

        let saved = results.iter().filter(|(_, r)| r.is_ok()).count();
        info!(
            "Comment pass for {}: {} of {} items commented",
            date,
            saved,
            results.len()
        );

        results
    }

    /// Request a comment for one existing item on demand.
    ///
    /// Unlike [`run_pass`](Self::run_pass), failures are returned to the caller.
    pub async fn request_item_comment(&self, date: &str, index: usize) -> Result<String> {
        if !self.network.is_online() {
            return Err(JournalError::Offline);
        }

        let entry = self
            .service
            .get_entry_by_date(date)?
            .ok_or_else(|| JournalError::NotFound {
                date: date.to_string(),
            })?;
        let text = entry.item(index)?.content.clone();

        self.comment_and_store(date, index, &text).await
    }

    async fn comment_and_store(&self, date: &str, index: usize, text: &str) -> Result<String> {
        let comment = self.provider.comment_for_item(text).await?;
        self.service.save_item_comment(date, index, &comment)?;
        self.service.mark_item_comment_requested(date, index)?;
        Ok(comment)
    }
}
