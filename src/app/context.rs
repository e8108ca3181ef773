use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::Result;
use crate::comment::{CommentProvider, HttpCommentProvider, OnlineFlag};
use crate::config::Config;
use crate::domain::{Clock, SystemClock};
use crate::orchestrator::CommentOrchestrator;
use crate::service::EntryService;
use crate::store::sqlite::SqliteStore;

pub struct AppContext {
    pub service: Arc<EntryService<SqliteStore>>,
    pub orchestrator: CommentOrchestrator<SqliteStore>,
    pub network: Arc<OnlineFlag>,
    pub auto_comment: bool,
}

impl AppContext {
    pub fn new(config: &Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => config.database_path()?,
        };
        tracing::debug!("Opening journal at {}", db_path.display());

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let http = HttpCommentProvider::new(&config.comments.endpoint, config.comments.timeout())?;
        tracing::debug!("Comment provider at {}", http.url());
        let provider: Arc<dyn CommentProvider + Send + Sync> = Arc::new(http);

        Ok(Self::from_parts(
            store,
            provider,
            Arc::new(SystemClock),
            config.comments.auto_comment,
        ))
    }

    pub fn in_memory(
        provider: Arc<dyn CommentProvider + Send + Sync>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Ok(Self::from_parts(store, provider, clock, true))
    }

    fn from_parts(
        store: Arc<SqliteStore>,
        provider: Arc<dyn CommentProvider + Send + Sync>,
        clock: Arc<dyn Clock + Send + Sync>,
        auto_comment: bool,
    ) -> Self {
        let service = Arc::new(EntryService::new(store, clock));
        let network = Arc::new(OnlineFlag::default());
        let orchestrator = CommentOrchestrator::new(service.clone(), provider, network.clone());

        Self {
            service,
            orchestrator,
            network,
            auto_comment,
        }
    }
}
