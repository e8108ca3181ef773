pub mod http_provider;

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::app::Result;

pub use http_provider::HttpCommentProvider;

/// Source of short AI-written comments on a single journal item.
#[async_trait]
pub trait CommentProvider {
    async fn comment_for_item(&self, text: &str) -> Result<String>;
}

/// Connectivity signal consulted before any comment request.
pub trait NetworkStatus {
    fn is_online(&self) -> bool;
}

/// Settable connectivity flag.
#[derive(Debug)]
pub struct OnlineFlag {
    online: AtomicBool,
}

impl OnlineFlag {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl Default for OnlineFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NetworkStatus for OnlineFlag {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_online_flag_toggles() {
        let flag = OnlineFlag::default();
        assert!(flag.is_online());
        flag.set_online(false);
        assert!(!flag.is_online());
        flag.set_online(true);
        assert!(flag.is_online());
    }
}
