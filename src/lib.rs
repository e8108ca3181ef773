//! # goodthings
//!
//! A local-first "three good things" journal.
//!
//! ## Architecture
//!
//! ```text
//! CLI → EntryService → Store (SQLite)
//!            ↑
//!   CommentOrchestrator → CommentProvider (HTTP proxy)
//! ```
//!
//! Each day holds up to three items. After a save, the orchestrator asks the
//! comment proxy for a short comment on every non-blank item, one at a time,
//! and writes each comment back through the service. Statistics (streak,
//! weekly and monthly counts) are derived from the full entry list.
//!
//! ## Quick Start
//!
//! ```bash
//! # Record today's good things
//! goodthings add "Morning run" "Lunch with Sam" "Finished the chapter"
//!
//! # Show history and stats
//! goodthings list --from 2024-06-01
//! goodthings stats
//!
//! # Retry a comment for item 2
//! goodthings comment 2024-06-15 2
//! ```

/// Application context and error types.
///
/// The [`AppContext`](app::AppContext) struct wires together the store,
/// service, comment provider and orchestrator.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// AI comment provider and connectivity signal.
///
/// - [`CommentProvider`](comment::CommentProvider): Async trait for comment sources
/// - [`HttpCommentProvider`](comment::HttpCommentProvider): reqwest-based proxy client
/// - [`OnlineFlag`](comment::OnlineFlag): Settable [`NetworkStatus`](comment::NetworkStatus)
pub mod comment;

/// Configuration loaded from `~/.config/goodthings/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`DailyEntry`](domain::DailyEntry): One day, keyed by `YYYY-MM-DD`
/// - [`EntryItem`](domain::EntryItem): One good thing with its optional comment
/// - [`Clock`](domain::Clock): Source of the local "today"
pub mod domain;

/// Sequential post-save comment acquisition.
pub mod orchestrator;

/// Entry operations and the cached today/all views.
pub mod service;

/// Streak and entry counts.
pub mod stats;

/// SQLite persistence layer.
///
/// - [`Store`](store::Store): Trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;
