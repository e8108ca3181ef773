use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};

use crate::app::{JournalError, Result};
use crate::domain::{DailyEntry, EntryItem};
use crate::store::Store;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;

        conn.execute("PRAGMA foreign_keys = ON", [])?;
        migrations
            .to_latest(&mut conn)
            .map_err(|e| JournalError::Migration(e.to_string()))?;

        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        tracing::debug!(version, "Entry store schema ready");

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            JournalError::Persistence(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }

    fn load_items(conn: &Connection, entry_id: i64) -> Result<Vec<EntryItem>> {
        let mut stmt = conn.prepare(
            "SELECT id, content, created_at, ai_comment, has_requested_comment
             FROM entry_items WHERE entry_id = ?1 ORDER BY position",
        )?;

        let items = stmt
            .query_map(params![entry_id], |row| {
                Ok(EntryItem {
                    id: row.get(0)?,
                    content: row.get(1)?,
                    created_at: row
                        .get::<_, String>(2)
                        .ok()
                        .and_then(|s| Self::parse_datetime(&s))
                        .unwrap_or_else(Utc::now),
                    ai_comment: row.get(3)?,
                    has_requested_comment: row.get::<_, i32>(4)? != 0,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(items)
    }
}

impl Store for SqliteStore {
    fn get_by_date(&self, date: &str) -> Result<Option<DailyEntry>> {
        let conn = self.lock()?;

        let id: Option<i64> = conn
            .query_row(
                "SELECT id FROM daily_entries WHERE date = ?1",
                params![date],
                |row| row.get(0),
            )
            .optional()?;

        match id {
            Some(id) => Ok(Some(DailyEntry {
                id: Some(id),
                date: date.to_string(),
                items: Self::load_items(&conn, id)?,
            })),
            None => Ok(None),
        }
    }

    fn get_all(&self) -> Result<Vec<DailyEntry>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare("SELECT id, date FROM daily_entries ORDER BY date DESC")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut entries = Vec::with_capacity(rows.len());
        for (id, date) in rows {
            entries.push(DailyEntry {
                id: Some(id),
                date,
                items: Self::load_items(&conn, id)?,
            });
        }

        Ok(entries)
    }

    fn save(&self, entry: &DailyEntry) -> Result<i64> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let now = Utc::now().to_rfc3339();

        let entry_id = match entry.id {
            Some(id) => {
                let changed = tx.execute(
                    "UPDATE daily_entries SET date = ?1, updated_at = ?2 WHERE id = ?3",
                    params![entry.date, now, id],
                )?;
                if changed == 0 {
                    return Err(JournalError::NotFound {
                        date: entry.date.clone(),
                    });
                }
                id
            }
            None => {
                tx.execute(
                    "INSERT INTO daily_entries (date, created_at, updated_at) VALUES (?1, ?2, ?2)
                     ON CONFLICT(date) DO UPDATE SET updated_at = excluded.updated_at",
                    params![entry.date, now],
                )?;
                tx.query_row(
                    "SELECT id FROM daily_entries WHERE date = ?1",
                    params![entry.date],
                    |row| row.get(0),
                )?
            }
        };

        tx.execute(
            "DELETE FROM entry_items WHERE entry_id = ?1",
            params![entry_id],
        )?;

        for (position, item) in entry.items.iter().enumerate() {
            tx.execute(
                "INSERT INTO entry_items (id, entry_id, position, content, created_at, ai_comment, has_requested_comment)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    item.id,
                    entry_id,
                    position as i64,
                    item.content,
                    item.created_at.to_rfc3339(),
                    item.ai_comment,
                    item.has_requested_comment as i32
                ],
            )?;
        }

        tx.commit()?;
        Ok(entry_id)
    }

    fn update(&self, date: &str, items: Vec<EntryItem>) -> Result<()> {
        let mut entry = self
            .get_by_date(date)?
            .ok_or_else(|| JournalError::NotFound {
                date: date.to_string(),
            })?;

        entry.items = items;
        self.save(&entry)?;
        Ok(())
    }

    fn delete(&self, date: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM daily_entries WHERE date = ?1", params![date])?;
        Ok(())
    }
}
