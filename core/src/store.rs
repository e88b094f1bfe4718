//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database. The rest of the core calls
//! load/save — it never executes SQL directly.
//!
//! The save file holds exactly one row: the whole record, serialized as
//! JSON. Every save replaces that row in a single statement, so a crash
//! mid-write leaves either the old record or the new one on disk, never a
//! torn one.

use crate::{error::CoreResult, state::PersistedState};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SaveStore {
    conn: Connection,
}

impl SaveStore {
    /// Open (or create) the save file at `path`.
    pub fn open(path: &str) -> CoreResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode keeps the reader side usable during a checkpoint write.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory save (used in tests).
    pub fn in_memory() -> CoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> CoreResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_save.sql"))?;
        Ok(())
    }

    /// Read the record back. Never fails upward: a missing row, unreadable
    /// JSON, or database error logs the problem and yields a fresh default.
    /// A corrupt save must not block game start.
    pub fn load(&self) -> PersistedState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                log::info!("no save found, starting fresh");
                PersistedState::default()
            }
            Err(e) => {
                log::warn!("failed to load save, starting fresh: {e}");
                PersistedState::default()
            }
        }
    }

    fn try_load(&self) -> CoreResult<Option<PersistedState>> {
        let row: Option<String> = self
            .conn
            .query_row("SELECT state_json FROM save WHERE slot = 0", [], |row| {
                row.get(0)
            })
            .optional()?;
        match row {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Write the whole record. Partial updates do not exist.
    pub fn save(&self, state: &PersistedState) -> CoreResult<()> {
        let json = serde_json::to_string(state)?;
        self.conn.execute(
            "INSERT INTO save (slot, state_json, saved_at, revision)
             VALUES (0, ?1, strftime('%s', 'now'), 1)
             ON CONFLICT(slot) DO UPDATE SET
                 state_json = excluded.state_json,
                 saved_at   = excluded.saved_at,
                 revision   = revision + 1",
            params![json],
        )?;
        Ok(())
    }

    // ── Test helper methods ───────────────────────────────────────

    /// How many saves have hit this file (0 before the first). Tests use
    /// this to assert that writes coalesce, or that a checkpoint landed.
    pub fn revision(&self) -> CoreResult<i64> {
        let revision: Option<i64> = self
            .conn
            .query_row("SELECT revision FROM save WHERE slot = 0", [], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(revision.unwrap_or(0))
    }

    /// Overwrite the stored blob with arbitrary text, bypassing
    /// serialization. Tests use this to plant a corrupt save.
    pub fn put_raw(&self, blob: &str) -> CoreResult<()> {
        self.conn.execute(
            "INSERT INTO save (slot, state_json, saved_at, revision)
             VALUES (0, ?1, strftime('%s', 'now'), 1)
             ON CONFLICT(slot) DO UPDATE SET
                 state_json = excluded.state_json,
                 saved_at   = excluded.saved_at,
                 revision   = revision + 1",
            params![blob],
        )?;
        Ok(())
    }
}
