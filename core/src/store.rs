//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! The engine never sees the store; the session owns both.

use crate::{
    error::SimResult,
    event::EventLogEntry,
    types::Tick,
};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

pub struct PetStore {
    conn: Connection,
}

impl PetStore {
    /// Open (or create) the save database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        // Memory databases answer "memory" here rather than failing.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Session ────────────────────────────────────────────────

    pub fn insert_session(
        &self,
        session_id: &str,
        slot: &str,
        seed: u64,
        version: &str,
    ) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO session (session_id, slot, seed, version, started_at)
             VALUES (?1, ?2, ?3, ?4, datetime('now'))",
            params![session_id, slot, seed as i64, version],
        )?;
        Ok(())
    }

    // ── Save slots ─────────────────────────────────────────────

    pub fn save_snapshot(&self, slot: &str, state_json: &str) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO save_slot (slot, state_json, saved_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(slot) DO UPDATE SET
                 state_json = excluded.state_json,
                 saved_at   = excluded.saved_at",
            params![slot, state_json],
        )?;
        Ok(())
    }

    pub fn load_snapshot(&self, slot: &str) -> SimResult<Option<String>> {
        let json = self
            .conn
            .query_row(
                "SELECT state_json FROM save_slot WHERE slot = ?1",
                params![slot],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(json)
    }

    pub fn delete_snapshot(&self, slot: &str) -> SimResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM save_slot WHERE slot = ?1", params![slot])?;
        Ok(removed > 0)
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (session_id, tick, event_type, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.session_id,
                entry.tick as i64,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    pub fn events_for_session(&self, session_id: &str) -> SimResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, tick, event_type, payload
             FROM event_log WHERE session_id = ?1
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![session_id], |row| {
                Ok(EventLogEntry {
                    id:         Some(row.get(0)?),
                    session_id: row.get(1)?,
                    tick:       row.get::<_, i64>(2)? as Tick,
                    event_type: row.get(3)?,
                    payload:    row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn event_count(&self, session_id: &str, event_type: &str) -> SimResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE session_id = ?1 AND event_type = ?2",
            params![session_id, event_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
