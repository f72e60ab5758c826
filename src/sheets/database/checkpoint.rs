// src/sheets/database/checkpoint.rs
//! WAL checkpointing.
//!
//! With `PRAGMA synchronous=NORMAL` committed writes may sit in the WAL file
//! for a while. The sync pipeline checkpoints after every content-affecting
//! write so that the status cell is in the main database file before the
//! filter step reads filter state, and before the sweep moves to the next row.

use super::error::DbResult;
use rusqlite::Connection;

/// Force a WAL checkpoint on a connection.
///
/// Returns the number of WAL frames checkpointed. In-memory and rollback
/// journal databases report no frames and are otherwise unaffected.
pub fn checkpoint_database(conn: &Connection) -> DbResult<i64> {
    // RESTART: checkpoint and restart the WAL file
    let (busy, _log_frames, checkpointed): (i64, i64, i64) = conn.query_row(
        "PRAGMA wal_checkpoint(RESTART)",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    if busy != 0 {
        tracing::warn!("WAL checkpoint could not complete: database busy");
    } else {
        tracing::debug!("WAL checkpoint completed ({} frames)", checkpointed.max(0));
    }
    Ok(checkpointed.max(0))
}
