use rusqlite::Connection;

use super::DbResult;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS managers (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT
    );

    CREATE TABLE IF NOT EXISTS hospitals (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        is_verified INTEGER NOT NULL DEFAULT 0,
        accreditations TEXT NOT NULL DEFAULT '[]',
        specializations TEXT NOT NULL DEFAULT '[]',
        manager_id TEXT REFERENCES managers(id),
        created_at INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS ratings (
        id TEXT PRIMARY KEY,
        hospital_id TEXT NOT NULL REFERENCES hospitals(id) ON DELETE CASCADE,
        score INTEGER NOT NULL,
        comment TEXT,
        created_at INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_ratings_hospital ON ratings(hospital_id);
";

/// Create tables and indexes if missing
pub(super) fn migrate(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
