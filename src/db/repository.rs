//! Hospital repository over SQLite
//!
//! Exposes the same small surface the maintenance scripts need from an ORM
//! client: `find_unique`, `find_many`, `update`, and an explicit
//! `disconnect`.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::{Path, PathBuf};

use super::models::{Hospital, HospitalRecord, HospitalUpdate, Include, Manager, NewHospital, Rating};
use super::{schema, DbError, DbResult};

/// Read/update operations the debug scripts run against
pub trait HospitalRepository {
    /// One hospital by id, with the requested relations
    fn find_unique(&self, id: &str, include: Include) -> DbResult<Option<HospitalRecord>>;

    /// Every hospital, oldest first
    fn find_many(&self) -> DbResult<Vec<Hospital>>;

    /// Apply `update` to one hospital and return the new row
    fn update(&self, id: &str, update: &HospitalUpdate) -> DbResult<Hospital>;
}

const HOSPITAL_COLUMNS: &str =
    "id, name, is_verified, accreditations, specializations, manager_id, created_at";

/// SQLite-backed hospital store
pub struct HospitalDb {
    conn: Connection,
    path: Option<PathBuf>,
}

impl HospitalDb {
    /// Open or create a database file
    pub fn open(path: &Path) -> DbResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        schema::migrate(&conn)?;

        tracing::debug!(path = ?path, "Database connected");
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Private in-memory database
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::migrate(&conn)?;
        Ok(Self { conn, path: None })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the connection, surfacing any close error
    pub fn disconnect(self) -> DbResult<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, e)| DbError::Sqlite(e))?;
        tracing::debug!(path = ?path, "Database disconnected");
        Ok(())
    }

    pub fn insert_manager(&self, manager: &Manager) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO managers (id, name, email, phone) VALUES (?1, ?2, ?3, ?4)",
            params![manager.id, manager.name, manager.email, manager.phone],
        )?;
        Ok(())
    }

    pub fn insert_hospital(&self, hospital: &NewHospital) -> DbResult<Hospital> {
        let created_at = Utc::now();
        self.conn.execute(
            "INSERT INTO hospitals
                (id, name, is_verified, accreditations, specializations, manager_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                hospital.id,
                hospital.name,
                hospital.is_verified,
                serde_json::to_string(&hospital.accreditations)?,
                serde_json::to_string(&hospital.specializations)?,
                hospital.manager_id,
                created_at.timestamp_millis(),
            ],
        )?;

        self.find_hospital(&hospital.id)?
            .ok_or_else(|| DbError::NotFound(hospital.id.clone()))
    }

    pub fn insert_rating(&self, rating: &Rating) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO ratings (id, hospital_id, score, comment, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                rating.id,
                rating.hospital_id,
                rating.score,
                rating.comment,
                rating.created_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    pub fn count_hospitals(&self) -> DbResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM hospitals", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn find_hospital(&self, id: &str) -> DbResult<Option<Hospital>> {
        let hospital = self
            .conn
            .query_row(
                &format!("SELECT {} FROM hospitals WHERE id = ?1", HOSPITAL_COLUMNS),
                params![id],
                hospital_from_row,
            )
            .optional()?;
        Ok(hospital)
    }

    fn find_manager(&self, id: &str) -> DbResult<Option<Manager>> {
        let manager = self
            .conn
            .query_row(
                "SELECT id, name, email, phone FROM managers WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Manager {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        phone: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(manager)
    }

    fn find_ratings(&self, hospital_id: &str) -> DbResult<Vec<Rating>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, hospital_id, score, comment, created_at
             FROM ratings WHERE hospital_id = ?1
             ORDER BY created_at, id",
        )?;

        let ratings = stmt
            .query_map(params![hospital_id], |row| {
                Ok(Rating {
                    id: row.get(0)?,
                    hospital_id: row.get(1)?,
                    score: row.get(2)?,
                    comment: row.get(3)?,
                    created_at: timestamp_column(row, 4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ratings)
    }
}

impl HospitalRepository for HospitalDb {
    fn find_unique(&self, id: &str, include: Include) -> DbResult<Option<HospitalRecord>> {
        let hospital = match self.find_hospital(id)? {
            Some(h) => h,
            None => return Ok(None),
        };

        let manager = match (&hospital.manager_id, include.manager) {
            (Some(manager_id), true) => self.find_manager(manager_id)?,
            _ => None,
        };

        let ratings = if include.ratings {
            Some(self.find_ratings(&hospital.id)?)
        } else {
            None
        };

        Ok(Some(HospitalRecord {
            hospital,
            manager,
            ratings,
        }))
    }

    fn find_many(&self) -> DbResult<Vec<Hospital>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {} FROM hospitals ORDER BY created_at, id",
            HOSPITAL_COLUMNS
        ))?;

        let hospitals = stmt
            .query_map([], hospital_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(hospitals)
    }

    fn update(&self, id: &str, update: &HospitalUpdate) -> DbResult<Hospital> {
        // Nothing to write; still report a missing id
        if update.is_empty() {
            return self
                .find_hospital(id)?
                .ok_or_else(|| DbError::NotFound(id.to_string()));
        }

        let accreditations = update
            .accreditations
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let specializations = update
            .specializations
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let changed = self.conn.execute(
            "UPDATE hospitals SET
                name = COALESCE(?1, name),
                is_verified = COALESCE(?2, is_verified),
                accreditations = COALESCE(?3, accreditations),
                specializations = COALESCE(?4, specializations)
             WHERE id = ?5",
            params![
                update.name,
                update.is_verified,
                accreditations,
                specializations,
                id
            ],
        )?;

        if changed == 0 {
            return Err(DbError::NotFound(id.to_string()));
        }

        self.find_hospital(id)?
            .ok_or_else(|| DbError::NotFound(id.to_string()))
    }
}

fn hospital_from_row(row: &Row<'_>) -> rusqlite::Result<Hospital> {
    Ok(Hospital {
        id: row.get(0)?,
        name: row.get(1)?,
        is_verified: row.get(2)?,
        accreditations: json_list_column(row, 3)?,
        specializations: json_list_column(row, 4)?,
        manager_id: row.get(5)?,
        created_at: timestamp_column(row, 6)?,
    })
}

fn json_list_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(idx)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, millis))
}
