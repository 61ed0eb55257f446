// ABOUTME: SQLite-backed brew storage: schema setup, per-request sessions, and row mapping.
// ABOUTME: Implements find, list, insert, replace, and delete over the brews table.

use std::path::PathBuf;

use brewlog_core::{Brew, BrewId, BrewRepository, NewBrew, Page};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use thiserror::Error;

/// Errors that can occur during brew storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt timestamp in column {column}: {value}")]
    InvalidTimestamp { column: &'static str, value: String },
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS brews (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        bean_type TEXT NOT NULL,
        brew_type TEXT NOT NULL,
        water_temp REAL NOT NULL,
        weight_in REAL NOT NULL,
        weight_out REAL NOT NULL,
        brew_time TEXT NOT NULL,
        bloom_time INTEGER,
        details TEXT,
        image_url TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_brews_created_at ON brews (created_at);";

const BREW_COLUMNS: &str = "id, bean_type, brew_type, water_temp, weight_in, weight_out,
    brew_time, bloom_time, details, image_url, created_at, updated_at";

/// Location of the brew database. Cheap to clone; each request opens its
/// own [`BrewSession`] from it.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open or create the database file and ensure the schema exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        tracing::info!(path = %path.display(), "brew database ready");

        Ok(Self { path })
    }

    /// Open a connection scoped to one unit of work. The connection closes
    /// when the session is dropped, whichever way the caller exits.
    pub fn session(&self) -> Result<BrewSession, StoreError> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(BrewSession { conn })
    }
}

/// A single open connection to the brew database.
pub struct BrewSession {
    conn: Connection,
}

/// Microsecond precision with a `Z` suffix, so lexical order matches time order.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(column: &'static str, value: String) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(&value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| StoreError::InvalidTimestamp { column, value })
}

/// Raw column values before timestamp parsing.
struct BrewRow {
    id: BrewId,
    fields: NewBrew,
    created_at: String,
    updated_at: Option<String>,
}

impl BrewRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            fields: NewBrew {
                bean_type: row.get(1)?,
                brew_type: row.get(2)?,
                water_temp: row.get(3)?,
                weight_in: row.get(4)?,
                weight_out: row.get(5)?,
                brew_time: row.get(6)?,
                bloom_time: row.get(7)?,
                details: row.get(8)?,
                image_url: row.get(9)?,
            },
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }

    fn into_brew(self) -> Result<Brew, StoreError> {
        Ok(Brew {
            id: self.id,
            fields: self.fields,
            created_at: parse_timestamp("created_at", self.created_at)?,
            updated_at: self
                .updated_at
                .map(|v| parse_timestamp("updated_at", v))
                .transpose()?,
        })
    }
}

impl BrewRepository for BrewSession {
    type Error = StoreError;

    fn find_by_id(&self, id: BrewId) -> Result<Option<Brew>, StoreError> {
        let sql = format!("SELECT {BREW_COLUMNS} FROM brews WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], BrewRow::from_row)
            .optional()?
            .map(BrewRow::into_brew)
            .transpose()
    }

    fn list(&self, page: Page) -> Result<Vec<Brew>, StoreError> {
        let sql = format!(
            "SELECT {BREW_COLUMNS} FROM brews
             ORDER BY created_at DESC, id DESC
             LIMIT ?1 OFFSET ?2"
        );
        // SQLite integers are signed; clamp huge windows instead of wrapping.
        let limit = i64::try_from(page.limit).unwrap_or(i64::MAX);
        let skip = i64::try_from(page.skip).unwrap_or(i64::MAX);

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit, skip], BrewRow::from_row)?;

        let mut brews = Vec::new();
        for row in rows {
            brews.push(row?.into_brew()?);
        }
        Ok(brews)
    }

    fn insert(&self, fields: &NewBrew) -> Result<Brew, StoreError> {
        // The clamp runs inside the INSERT, under the write lock, so a writer
        // that read the clock earlier but committed later still sorts after
        // every existing row.
        let sql = format!(
            "INSERT INTO brews (bean_type, brew_type, water_temp, weight_in, weight_out,
                brew_time, bloom_time, details, image_url, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9,
                max(?10, COALESCE((SELECT MAX(created_at) FROM brews), '')), NULL)
             RETURNING {BREW_COLUMNS}"
        );
        let row = self.conn.query_row(
            &sql,
            params![
                fields.bean_type,
                fields.brew_type,
                fields.water_temp,
                fields.weight_in,
                fields.weight_out,
                fields.brew_time,
                fields.bloom_time,
                fields.details,
                fields.image_url,
                format_timestamp(Utc::now()),
            ],
            BrewRow::from_row,
        )?;
        row.into_brew()
    }

    fn replace(&self, id: BrewId, fields: &NewBrew) -> Result<Option<Brew>, StoreError> {
        let updated_at = Utc::now();
        let sql = format!(
            "UPDATE brews SET
                bean_type = ?1,
                brew_type = ?2,
                water_temp = ?3,
                weight_in = ?4,
                weight_out = ?5,
                brew_time = ?6,
                bloom_time = ?7,
                details = ?8,
                image_url = ?9,
                updated_at = ?10
             WHERE id = ?11
             RETURNING {BREW_COLUMNS}"
        );
        self.conn
            .query_row(
                &sql,
                params![
                    fields.bean_type,
                    fields.brew_type,
                    fields.water_temp,
                    fields.weight_in,
                    fields.weight_out,
                    fields.brew_time,
                    fields.bloom_time,
                    fields.details,
                    fields.image_url,
                    format_timestamp(updated_at),
                    id,
                ],
                BrewRow::from_row,
            )
            .optional()?
            .map(BrewRow::into_brew)
            .transpose()
    }

    fn delete(&self, id: BrewId) -> Result<bool, StoreError> {
        let removed = self
            .conn
            .execute("DELETE FROM brews WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}
