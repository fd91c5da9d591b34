//! Row mapping helpers for `SQLite` queries.

use gettor_core::{Link, RepositoryError, Request, StatsEntry};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Shared SELECT column list for request queries.
pub const REQUEST_SELECT_COLUMNS: &str = "id, command, platform, service, date, status";

/// Shared SELECT column list for link queries.
pub const LINK_SELECT_COLUMNS: &str = "link, platform, arch, version, provider, status";

/// Stored in `stats.platform` for commands without a platform.
///
/// Rows an older service wrote with a NULL platform are folded into this
/// value by `create_schema`.
pub const NO_PLATFORM: &str = "";

/// Parse a database row into a Request.
pub fn row_to_request(row: &SqliteRow) -> Result<Request, RepositoryError> {
    Ok(Request {
        id: row.try_get("id").map_err(map_column_error)?,
        command: row.try_get("command").map_err(map_column_error)?,
        platform: row.try_get("platform").map_err(map_column_error)?,
        service: row.try_get("service").map_err(map_column_error)?,
        date: row.try_get("date").map_err(map_column_error)?,
        status: row.try_get("status").map_err(map_column_error)?,
    })
}

/// Parse a database row into a Link.
pub fn row_to_link(row: &SqliteRow) -> Result<Link, RepositoryError> {
    Ok(Link {
        link: row.try_get("link").map_err(map_column_error)?,
        platform: row.try_get("platform").map_err(map_column_error)?,
        arch: row.try_get("arch").map_err(map_column_error)?,
        version: row.try_get("version").map_err(map_column_error)?,
        provider: row.try_get("provider").map_err(map_column_error)?,
        status: row.try_get("status").map_err(map_column_error)?,
    })
}

/// Parse a database row into a `StatsEntry`.
pub fn row_to_stats_entry(row: &SqliteRow) -> Result<StatsEntry, RepositoryError> {
    let platform: Option<String> = row.try_get("platform").map_err(map_column_error)?;

    Ok(StatsEntry {
        date: row.try_get("date").map_err(map_column_error)?,
        platform: platform.filter(|p| p != NO_PLATFORM),
        command: row.try_get("command").map_err(map_column_error)?,
        service: row.try_get("service").map_err(map_column_error)?,
        num_requests: row.try_get("num_requests").map_err(map_column_error)?,
    })
}

/// Map a query error, keeping constraint violations distinct.
pub fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db)
            if db.is_unique_violation()
                || db.is_check_violation()
                || db.is_foreign_key_violation() =>
        {
            RepositoryError::Constraint(db.message().to_string())
        }
        _ => RepositoryError::Storage(e.to_string()),
    }
}

fn map_column_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Decode(format!("Column read error: {e}"))
}
