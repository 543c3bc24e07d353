//! Database schema initialization and version checking.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_BOOKINGS_TABLE, CREATE_BOOKING_STATUS_INDEX, CREATE_METADATA_TABLE,
    CREATE_SEATS_TABLE, CREATE_SEAT_ROW_INDEX, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION,
    SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables and indices for a fresh database and records the
/// schema version. Bookings are created before seats so the occupant
/// foreign key can reference them.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_BOOKINGS_TABLE, [])?;
    conn.execute(CREATE_SEATS_TABLE, [])?;

    conn.execute(CREATE_SEAT_ROW_INDEX, [])?;
    conn.execute(CREATE_BOOKING_STATUS_INDEX, [])?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    Ok(())
}

/// Gets the current schema version from the database.
///
/// Returns 0 if the metadata table does not exist yet or holds no version,
/// which marks the database as uninitialized.
///
/// # Errors
///
/// Returns an error on any other database failure.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => {
            if let rusqlite::Error::SqliteFailure(ref sqlite_err, _) = e {
                if sqlite_err.code == rusqlite::ErrorCode::Unknown {
                    // metadata table doesn't exist yet
                    return Ok(0);
                }
            }
            Err(e.into())
        }
    }
}

/// Checks schema compatibility and initializes a fresh database.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the stored version does
/// not match this client, or any error from initialization.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
