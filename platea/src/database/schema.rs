//! Database schema definitions and SQL constants.
//!
//! All table definitions, indices, and statement text for the platea
//! database live here. The status columns carry CHECK constraints so that
//! even a buggy writer cannot record an occupied seat without an occupant
//! or a booking in an unknown state.

/// Current schema version for the database.
///
/// Stored in the metadata table and checked on every open.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the bookings table.
///
/// Seat label lists are stored as JSON arrays of canonical label strings.
/// `resolved_seats`, `admin_notes`, and `decided_at` are set exactly once,
/// when the booking is decided.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL,
        phone TEXT NOT NULL,
        amount_cents INTEGER NOT NULL CHECK (amount_cents > 0),
        requested_seats TEXT NOT NULL,
        resolved_seats TEXT,
        attachment_ref TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending'
            CHECK (status IN ('pending', 'approved', 'rejected')),
        admin_notes TEXT,
        created_at INTEGER NOT NULL,
        decided_at INTEGER
    )";

/// SQL statement to create the seats table.
///
/// The occupant link must be present exactly when the seat is occupied;
/// the table-level CHECK makes half-written occupancy unrepresentable.
pub const CREATE_SEATS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS seats (
        label TEXT PRIMARY KEY NOT NULL,
        row TEXT NOT NULL,
        number INTEGER NOT NULL,
        tier TEXT NOT NULL CHECK (tier IN ('standard', 'premium')),
        status TEXT NOT NULL DEFAULT 'available'
            CHECK (status IN ('available', 'occupied')),
        occupied_by INTEGER REFERENCES bookings(id),
        CHECK ((status = 'occupied') = (occupied_by IS NOT NULL)),
        UNIQUE (row, number)
    )";

/// SQL statement to create an index on the seats (row, number) pair.
pub const CREATE_SEAT_ROW_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_seats_row_number ON seats(row, number)";

/// SQL statement to create an index on the booking status column.
pub const CREATE_BOOKING_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to record a new pending booking.
pub const INSERT_BOOKING: &str = r"
    INSERT INTO bookings
    (email, phone, amount_cents, requested_seats, attachment_ref, created_at)
    VALUES (?, ?, ?, ?, ?, ?)
";

/// Guarded transition of a pending booking to approved.
///
/// Matches zero rows unless the booking is still pending, so the
/// read-check-write window collapses into one statement.
pub const APPROVE_BOOKING: &str = r"
    UPDATE bookings
    SET status = 'approved', resolved_seats = ?1, admin_notes = ?2, decided_at = ?3
    WHERE id = ?4 AND status = 'pending'
";

/// Guarded transition of a pending booking to rejected.
pub const REJECT_BOOKING: &str = r"
    UPDATE bookings
    SET status = 'rejected', admin_notes = ?1, decided_at = ?2
    WHERE id = ?3 AND status = 'pending'
";

/// Guarded seat occupation. Matches zero rows unless the seat exists and
/// is still available.
pub const OCCUPY_SEAT: &str = r"
    UPDATE seats
    SET status = 'occupied', occupied_by = ?1
    WHERE label = ?2 AND status = 'available'
";

/// Guarded seat release. Matches zero rows unless the seat is occupied.
pub const FREE_SEAT: &str = r"
    UPDATE seats
    SET status = 'available', occupied_by = NULL
    WHERE label = ? AND status = 'occupied'
";

/// Seat insert used by inventory initialization.
///
/// Matches zero rows when the label already exists; the affected-row
/// count tells the caller whether the seat is new.
pub const INSERT_SEAT_IF_ABSENT: &str = r"
    INSERT INTO seats (label, row, number, tier)
    VALUES (?, ?, ?, ?)
    ON CONFLICT(label) DO NOTHING
";

/// Structural rewrite of an existing seat.
///
/// Rewrites row, number, and tier but never touches status or occupant,
/// so re-running initialization cannot release an occupied seat.
pub const UPDATE_SEAT_STRUCTURAL: &str = r"
    UPDATE seats
    SET row = ?1, number = ?2, tier = ?3
    WHERE label = ?4
";
