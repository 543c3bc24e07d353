//! Database layer for platea.
//!
//! `SQLite` with WAL journaling is the single source of truth for seats and
//! bookings. All multi-record mutations run inside immediate write
//! transactions obtained from [`Database::begin_transaction`], and every
//! status transition is a guarded UPDATE, so concurrent writers from
//! independent connections serialize on the database write lock instead of
//! racing each other.

pub mod bookings;
pub mod config;
pub mod connection;
pub mod migrations;
pub mod schema;
pub mod seats;

#[cfg(test)]
pub mod test_util;

pub use config::DatabaseConfig;
pub use connection::Database;
