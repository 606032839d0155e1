//! Database layer
//!
//! Provides the connection pool abstraction and repositories for Clubroom.
//! Supports:
//! - SQLite (default, for single-binary deployment)
//! - MySQL (for hosted deployments)
//!
//! The driver is selected via configuration; repositories work against the
//! `DatabasePool` trait and never know which backend is active.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};
