//! Database layer for Resolve

mod connection;
mod migrations;
mod store;

pub use connection::Database;
pub use store::{RecordStore, SqliteStore};
