//! Database layer for Giftboard

mod connection;
mod migrations;
mod repository;

pub use connection::{Database, SyncConfig};
pub use repository::LibSqlPersonRepository;
