//! giftboard-core - Core library for Giftboard
//!
//! This crate holds the person model, the libSQL-backed record store, the sync
//! adapter that mirrors the store's snapshots, and the board logic that the
//! CLI (or any other front end) renders.

pub mod board;
pub mod db;
pub mod error;
pub mod input;
pub mod models;
pub mod store;
pub mod sync;
pub mod util;

pub use error::{Error, ErrorKind, Result};
pub use models::{GiftStatus, Person, PersonId};
pub use store::{PersonStore, Snapshot};
pub use sync::SyncAdapter;
