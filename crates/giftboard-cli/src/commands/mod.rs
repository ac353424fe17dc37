pub mod add;
pub mod board;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod move_person;
pub mod sync;
pub mod watch;
