//! Board projection and drag-and-drop interpretation

mod categorize;
mod controller;

pub use categorize::{categorize, BoardStats, Columns};
pub use controller::{
    AddReport, BoardController, DragLocation, DropEvent, DropOutcome, IgnoreReason, Notice,
};
