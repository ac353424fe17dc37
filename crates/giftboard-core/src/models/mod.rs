//! Data models for Giftboard

mod person;

pub use person::{GiftStatus, Person, PersonId};
