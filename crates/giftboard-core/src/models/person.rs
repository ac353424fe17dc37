//! Person model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

/// A unique identifier for a person, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonId(Uuid);

impl PersonId {
    /// Create a new unique person ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PersonId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Where a person is in the gift-giving workflow.
///
/// The kebab-case names double as stable column identifiers for the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GiftStatus {
    #[default]
    NotSent,
    Preparing,
    Sent,
}

impl GiftStatus {
    /// Every status, in board column order.
    pub const ALL: [Self; 3] = [Self::NotSent, Self::Preparing, Self::Sent];

    /// Stable identifier used on the wire, in storage and as a column id.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSent => "not-sent",
            Self::Preparing => "preparing",
            Self::Sent => "sent",
        }
    }

    /// Human-readable column title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::NotSent => "Not sent yet",
            Self::Preparing => "Preparing",
            Self::Sent => "Sent",
        }
    }
}

impl fmt::Display for GiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GiftStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "not-sent" => Ok(Self::NotSent),
            "preparing" => Ok(Self::Preparing),
            "sent" => Ok(Self::Sent),
            other => Err(Error::Validation(format!(
                "unknown status '{other}' (expected not-sent, preparing or sent)"
            ))),
        }
    }
}

/// A person on the gift list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Store-assigned identifier, also the drag token
    pub id: PersonId,
    /// Display name (trimmed, never empty)
    pub name: String,
    /// Current workflow state
    pub status: GiftStatus,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl Person {
    /// Get the name truncated to `max_len` characters
    #[must_use]
    pub fn name_preview(&self, max_len: usize) -> String {
        self.name.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_id_unique() {
        let id1 = PersonId::new();
        let id2 = PersonId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_person_id_parse() {
        let id = PersonId::new();
        let parsed: PersonId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_status_identifiers_are_stable() {
        for status in GiftStatus::ALL {
            assert_eq!(status.as_str().parse::<GiftStatus>().unwrap(), status);
        }
        assert_eq!(GiftStatus::default(), GiftStatus::NotSent);
    }

    #[test]
    fn test_status_rejects_unknown_value() {
        let error = "delivered".parse::<GiftStatus>().unwrap_err();
        assert!(matches!(error, Error::Validation(_)));
    }

    #[test]
    fn test_status_display_matches_column_id() {
        assert_eq!(GiftStatus::NotSent.to_string(), "not-sent");
        assert_eq!(GiftStatus::Preparing.to_string(), "preparing");
    }

    #[test]
    fn test_name_preview() {
        let person = Person {
            id: PersonId::new(),
            name: "張三豐".to_string(),
            status: GiftStatus::Sent,
            created_at: 1,
            updated_at: 1,
        };
        assert_eq!(person.name_preview(2), "張三");
    }
}
