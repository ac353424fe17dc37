//! Free-text name entry.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static NAME_DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;\n]+").expect("Invalid regex"));

/// Split bulk input into individual names.
///
/// Names may be separated by commas, semicolons or newlines, in any mix.
/// Each piece is trimmed and empty pieces are dropped; nothing else about the
/// name is changed, and duplicates are kept.
///
/// # Examples
///
/// ```
/// use giftboard_core::input::parse_names;
///
/// let names = parse_names("Alice\nBob, Carol").unwrap();
/// assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
/// ```
pub fn parse_names(raw: &str) -> Result<Vec<String>> {
    let names = NAME_DELIMITERS
        .split(raw)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();

    if names.is_empty() {
        return Err(Error::Validation("enter at least one name".into()));
    }
    Ok(names)
}
