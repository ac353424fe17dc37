//! Partition a snapshot into status columns.

use serde::Serialize;

use crate::models::{GiftStatus, Person, PersonId};

/// People grouped by status, each column in snapshot order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Columns {
    pub not_sent: Vec<Person>,
    pub preparing: Vec<Person>,
    pub sent: Vec<Person>,
}

/// Headcounts shown next to the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub total: usize,
    pub not_sent: usize,
    pub preparing: usize,
    pub sent: usize,
}

/// Split `people` into one column per status.
///
/// Pure and total: every person lands in exactly one column and relative order
/// within a column matches the input.
pub fn categorize(people: &[Person]) -> Columns {
    let mut columns = Columns::default();
    for person in people {
        columns.column_mut(person.status).push(person.clone());
    }
    columns
}

impl Columns {
    /// The column for `status`.
    pub fn get(&self, status: GiftStatus) -> &[Person] {
        match status {
            GiftStatus::NotSent => &self.not_sent,
            GiftStatus::Preparing => &self.preparing,
            GiftStatus::Sent => &self.sent,
        }
    }

    fn column_mut(&mut self, status: GiftStatus) -> &mut Vec<Person> {
        match status {
            GiftStatus::NotSent => &mut self.not_sent,
            GiftStatus::Preparing => &mut self.preparing,
            GiftStatus::Sent => &mut self.sent,
        }
    }

    /// Columns in board order.
    pub fn by_status(&self) -> impl Iterator<Item = (GiftStatus, &[Person])> {
        GiftStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    /// Column and index currently holding `id`.
    pub fn locate(&self, id: &PersonId) -> Option<(GiftStatus, usize)> {
        self.by_status().find_map(|(status, people)| {
            people
                .iter()
                .position(|person| &person.id == id)
                .map(|index| (status, index))
        })
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats {
            total: self.not_sent.len() + self.preparing.len() + self.sent.len(),
            not_sent: self.not_sent.len(),
            preparing: self.preparing.len(),
            sent: self.sent.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn person(name: &str, status: GiftStatus) -> Person {
        Person {
            id: PersonId::new(),
            name: name.to_string(),
            status,
            created_at: 1,
            updated_at: 1,
        }
    }

    fn names(people: &[Person]) -> Vec<&str> {
        people.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn empty_snapshot_yields_empty_columns() {
        let columns = categorize(&[]);
        assert_eq!(columns, Columns::default());
        assert_eq!(columns.stats().total, 0);
    }

    #[test]
    fn partitions_every_person_exactly_once_in_order() {
        let people = vec![
            person("A", GiftStatus::Sent),
            person("B", GiftStatus::NotSent),
            person("C", GiftStatus::Preparing),
            person("D", GiftStatus::NotSent),
            person("E", GiftStatus::Sent),
            person("F", GiftStatus::NotSent),
        ];

        let columns = categorize(&people);
        assert_eq!(names(columns.get(GiftStatus::NotSent)), vec!["B", "D", "F"]);
        assert_eq!(names(columns.get(GiftStatus::Preparing)), vec!["C"]);
        assert_eq!(names(columns.get(GiftStatus::Sent)), vec!["A", "E"]);

        let mut seen = HashSet::new();
        for (status, column) in columns.by_status() {
            for p in column {
                assert_eq!(p.status, status);
                assert!(seen.insert(p.id));
            }
        }
        assert_eq!(seen.len(), people.len());
    }

    #[test]
    fn input_is_left_untouched() {
        let people = vec![person("A", GiftStatus::Sent), person("B", GiftStatus::NotSent)];
        let before = people.clone();
        let _ = categorize(&people);
        assert_eq!(people, before);
    }

    #[test]
    fn locate_reports_column_and_index() {
        let people = vec![
            person("A", GiftStatus::NotSent),
            person("B", GiftStatus::Sent),
            person("C", GiftStatus::NotSent),
        ];
        let columns = categorize(&people);

        assert_eq!(columns.locate(&people[2].id), Some((GiftStatus::NotSent, 1)));
        assert_eq!(columns.locate(&people[1].id), Some((GiftStatus::Sent, 0)));
        assert_eq!(columns.locate(&PersonId::new()), None);
    }

    #[test]
    fn stats_count_each_column() {
        let people = vec![
            person("A", GiftStatus::NotSent),
            person("B", GiftStatus::Preparing),
            person("C", GiftStatus::Preparing),
        ];
        assert_eq!(
            categorize(&people).stats(),
            BoardStats {
                total: 3,
                not_sent: 1,
                preparing: 2,
                sent: 0,
            }
        );
    }
}
