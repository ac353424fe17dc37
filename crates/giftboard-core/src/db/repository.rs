//! Person repository implementation

use crate::error::{Error, Result};
use crate::models::{GiftStatus, Person, PersonId};
use libsql::{params, Connection, Row};

const PERSON_COLUMNS: &str = "id, name, status, created_at, updated_at";

/// libSQL access to the `people` table
pub struct LibSqlPersonRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlPersonRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a fully-formed person row
    pub async fn insert(&self, person: &Person) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO people (id, name, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
                params![
                    person.id.as_str(),
                    person.name.clone(),
                    person.status.to_string(),
                    person.created_at,
                    person.updated_at
                ],
            )
            .await?;
        Ok(())
    }

    /// Get a person by ID
    pub async fn get(&self, id: &PersonId) -> Result<Option<Person>> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?"),
                params![id.as_str()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_person(&row)?)),
            None => Ok(None),
        }
    }

    /// List every person in creation order
    pub async fn list_all(&self) -> Result<Vec<Person>> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {PERSON_COLUMNS} FROM people ORDER BY created_at ASC, rowid ASC"),
                (),
            )
            .await?;

        let mut people = Vec::new();
        while let Some(row) = rows.next().await? {
            people.push(Self::parse_person(&row)?);
        }
        Ok(people)
    }

    /// Replace a person's status and refresh `updated_at`
    ///
    /// `updated_at` never moves backwards, even if the local clock does.
    pub async fn update_status(&self, id: &PersonId, status: GiftStatus, now: i64) -> Result<()> {
        let rows = self
            .conn
            .execute(
                "UPDATE people SET status = ?, updated_at = MAX(updated_at, ?) WHERE id = ?",
                params![status.to_string(), now, id.as_str()],
            )
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Permanently delete a person
    pub async fn delete(&self, id: &PersonId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM people WHERE id = ?", params![id.as_str()])
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// List IDs starting with `prefix`, for short-ID lookups
    ///
    /// The prefix is compared literally; `%` and `_` are not wildcards.
    #[allow(clippy::cast_possible_wrap)]
    pub async fn list_ids_by_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id FROM people WHERE substr(id, 1, length(?1)) = ?1 ORDER BY created_at ASC LIMIT ?2",
                params![prefix, limit as i64],
            )
            .await?;

        let mut ids = Vec::new();
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<String>(0)?);
        }
        Ok(ids)
    }

    fn parse_person(row: &Row) -> Result<Person> {
        let id: String = row.get(0)?;
        let status: String = row.get(2)?;
        Ok(Person {
            id: id
                .parse()
                .map_err(|_| Error::Database(format!("invalid person id '{id}'")))?,
            name: row.get(1)?,
            status: status
                .parse()
                .map_err(|_| Error::Database(format!("invalid status '{status}' for {id}")))?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}
