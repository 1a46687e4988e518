//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `project` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Due dates are persisted as fixed-width RFC 3339 UTC text, so lexical
//!   column order equals chronological order.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::project::{Project, ProjectId, ProjectOrdering};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROJECT_SELECT_SQL: &str = "SELECT id, name, due_date, priority FROM project";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for project persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted project data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for project CRUD operations.
pub trait ProjectRepository {
    /// Inserts a row. A project without an id receives an autoincremented
    /// one; a project carrying an id is inserted under that exact id.
    /// Returns the id of the inserted row.
    fn insert(&self, project: &Project) -> RepoResult<ProjectId>;

    /// Updates the row matching the project's id with all field values.
    /// Returns `false` when no row matched (including a project with no
    /// id, which by definition matches nothing).
    fn update(&self, project: &Project) -> RepoResult<bool>;

    fn get(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn list(&self, ordering: ProjectOrdering) -> RepoResult<Vec<Project>>;
    fn count(&self) -> RepoResult<u64>;

    /// Deletes rows whose id is in `ids`; absent ids are silently ignored.
    /// Returns the number of rows actually deleted.
    fn delete_by_ids(&self, ids: &[ProjectId]) -> RepoResult<usize>;

    /// Deletes every row. Returns the number of rows deleted.
    fn delete_all(&self) -> RepoResult<usize>;
}

/// SQLite-backed project repository over a borrowed connection.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn insert(&self, project: &Project) -> RepoResult<ProjectId> {
        self.conn.execute(
            "INSERT INTO project (id, name, due_date, priority)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                project.id,
                project.name.as_str(),
                due_date_to_db(project.due_date),
                project.priority,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, project: &Project) -> RepoResult<bool> {
        let Some(id) = project.id else {
            return Ok(false);
        };

        let changed = self.conn.execute(
            "UPDATE project
             SET
                name = ?1,
                due_date = ?2,
                priority = ?3
             WHERE id = ?4;",
            params![
                project.name.as_str(),
                due_date_to_db(project.due_date),
                project.priority,
                id,
            ],
        )?;

        Ok(changed > 0)
    }

    fn get(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn list(&self, ordering: ProjectOrdering) -> RepoResult<Vec<Project>> {
        let sql = format!("{PROJECT_SELECT_SQL} {};", ordering_sql(ordering));
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();

        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM project;", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn delete_by_ids(&self, ids: &[ProjectId]) -> RepoResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = std::iter::repeat("?")
            .take(ids.len())
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("DELETE FROM project WHERE id IN ({placeholders});");

        let deleted = self
            .conn
            .execute(&sql, params_from_iter(ids.iter().copied()))?;
        Ok(deleted)
    }

    fn delete_all(&self) -> RepoResult<usize> {
        let deleted = self.conn.execute("DELETE FROM project;", [])?;
        Ok(deleted)
    }
}

fn ordering_sql(ordering: ProjectOrdering) -> &'static str {
    // Ties resolve by id so every mode is a total, stable order.
    match ordering {
        ProjectOrdering::ByName => "ORDER BY name COLLATE NOCASE ASC, id ASC",
        ProjectOrdering::ByDueDate => "ORDER BY due_date DESC, id ASC",
        ProjectOrdering::ByPriority => "ORDER BY priority DESC, id ASC",
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let due_date_text: String = row.get("due_date")?;
    let due_date = parse_due_date(&due_date_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid due date value `{due_date_text}` in project.due_date"
        ))
    })?;

    Ok(Project {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        due_date,
        priority: row.get("priority")?,
    })
}

/// Fixed-width RFC 3339 in UTC with millisecond precision, e.g.
/// `2026-03-01T12:00:00.000Z`. The width matters: the due-date ordering
/// relies on text comparison matching chronological comparison.
fn due_date_to_db(due_date: DateTime<Utc>) -> String {
    due_date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::{due_date_to_db, parse_due_date};
    use chrono::{TimeZone, Utc};

    #[test]
    fn due_date_text_round_trips() {
        let due = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let text = due_date_to_db(due);
        assert_eq!(text, "2020-01-01T00:00:00.000Z");
        assert_eq!(parse_due_date(&text), Some(due));
    }

    #[test]
    fn due_date_text_order_matches_chronological_order() {
        let earlier = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 1).unwrap();
        assert!(due_date_to_db(earlier) < due_date_to_db(later));
    }

    #[test]
    fn parse_due_date_rejects_garbage() {
        assert_eq!(parse_due_date("not a date"), None);
    }
}
