//! Project store: connection ownership and the single write path.
//!
//! # Responsibility
//! - Own the process-wide database connection behind a mutex.
//! - Expose write/read operations on the `project` table.
//! - Signal the change notifier after every committed mutation.
//!
//! # Invariants
//! - Exactly one writer path: every mutation serializes through the
//!   connection mutex, and reads observe only committed state.
//! - Change notifications fire after the write has committed, never before.
//! - `seed_if_empty` runs as one transaction and one notification.

use crate::db::{open_db_with, open_db_in_memory, DbError, StoreConfig};
use crate::live::ChangeNotifier;
use crate::model::project::{Project, ProjectId, ProjectOrdering};
use crate::repo::project_repo::{ProjectRepository, RepoError, SqliteProjectRepository};
use crate::seed;
use log::{debug, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error wrapping bootstrap, persistence and lock failures.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Repo(RepoError),
    /// The connection mutex was poisoned by a panic in another thread.
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Poisoned => write!(f, "store connection lock is poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Poisoned => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::Db(DbError::Sqlite(value)))
    }
}

/// Owner of the database connection and the only write path to it.
///
/// Construct once during process bootstrap and share via `Arc`; the store
/// is `Send + Sync` and holds the connection for the process lifetime.
pub struct ProjectStore {
    conn: Mutex<Connection>,
    changes: ChangeNotifier,
}

impl ProjectStore {
    /// Wraps an already-migrated connection (see `db::open_db`).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            changes: ChangeNotifier::new(),
        }
    }

    /// Opens, migrates and wraps a database file in one step.
    pub fn open(path: impl AsRef<Path>, config: &StoreConfig) -> StoreResult<Self> {
        Ok(Self::new(open_db_with(path, config)?))
    }

    /// Opens an in-memory store, mainly for tests and previews.
    pub fn in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Saves a project with upsert-by-identity semantics and returns the
    /// saved value.
    ///
    /// - `id = None`: inserts a new row; the returned project carries the
    ///   store-assigned id.
    /// - `id = Some`: updates the matching row with all field values; when
    ///   no row matches, inserts under that exact id.
    ///
    /// The input is consumed and a new value returned, so callers never
    /// hold an aliased copy with a stale identity.
    pub fn save(&self, project: Project) -> StoreResult<Project> {
        let mut saved = project;
        {
            let conn = self.lock()?;
            let repo = SqliteProjectRepository::new(&conn);
            match saved.id {
                Some(_) => {
                    if !repo.update(&saved)? {
                        repo.insert(&saved)?;
                    }
                }
                None => saved.id = Some(repo.insert(&saved)?),
            }
        }

        debug!(
            "event=project_save module=store status=ok id={}",
            saved.id.unwrap_or_default()
        );
        self.changes.notify_all();
        Ok(saved)
    }

    /// Deletes the rows whose ids appear in `ids`; absent ids are ignored.
    pub fn delete_by_ids(&self, ids: &[ProjectId]) -> StoreResult<usize> {
        let deleted = {
            let conn = self.lock()?;
            SqliteProjectRepository::new(&conn).delete_by_ids(ids)?
        };

        debug!("event=project_delete module=store status=ok deleted={deleted}");
        if deleted > 0 {
            self.changes.notify_all();
        }
        Ok(deleted)
    }

    /// Deletes every project unconditionally.
    pub fn delete_all(&self) -> StoreResult<usize> {
        let deleted = {
            let conn = self.lock()?;
            SqliteProjectRepository::new(&conn).delete_all()?
        };

        debug!("event=project_delete_all module=store status=ok deleted={deleted}");
        if deleted > 0 {
            self.changes.notify_all();
        }
        Ok(deleted)
    }

    /// First-run demo population: inserts `count` random projects when the
    /// table is empty, as one transaction and one change notification.
    pub fn seed_if_empty(&self, count: usize) -> StoreResult<usize> {
        let inserted = {
            let mut conn = self.lock()?;
            let tx = conn.transaction()?;
            let inserted = {
                let repo = SqliteProjectRepository::new(&tx);
                if repo.count()? > 0 {
                    0
                } else {
                    for project in seed::random_projects(count) {
                        repo.insert(&project)?;
                    }
                    count
                }
            };
            tx.commit()?;
            inserted
        };

        if inserted > 0 {
            info!("event=project_seed module=store status=ok inserted={inserted}");
            self.changes.notify_all();
        }
        Ok(inserted)
    }

    /// Read-only access to the table for arbitrary queries.
    ///
    /// The closure runs while the connection lock is held, so it observes
    /// a state consistent with the latest committed write and never a
    /// partially-applied one.
    pub fn read<T>(
        &self,
        read: impl FnOnce(&Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let conn = self.lock()?;
        read(&conn)
    }

    pub fn get(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        self.read(|conn| Ok(SqliteProjectRepository::new(conn).get(id)?))
    }

    pub fn list(&self, ordering: ProjectOrdering) -> StoreResult<Vec<Project>> {
        self.read(|conn| Ok(SqliteProjectRepository::new(conn).list(ordering)?))
    }

    pub fn count(&self) -> StoreResult<u64> {
        self.read(|conn| Ok(SqliteProjectRepository::new(conn).count()?))
    }

    pub(crate) fn changes(&self) -> &ChangeNotifier {
        &self.changes
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}
