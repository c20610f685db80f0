//! All things related to the storage of notes

use core::fmt;
use std::time::Duration;

use sqlx::PgConnection;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

pub use Config as DatabaseConfig;
pub use form_types::*;

use crate::notes::Note;
use crate::pagination::PaginationParams;
use crate::utils::env_var;

mod form_types;

/// Migrator to run migrations on startup
static MIGRATOR: Migrator = sqlx::migrate!();

/// Maximum amount of connections in the pool
const MAX_CONNECTIONS: u32 = 5;

/// How long to wait for a free connection in the pool
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// Storage errors
#[derive(Debug)]
pub enum Error {
    /// The storage is not configured correctly
    Configuration(String),

    /// A connection error with the storage
    Connection(String),

    /// The migrations could not be applied
    Migration(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Configuration(error) => write!(f, "Configuration error: {error}"),
            Error::Connection(error) => write!(f, "Connection error: {error}"),
            Error::Migration(error) => write!(f, "Migration error: {error}"),
        }
    }
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Database configuration
pub enum Config {
    /// Detect configuration from environment
    DetectConfig,

    /// Use existing connection
    #[cfg_attr(not(test), allow(dead_code))] // used by the tests
    ExistingConnection(PgPool),
}

/// Postgres storage
///
/// Cheap to clone, all clones share the same pool of connections
#[derive(Clone)]
pub struct Database {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Database {
    /// Create a new Postgres storage
    pub async fn from_config(config: Config) -> Result<Self> {
        match config {
            Config::DetectConfig => Self::new().await,
            Config::ExistingConnection(pool) => Self::new_with_pool(pool).await,
        }
    }

    /// Create Postgres storage
    ///
    /// Use the `DATABASE_URL` environment variable
    ///
    /// Migrations will be run
    async fn new() -> Result<Self> {
        let database_connection_string = env_var("DATABASE_URL")
            .ok_or_else(|| Error::Configuration("`DATABASE_URL` is not set".to_string()))?;

        let connection_pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(&database_connection_string)
            .await
            .map_err(connection_error)?;

        Self::new_with_pool(connection_pool).await
    }

    /// Create Postgres storage with existing pool
    ///
    /// Migrations will be run
    async fn new_with_pool(connection_pool: PgPool) -> Result<Self> {
        MIGRATOR
            .run(&connection_pool)
            .await
            .map_err(|err| Error::Migration(err.to_string()))?;

        Ok(Self { connection_pool })
    }
}

impl Database {
    /// Count all notes matching the filter
    pub async fn count_notes(&self, filter: &NoteFilter) -> Result<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM notes");
        push_note_filter(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.connection_pool)
            .await
            .map_err(connection_error)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Find a single page of notes matching the filter
    ///
    /// Ordered by ID, oldest first
    pub async fn find_all_notes(
        &self,
        filter: &NoteFilter,
        pagination: &PaginationParams,
    ) -> Result<Vec<Note>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM notes");
        push_note_filter(&mut builder, filter);

        builder
            .push(" ORDER BY note_id ASC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let notes = builder
            .build_query_as::<Note>()
            .fetch_all(&self.connection_pool)
            .await
            .map_err(connection_error)?;

        Ok(notes)
    }

    /// Find a single note of a user by its ID
    ///
    /// Respects the soft-delete
    pub async fn find_single_note_by_id(&self, user_id: i64, note_id: i64) -> Result<Option<Note>> {
        let note = sqlx::query_as::<_, Note>(
            r"
            SELECT *
            FROM notes
            WHERE deleted_at IS NULL AND created_by = $1 AND note_id = $2
            LIMIT 1
            ",
        )
        .bind(user_id)
        .bind(note_id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(note)
    }

    /// Create a note for a user
    pub async fn create_note(&self, user_id: i64, values: &CreateNoteValues<'_>) -> Result<Note> {
        let mut transaction = self
            .connection_pool
            .begin()
            .await
            .map_err(connection_error)?;

        let note = sqlx::query_as::<_, Note>(
            r"
            INSERT INTO notes (title, content, created_at, updated_at, created_by, updated_by)
            VALUES ($1, $2, timezone('UTC', NOW()), timezone('UTC', NOW()), $3, $3)
            RETURNING *
            ",
        )
        .bind(values.title)
        .bind(values.content)
        .bind(user_id)
        .fetch_one(&mut *transaction)
        .await
        .map_err(connection_error)?;

        transaction.commit().await.map_err(connection_error)?;

        Ok(note)
    }

    /// Update a note of a user
    ///
    /// Respects the soft-delete, `None` when there is no such note
    pub async fn update_note(
        &self,
        user_id: i64,
        note_id: i64,
        values: &UpdateNoteValues<'_>,
    ) -> Result<Option<Note>> {
        let mut transaction = self
            .connection_pool
            .begin()
            .await
            .map_err(connection_error)?;

        let note = update_note(&mut *transaction, user_id, note_id, values).await?;

        // nothing changed without a note, dropping the transaction rolls it back
        if note.is_some() {
            transaction.commit().await.map_err(connection_error)?;
        }

        Ok(note)
    }

    /// Soft-delete a note of a user
    ///
    /// Respects the soft-delete, `None` when there is no such note
    pub async fn delete_note(&self, user_id: i64, note_id: i64) -> Result<Option<Note>> {
        let mut transaction = self
            .connection_pool
            .begin()
            .await
            .map_err(connection_error)?;

        let note = delete_note(&mut *transaction, user_id, note_id).await?;

        if note.is_some() {
            transaction.commit().await.map_err(connection_error)?;
        }

        Ok(note)
    }
}

/// Update a note of a user on an open connection
///
/// The timestamp is taken when the row is written, after waiting for any concurrent writer of
/// that row, and never moves back
async fn update_note(
    connection: &mut PgConnection,
    user_id: i64,
    note_id: i64,
    values: &UpdateNoteValues<'_>,
) -> Result<Option<Note>> {
    sqlx::query_as::<_, Note>(
        r"
        UPDATE notes
        SET title = $1,
            content = $2,
            updated_at = GREATEST(timezone('UTC', clock_timestamp()), updated_at),
            updated_by = $3
        WHERE deleted_at IS NULL AND created_by = $3 AND note_id = $4
        RETURNING *
        ",
    )
    .bind(values.title)
    .bind(values.content)
    .bind(user_id)
    .bind(note_id)
    .fetch_optional(connection)
    .await
    .map_err(connection_error)
}

/// Soft-delete a note of a user on an open connection
///
/// `deleted_at` is never before `updated_at`, see [`update_note`](update_note)
async fn delete_note(
    connection: &mut PgConnection,
    user_id: i64,
    note_id: i64,
) -> Result<Option<Note>> {
    sqlx::query_as::<_, Note>(
        r"
        UPDATE notes
        SET deleted_at = GREATEST(timezone('UTC', clock_timestamp()), updated_at),
            deleted_by = $1
        WHERE deleted_at IS NULL AND created_by = $1 AND note_id = $2
        RETURNING *
        ",
    )
    .bind(user_id)
    .bind(note_id)
    .fetch_optional(connection)
    .await
    .map_err(connection_error)
}

/// Add the `WHERE` clause for a note filter
fn push_note_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &NoteFilter) {
    builder.push(" WHERE TRUE");

    if let Some(created_by) = filter.created_by {
        builder.push(" AND created_by = ").push_bind(created_by);
    }

    if !filter.include_deleted {
        builder.push(" AND deleted_at IS NULL");
    }
}

/// Convert `SQLx` to storage connection error
fn connection_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Connection(err.to_string())
}
