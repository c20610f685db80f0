//! Notes and everything that can be done with them
//!
//! Every operation takes the [`Database`](Database) explicitly, writes always run inside their
//! own transaction

use core::fmt;
use std::ops::RangeInclusive;

use chrono::naive::NaiveDateTime;

use crate::database;
use crate::database::CreateNoteValues;
use crate::database::Database;
use crate::database::NoteFilter;
use crate::database::UpdateNoteValues;
use crate::pagination::PaginationMeta;
use crate::pagination::PaginationParams;

/// Allowed length of a title, in characters
pub const TITLE_LENGTH: RangeInclusive<usize> = 1..=100;

/// Allowed length of the content, in characters
pub const CONTENT_LENGTH: RangeInclusive<usize> = 6..=500;

/// A note of a user
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Note {
    /// Note ID, assigned by the database
    pub note_id: i64,

    /// Title of the note
    pub title: String,

    /// Content of the note
    pub content: String,

    /// Creation date
    pub created_at: NaiveDateTime,

    /// Last updated at
    pub updated_at: NaiveDateTime,

    /// Soft-deleted at
    pub deleted_at: Option<NaiveDateTime>,

    /// The user that created, and owns, the note
    pub created_by: i64,

    /// The user that last updated the note
    pub updated_by: i64,

    /// The user that deleted the note
    pub deleted_by: Option<i64>,
}

/// A single page of notes
#[derive(Debug)]
pub struct NotePage {
    /// The notes on the requested page
    pub records: Vec<Note>,

    /// Information about all pages
    pub meta: PaginationMeta,
}

/// Errors of the note operations
#[derive(Debug)]
pub enum Error {
    /// The note does not exist, is owned by somebody else or is deleted
    NotFound(i64),

    /// The database failed
    Database(database::Error),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound(note_id) => write!(f, "note with id={note_id} not found"),
            Error::Database(error) => write!(f, "{error}"),
        }
    }
}

impl From<database::Error> for Error {
    fn from(error: database::Error) -> Self {
        Self::Database(error)
    }
}

/// Result type for all note operations
pub type Result<T> = core::result::Result<T, Error>;

/// Create a note owned by the user
pub async fn create_note(
    database: &Database,
    user_id: i64,
    values: &CreateNoteValues<'_>,
) -> Result<Note> {
    let note = database.create_note(user_id, values).await?;

    tracing::debug!("User {user_id} created note {}", note.note_id);

    Ok(note)
}

/// Read a page of notes
///
/// With `filter_user` only the notes of the user are listed, otherwise the notes of all users.
/// Deleted notes are only listed with `include_deleted`.
pub async fn read_all_notes(
    database: &Database,
    user_id: i64,
    pagination: &PaginationParams,
    filter_user: bool,
    include_deleted: bool,
) -> Result<NotePage> {
    let filter = NoteFilter {
        created_by: filter_user.then_some(user_id),
        include_deleted,
    };

    let total_item = database.count_notes(&filter).await?;
    let records = database.find_all_notes(&filter, pagination).await?;

    tracing::debug!(
        "User {user_id} read {} notes on page {} ({} per page)",
        records.len(),
        pagination.page(),
        pagination.item_per_page(),
    );

    Ok(NotePage {
        records,
        meta: PaginationMeta::new(total_item, pagination),
    })
}

/// Read a single note of the user
pub async fn read_note(database: &Database, user_id: i64, note_id: i64) -> Result<Note> {
    database
        .find_single_note_by_id(user_id, note_id)
        .await?
        .ok_or(Error::NotFound(note_id))
}

/// Update the title and content of a note of the user
pub async fn update_note(
    database: &Database,
    user_id: i64,
    note_id: i64,
    values: &UpdateNoteValues<'_>,
) -> Result<Note> {
    let note = database
        .update_note(user_id, note_id, values)
        .await?
        .ok_or(Error::NotFound(note_id))?;

    tracing::debug!("User {user_id} updated note {note_id}");

    Ok(note)
}

/// Soft-delete a note of the user
///
/// The returned note is the note as it was deleted
pub async fn delete_note(database: &Database, user_id: i64, note_id: i64) -> Result<Note> {
    let note = database
        .delete_note(user_id, note_id)
        .await?
        .ok_or(Error::NotFound(note_id))?;

    tracing::debug!("User {user_id} deleted note {note_id}");

    Ok(note)
}
