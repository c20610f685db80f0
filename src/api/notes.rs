//! Notes API endpoints
//!
//! Everything related to the notes management of the current user

use axum::Extension;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

use crate::database::CreateNoteValues;
use crate::database::Database;
use crate::database::UpdateNoteValues;
use crate::notes;
use crate::notes::CONTENT_LENGTH;
use crate::notes::Note;
use crate::notes::NotePage;
use crate::notes::TITLE_LENGTH;
use crate::pagination::DEFAULT_ITEM_PER_PAGE;
use crate::pagination::DEFAULT_PAGE;
use crate::pagination::PaginationMeta;
use crate::pagination::PaginationParams;

use super::CurrentUser;
use super::Error;
use super::Form;
use super::PathParameters;
use super::QueryParameters;
use super::Success;
use super::validate_length;
use super::validation_error;

/// Note response going to the user
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    /// Note ID
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

    /// Creator and owner
    pub created_by: i64,

    /// Last updater
    pub updated_by: i64,

    /// Deleter
    pub deleted_by: Option<i64>,
}

impl NoteResponse {
    /// Create a response from a [`Note`](Note)
    fn from_note(note: Note) -> Self {
        Self {
            note_id: note.note_id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
            deleted_at: note.deleted_at,
            created_by: note.created_by,
            updated_by: note.updated_by,
            deleted_by: note.deleted_by,
        }
    }

    /// Create a response from multiple [`Note`](Note)s
    fn from_note_multiple(mut notes: Vec<Note>) -> Vec<Self> {
        notes.drain(..).map(Self::from_note).collect::<Vec<Self>>()
    }
}

/// A page of notes going to the user
#[derive(Debug, Serialize)]
pub struct NotePageResponse {
    /// Notes on the page
    pub records: Vec<NoteResponse>,

    /// Information about all pages
    pub meta: PaginationMeta,
}

impl NotePageResponse {
    /// Create a response from a [`NotePage`](NotePage)
    fn from_note_page(page: NotePage) -> Self {
        Self {
            records: NoteResponse::from_note_multiple(page.records),
            meta: page.meta,
        }
    }
}

/// Turn a failed note operation into an API error
///
/// Only "not found" is shared with the user, anything else is logged and replaced by the
/// generic message
fn into_error<M>(err: notes::Error, message: M) -> Error
where
    M: ToString,
{
    match err {
        err @ notes::Error::NotFound(_) => Error::not_found(err),
        notes::Error::Database(err) => {
            let message = message.to_string();
            tracing::error!("{message}: {err}");

            Error::internal_server_error(message)
        }
    }
}

fn default_filter_user() -> bool {
    true
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_item_per_page() -> u32 {
    DEFAULT_ITEM_PER_PAGE
}

/// Query parameters to list notes
#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    /// Only list the notes of the current user
    #[serde(default = "default_filter_user")]
    filter_user: bool,

    /// Also list soft-deleted notes
    #[serde(default)]
    include_deleted: bool,

    /// Page to list, starting at 1
    #[serde(default = "default_page")]
    page: u32,

    /// Amount of notes per page
    #[serde(default = "default_item_per_page")]
    item_per_page: u32,
}

/// List a page of notes
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     'http://localhost:6000/notes?page=1&item_per_page=10&filter_user=true&include_deleted=false'
/// ```
///
/// Response:
/// ```json
/// { "status": "success", "message": "success read all notes", "data": {
///     "records": [ { "note_id": 1, "title": "Groceries" ... } ],
///     "meta": { "total_item": 1, "page": 1, "item_per_page": 10, "total_page": 1 } } }
/// ```
pub async fn list(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    QueryParameters(query): QueryParameters<ListNotesQuery>,
) -> Result<Success<NotePageResponse>, Error> {
    let pagination =
        PaginationParams::new(query.page, query.item_per_page).map_err(validation_error)?;

    let page = notes::read_all_notes(
        &database,
        current_user.id,
        &pagination,
        query.filter_user,
        query.include_deleted,
    )
    .await
    .map_err(|err| into_error(err, "failed to read all notes"))?;

    Ok(Success::ok(
        "success read all notes",
        NotePageResponse::from_note_page(page),
    ))
}

/// Get a single note
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/notes/1
/// ```
///
/// Response:
/// ```json
/// { "status": "success", "message": "success read note with id=1", "data": { "note_id": 1 ... } }
/// ```
pub async fn single(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters(note_id): PathParameters<i64>,
) -> Result<Success<NoteResponse>, Error> {
    let note = notes::read_note(&database, current_user.id, note_id)
        .await
        .map_err(|err| into_error(err, format!("failed to read note with id={note_id}")))?;

    Ok(Success::ok(
        format!("success read note with id={note_id}"),
        NoteResponse::from_note(note),
    ))
}

/// Create note form
#[derive(Debug, Deserialize)]
pub struct CreateNoteForm {
    /// Title of the note, 1 to 100 characters
    title: String,

    /// Content of the note, 6 to 500 characters
    content: String,
}

impl CreateNoteForm {
    /// Validate the form, before anything is stored
    fn validate(&self) -> Result<CreateNoteValues<'_>, Error> {
        validate_length("title", &self.title, &TITLE_LENGTH)?;
        validate_length("content", &self.content, &CONTENT_LENGTH)?;

        Ok(CreateNoteValues {
            title: &self.title,
            content: &self.content,
        })
    }
}

/// Create a note based on the [`CreateNoteForm`](CreateNoteForm) form
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "title": "Groceries", "content": "Milk, eggs and bread" }' \
///     http://localhost:6000/notes
/// ```
///
/// Response:
/// ```json
/// { "status": "success", "message": "success create new note", "data": { "note_id": 1 ... } }
/// ```
pub async fn create(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    Form(form): Form<CreateNoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    let values = form.validate()?;

    let note = notes::create_note(&database, current_user.id, &values)
        .await
        .map_err(|err| into_error(err, "failed to create new note"))?;

    Ok(Success::ok(
        "success create new note",
        NoteResponse::from_note(note),
    ))
}

/// Update note form
///
/// Title and content are both replaced
#[derive(Debug, Deserialize)]
pub struct UpdateNoteForm {
    /// New title of the note, 1 to 100 characters
    new_title: String,

    /// New content of the note, 6 to 500 characters
    new_content: String,
}

impl UpdateNoteForm {
    /// Validate the form, before anything is stored
    fn validate(&self) -> Result<UpdateNoteValues<'_>, Error> {
        validate_length("new_title", &self.new_title, &TITLE_LENGTH)?;
        validate_length("new_content", &self.new_content, &CONTENT_LENGTH)?;

        Ok(UpdateNoteValues {
            title: &self.new_title,
            content: &self.new_content,
        })
    }
}

/// Update a note based on the [`UpdateNoteForm`](UpdateNoteForm) form
///
/// Request:
/// ```sh
/// curl -v -XPUT -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "new_title": "Groceries", "new_content": "Milk and eggs" }' \
///     http://localhost:6000/notes/1
/// ```
///
/// Response:
/// ```json
/// { "status": "success", "message": "success update note with id=1", "data": { "note_id": 1 ... } }
/// ```
pub async fn update(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters(note_id): PathParameters<i64>,
    Form(form): Form<UpdateNoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    let values = form.validate()?;

    let note = notes::update_note(&database, current_user.id, note_id, &values)
        .await
        .map_err(|err| into_error(err, format!("failed to update note with id={note_id}")))?;

    Ok(Success::ok(
        format!("success update note with id={note_id}"),
        NoteResponse::from_note(note),
    ))
}

/// Soft-delete a note
///
/// The deleted note is returned, including when and by whom it was deleted
///
/// Request:
/// ```sh
/// curl -v -XDELETE \
///     -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/notes/1
/// ```
///
/// Response:
/// ```json
/// { "status": "success", "message": "success delete note with id=1", "data": {
///     "note_id": 1 ... "deleted_at": "2026-01-01T12:00:00.000000", "deleted_by": 1 } }
/// ```
pub async fn delete(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters(note_id): PathParameters<i64>,
) -> Result<Success<NoteResponse>, Error> {
    let note = notes::delete_note(&database, current_user.id, note_id)
        .await
        .map_err(|err| into_error(err, format!("failed to delete note with id={note_id}")))?;

    Ok(Success::ok(
        format!("success delete note with id={note_id}"),
        NoteResponse::from_note(note),
    ))
}
