//! Form types

/// Values to create a Note
pub struct CreateNoteValues<'a> {
    /// Title of the note
    pub title: &'a str,

    /// Content of the note
    pub content: &'a str,
}

/// Values to update a Note
///
/// Both fields are always replaced
pub struct UpdateNoteValues<'a> {
    /// New title of the note
    pub title: &'a str,

    /// New content of the note
    pub content: &'a str,
}

/// Which notes to include when listing or counting
#[derive(Clone, Copy, Debug)]
pub struct NoteFilter {
    /// Only include notes created by this user, `None` for all users
    pub created_by: Option<i64>,

    /// Include soft-deleted notes
    pub include_deleted: bool,
}
