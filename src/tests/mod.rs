mod notes_ownership;
mod notes_pagination;
