use axum::http::StatusCode;

use crate::tests::helper;

#[sqlx::test]
async fn test_notes_of_other_users(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token_one = helper::access_token(1);
    let access_token_two = helper::access_token(2);

    let note = helper::create_note(&mut app, &access_token_one, "Groceries").await;
    let note_id = note.note_id.to_string();

    // not readable by somebody else
    let (status_code, single, message) =
        helper::single_note(&mut app, &access_token_two, &note_id).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(None, single);
    assert_eq!(format!("note with id={note_id} not found"), message);

    // not updatable by somebody else
    let (status_code, _, _) = helper::maybe_update_note(
        &mut app,
        &access_token_two,
        &note_id,
        "Hijacked",
        "Hijacked content",
    )
    .await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);

    // not deletable by somebody else
    let (status_code, _, _) = helper::maybe_delete_note(&mut app, &access_token_two, &note_id).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);

    // still intact for the owner
    let (status_code, single, _) =
        helper::single_note(&mut app, &access_token_one, &note_id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(note), single);
}

#[sqlx::test]
async fn test_list_filter_user(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token_one = helper::access_token(1);
    let access_token_two = helper::access_token(2);

    let note_one = helper::create_note(&mut app, &access_token_one, "Note of one").await;
    let note_two = helper::create_note(&mut app, &access_token_two, "Note of two").await;

    // by default only the own notes
    let (status_code, page, _) = helper::list_notes(&mut app, &access_token_one, "").await;
    assert_eq!(StatusCode::OK, status_code);
    let (notes, meta) = page.unwrap();
    assert_eq!(vec![note_one.note_id], ids(&notes));
    assert_eq!(1, meta.total_item);

    let (status_code, page, _) =
        helper::list_notes(&mut app, &access_token_two, "filter_user=true").await;
    assert_eq!(StatusCode::OK, status_code);
    let (notes, _) = page.unwrap();
    assert_eq!(vec![note_two.note_id], ids(&notes));

    // everybody's notes, oldest first
    let (status_code, page, _) =
        helper::list_notes(&mut app, &access_token_two, "filter_user=false").await;
    assert_eq!(StatusCode::OK, status_code);
    let (notes, meta) = page.unwrap();
    assert_eq!(vec![note_one.note_id, note_two.note_id], ids(&notes));
    assert_eq!(2, meta.total_item);
}

fn ids(notes: &[helper::Note]) -> Vec<i64> {
    notes.iter().map(|note| note.note_id).collect()
}
