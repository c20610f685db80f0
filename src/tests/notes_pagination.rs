use axum::http::StatusCode;

use crate::tests::helper;

#[sqlx::test]
async fn test_pagination(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token = helper::access_token(1);

    let mut created = Vec::new();
    for index in 0..15 {
        let note = helper::create_note(&mut app, &access_token, &format!("Note {index}")).await;
        created.push(note.note_id);
    }

    // first page is full
    let (status_code, page, _) =
        helper::list_notes(&mut app, &access_token, "page=1&item_per_page=10").await;
    assert_eq!(StatusCode::OK, status_code);
    let (notes, meta) = page.unwrap();
    assert_eq!(10, notes.len());
    assert_eq!(
        created[..10],
        notes.iter().map(|note| note.note_id).collect::<Vec<_>>()[..]
    );
    assert_eq!(
        helper::Meta {
            total_item: 15,
            page: 1,
            item_per_page: 10,
            total_page: 2,
        },
        meta
    );

    // second page has the rest
    let (status_code, page, _) =
        helper::list_notes(&mut app, &access_token, "page=2&item_per_page=10").await;
    assert_eq!(StatusCode::OK, status_code);
    let (notes, meta) = page.unwrap();
    assert_eq!(5, notes.len());
    assert_eq!(
        created[10..],
        notes.iter().map(|note| note.note_id).collect::<Vec<_>>()[..]
    );
    assert_eq!(
        helper::Meta {
            total_item: 15,
            page: 2,
            item_per_page: 10,
            total_page: 2,
        },
        meta
    );

    // past the last page
    let (status_code, page, _) =
        helper::list_notes(&mut app, &access_token, "page=3&item_per_page=10").await;
    assert_eq!(StatusCode::OK, status_code);
    let (notes, meta) = page.unwrap();
    assert!(notes.is_empty());
    assert_eq!(2, meta.total_page);

    // defaults
    let (status_code, page, _) = helper::list_notes(&mut app, &access_token, "").await;
    assert_eq!(StatusCode::OK, status_code);
    let (notes, meta) = page.unwrap();
    assert_eq!(10, notes.len());
    assert_eq!(1, meta.page);
    assert_eq!(10, meta.item_per_page);
}

#[sqlx::test]
async fn test_pagination_without_notes(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token = helper::access_token(1);

    let (status_code, page, _) =
        helper::list_notes(&mut app, &access_token, "page=1&item_per_page=5").await;
    assert_eq!(StatusCode::OK, status_code);
    let (notes, meta) = page.unwrap();
    assert!(notes.is_empty());
    assert_eq!(
        helper::Meta {
            total_item: 0,
            page: 1,
            item_per_page: 5,
            total_page: 0,
        },
        meta
    );
}

#[sqlx::test]
async fn test_include_deleted(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token = helper::access_token(1);

    let kept = helper::create_note(&mut app, &access_token, "Kept").await;
    let deleted = helper::create_note(&mut app, &access_token, "Deleted").await;
    let deleted_id = deleted.note_id.to_string();

    let (status_code, _, _) = helper::maybe_delete_note(&mut app, &access_token, &deleted_id).await;
    assert_eq!(StatusCode::OK, status_code);

    // gone for a single read
    let (status_code, _, _) = helper::single_note(&mut app, &access_token, &deleted_id).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);

    // not counted nor listed by default
    let (status_code, page, _) = helper::list_notes(&mut app, &access_token, "").await;
    assert_eq!(StatusCode::OK, status_code);
    let (notes, meta) = page.unwrap();
    assert_eq!(1, notes.len());
    assert_eq!(kept.note_id, notes[0].note_id);
    assert_eq!(1, meta.total_item);

    // listed when asked for
    let (status_code, page, _) =
        helper::list_notes(&mut app, &access_token, "include_deleted=true").await;
    assert_eq!(StatusCode::OK, status_code);
    let (notes, meta) = page.unwrap();
    assert_eq!(2, notes.len());
    assert_eq!(2, meta.total_item);

    let listed = notes
        .iter()
        .find(|note| note.note_id == deleted.note_id)
        .unwrap();
    assert!(listed.deleted_at.is_some());
    assert_eq!(Some(1), listed.deleted_by);
}

#[sqlx::test]
async fn test_invalid_pagination(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token = helper::access_token(1);

    let (status_code, page, message) =
        helper::list_notes(&mut app, &access_token, "page=0").await;
    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status_code);
    assert!(page.is_none());
    assert_eq!("Validation error: `page` must be at least 1", message);

    let (status_code, _, message) =
        helper::list_notes(&mut app, &access_token, "item_per_page=0").await;
    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status_code);
    assert_eq!("Validation error: `item_per_page` must be at least 1", message);

    let (status_code, _, message) =
        helper::list_notes(&mut app, &access_token, "page=first").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(message.starts_with("Invalid query parameter"));

    let (status_code, _, message) =
        helper::list_notes(&mut app, &access_token, "page=-1").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(message.starts_with("Invalid query parameter"));

    let (status_code, _, message) =
        helper::list_notes(&mut app, &access_token, "include_deleted=maybe").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(message.starts_with("Invalid query parameter"));
}

#[sqlx::test]
async fn test_pagination_far_past_the_end(pool: sqlx::PgPool) {
    let mut app = helper::setup_test_app(pool).await;

    let access_token = helper::access_token(1);

    helper::create_note(&mut app, &access_token, "Groceries").await;

    let (status_code, page, message) = helper::list_notes(
        &mut app,
        &access_token,
        "page=4294967295&item_per_page=4294967295",
    )
    .await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("success read all notes", message);
    let (notes, meta) = page.unwrap();
    assert!(notes.is_empty());
    assert_eq!(
        helper::Meta {
            total_item: 1,
            page: 4_294_967_295,
            item_per_page: 4_294_967_295,
            total_page: 1,
        },
        meta
    );
}
