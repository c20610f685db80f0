//! All API endpoint setup

use std::any::Any;

use axum::Router;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;

pub use current_user::CurrentUser;
pub use current_user::JwtKeys;
pub use request::Form;
pub use request::PathParameters;
pub use request::QueryParameters;
pub use request::validate_length;
pub use request::validation_error;
pub use response::Error;
pub use response::Success;

mod current_user;
mod notes;
mod request;
mod response;

/// Get the Axum router for all API routes
pub fn router() -> Router {
    let notes = Router::new()
        .route("/", get(notes::list).post(notes::create))
        .route(
            "/{note_id}",
            get(notes::single).put(notes::update).delete(notes::delete),
        );

    Router::new().nest("/notes", notes)
}

/// Fallback for everything that is not an API route
pub async fn fallback() -> Error {
    Error::not_found("Not found")
}

/// Turn a panicking handler into a regular `500 Internal Server Error`
///
/// The details of the panic are logged, not exposed
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(details) = err.downcast_ref::<String>() {
        details.as_str()
    } else if let Some(details) = err.downcast_ref::<&str>() {
        details
    } else {
        "unknown panic"
    };

    tracing::error!("Handler panicked: {details}");

    Error::internal_server_error("Internal server error").into_response()
}
