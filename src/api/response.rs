//! API response helpers
//!
//! Every response, successful or not, is wrapped in the same envelope:
//!
//! ```json
//! { "status": "success", "message": "success read note with id=1", "data": { ... } }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

/// Status of the envelope
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    /// All is well
    Success,

    /// Something went wrong, see the message
    Error,
}

/// The envelope around every response body
#[derive(Serialize)]
struct Envelope<D>
where
    D: Serialize,
{
    status: Status,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<D>,
}

/// Hold data for a successful API interaction
pub struct Success<V>
where
    V: Serialize,
{
    status_code: StatusCode,
    message: String,
    data: V,
}

impl<V> Success<V>
where
    V: Serialize,
{
    pub fn ok<M>(message: M, data: V) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::OK,
            message: message.to_string(),
            data,
        }
    }
}

impl<V> IntoResponse for Success<V>
where
    V: Serialize,
{
    fn into_response(self) -> Response {
        (
            self.status_code,
            Json(Envelope {
                status: Status::Success,
                message: self.message,
                data: Some(self.data),
            }),
        )
            .into_response()
    }
}

/// Hold data for a failed API interaction
#[derive(Debug)]
pub struct Error {
    status_code: StatusCode,
    message: String,
    description: Option<String>,
}

impl Error {
    pub fn bad_request<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unprocessable_entity<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn internal_server_error<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Add more details to the message
    pub fn with_description<M>(self, description: M) -> Self
    where
        M: ToString,
    {
        Self {
            description: Some(description.to_string()),
            ..self
        }
    }

    fn new<M>(status_code: StatusCode, message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code,
            message: message.to_string(),
            description: None,
        }
    }

    /// The message as shown to the outside world
    fn full_message(&self) -> String {
        match &self.description {
            Some(description) => format!("{}: {description}", self.message),
            None => self.message.clone(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            self.status_code,
            Json(Envelope::<()> {
                status: Status::Error,
                message: self.full_message(),
                data: None,
            }),
        )
            .into_response()
    }
}
