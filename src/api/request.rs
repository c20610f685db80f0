//! API request helpers

use std::ops::RangeInclusive;

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Json;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::Error;

/// Validate the length of a field, in characters
///
/// ```rust
/// assert!(validate_length("title", "Groceries", &(1..=100)).is_ok());
/// ```
pub fn validate_length(
    field: &str,
    value: &str,
    range: &RangeInclusive<usize>,
) -> Result<(), Error> {
    let length = value.chars().count();

    if range.contains(&length) {
        Ok(())
    } else {
        Err(validation_error(format!(
            "`{field}` must be between {} and {} characters long, got {length}",
            range.start(),
            range.end(),
        )))
    }
}

/// A field constraint is violated
pub fn validation_error<M>(description: M) -> Error
where
    M: ToString,
{
    Error::unprocessable_entity("Validation error").with_description(description)
}

/// The most specific message of an error
fn describe<E>(err: &E) -> String
where
    E: std::error::Error,
{
    std::error::Error::source(err).map_or_else(|| err.to_string(), ToString::to_string)
}

fn parse_json<J>(json: Result<Json<J>, JsonRejection>) -> Result<J, Error> {
    match json {
        Ok(Json(json)) => Ok(json),
        Err(err) => match err {
            JsonRejection::JsonDataError(err) => {
                Err(Error::bad_request("Data error").with_description(describe(&err)))
            }
            JsonRejection::JsonSyntaxError(err) => {
                Err(Error::bad_request("JSON syntax error").with_description(describe(&err)))
            }
            JsonRejection::MissingJsonContentType(_err) => Err(Error::bad_request(
                "Missing `application/json` content type",
            )),
            JsonRejection::BytesRejection(err) => {
                Err(Error::bad_request("Invalid characters in JSON").with_description(err))
            }
            err => Err(Error::bad_request("Unknown JSON error").with_description(err)),
        },
    }
}

/// Wrapper for the JSON extractor
pub struct Form<F>(pub F);

impl<S, F> FromRequest<S> for Form<F>
where
    S: Send + Sync,
    F: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = Json::<F>::from_request(req, state).await;

        parse_json(json).map(Form)
    }
}

fn parse_path<P>(path: Result<Path<P>, PathRejection>) -> Result<P, Error> {
    match path {
        Ok(Path(path)) => Ok(path),
        Err(err) => match err {
            PathRejection::FailedToDeserializePathParams(err) => {
                Err(Error::bad_request("Invalid path parameter").with_description(err))
            }
            PathRejection::MissingPathParams(err) => {
                Err(Error::bad_request("Missing path parameter").with_description(err))
            }
            err => Err(Error::bad_request("Unknown path error").with_description(err)),
        },
    }
}

/// Wrapper for the path extractor
pub struct PathParameters<P>(pub P);

impl<S, P> FromRequestParts<S> for PathParameters<P>
where
    S: Send + Sync,
    P: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = Path::<P>::from_request_parts(parts, state).await;

        parse_path(path).map(PathParameters)
    }
}

fn parse_query<Q>(query: Result<Query<Q>, QueryRejection>) -> Result<Q, Error> {
    match query {
        Ok(Query(query)) => Ok(query),
        Err(err) => match err {
            QueryRejection::FailedToDeserializeQueryString(err) => {
                Err(Error::bad_request("Invalid query parameter").with_description(describe(&err)))
            }
            err => Err(Error::bad_request("Unknown query error").with_description(err)),
        },
    }
}

/// Wrapper for the query string extractor
pub struct QueryParameters<Q>(pub Q);

impl<S, Q> FromRequestParts<S> for QueryParameters<Q>
where
    S: Send + Sync,
    Q: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<Q>::from_request_parts(parts, state).await;

        parse_query(query).map(QueryParameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_length() {
        let range = 6..=500;

        assert!(validate_length("content", "abcdef", &range).is_ok());
        assert!(validate_length("content", &"a".repeat(500), &range).is_ok());

        assert!(validate_length("content", "abcde", &range).is_err());
        assert!(validate_length("content", &"a".repeat(501), &range).is_err());
    }

    #[test]
    fn test_validate_length_counts_characters() {
        let range = 1..=3;

        // three characters, but more than three bytes
        assert!(validate_length("title", "äöü", &range).is_ok());
        assert!(validate_length("title", "🦀🦀🦀🦀", &range).is_err());
    }

    #[test]
    fn test_validate_empty_title() {
        assert!(validate_length("title", "", &(1..=100)).is_err());
    }
}
