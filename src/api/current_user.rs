//! Current user service
//!
//! Get the current user from the request based on the Authorization header
//!
//! Tokens are issued elsewhere, only verified here: a valid signature and a numeric subject are
//! enough to act as that user.

use axum::Extension;
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use serde::Serialize;

use crate::api::Error;

/// The keys used for decoding JWT tokens
#[derive(Clone)]
pub struct JwtKeys {
    /// The decoding key
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Create new decoding keys, derived from a secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// The JWT claims to identify a user
#[derive(Debug, Deserialize, Serialize)]
struct Claims {
    /// The user ID, as a string
    sub: String,

    /// When does the token expire, in seconds since the epoch
    exp: u64,
}

/// Current user service
#[derive(Clone, Copy, Debug)]
pub struct CurrentUser {
    /// ID of the user, as provided by the token
    pub id: i64,
}

/// Verify the token and get the user out of it
fn decode_token(jwt_keys: &JwtKeys, token: &str) -> Result<CurrentUser, Error> {
    use jsonwebtoken::Validation;
    use jsonwebtoken::decode;

    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &jwt_keys.decoding, &validation)
        .map_err(|err| Error::unauthorized("Invalid access token").with_description(err))?;

    let id = token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| {
            Error::unauthorized("Invalid access token").with_description("Invalid subject")
        })?;

    Ok(CurrentUser { id })
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the token from the authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| Error::unauthorized("Missing access token"))?;

        let Extension(jwt_keys) = parts
            .extract::<Extension<JwtKeys>>()
            .await
            .map_err(|_| Error::internal_server_error("Could not get JWT keys"))?;

        let current_user = decode_token(&jwt_keys, bearer.token())?;

        tracing::debug!("Authenticated as user {}", current_user.id);

        Ok(current_user)
    }
}
