#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::net::SocketAddr;

use anyhow::Context;
use anyhow::Result;
use axum::Extension;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::JwtKeys;
use crate::database::Database;
use crate::database::DatabaseConfig;
use crate::utils::env_var;
use crate::utils::env_var_or_else;

mod api;
mod database;
mod graceful_shutdown;
mod notes;
mod pagination;
#[cfg(test)]
mod tests;
mod utils;

const DEFAULT_RUST_LOG: &str = "notekeeper=debug,tower_http=debug";
const DEFAULT_ADDRESS: &str = "0.0.0.0:6000";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let app = setup_app(DatabaseConfig::DetectConfig).await?;

    let address = setup_address()?;
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// # Errors
///
/// Will return `Err` if any of its dependencies fail to load:
/// - Database connection and migrations
/// - JWT secret
pub async fn setup_app(database_config: DatabaseConfig) -> Result<Router> {
    let database = Database::from_config(database_config).await?;

    let jwt_keys = setup_jwt_keys()?;

    Ok(create_router(database, jwt_keys))
}

/// Create the router for Notekeeper
fn create_router(database: Database, jwt_keys: JwtKeys) -> Router {
    api::router()
        .fallback(api::fallback)
        .layer(CatchPanicLayer::custom(api::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(database))
        .layer(Extension(jwt_keys))
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(env_var_or_else("RUST_LOG", || {
            DEFAULT_RUST_LOG.into()
        })))
        .with(fmt::layer())
        .init();
}

/// Tokens are issued elsewhere, the secret has to be shared with that issuer
fn setup_jwt_keys() -> Result<JwtKeys> {
    let jwt_secret = env_var("JWT_SECRET").context("`JWT_SECRET` is not set")?;

    Ok(JwtKeys::new(jwt_secret.as_bytes()))
}

fn setup_address() -> Result<SocketAddr> {
    let mut address =
        env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS)).parse::<SocketAddr>()?;

    // optional override of just the port
    if let Some(port) = env_var("PORT") {
        let port = port.parse::<u16>()?;

        address.set_port(port);
    }

    Ok(address)
}
