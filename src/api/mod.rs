//! The inbound HTTP surface: a thin gateway forwarding employee requests to
//! Odoo. Handlers orchestrate (authenticate, then act) and map outcomes onto
//! the uniform response body; the decisions live in the library.

mod handlers;
mod response;

pub use response::GatewayResponse;

use axum::Router;
use axum::routing::{get, post};

use crate::Client;

/// Builds the gateway router over a shared client.
#[must_use]
pub fn router(client: Client) -> Router {
    Router::new()
        .route("/employee", post(handlers::save_employee))
        .route("/employee/{id}", get(handlers::employee_status))
        .with_state(client)
}
