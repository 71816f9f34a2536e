use miette::Diagnostic;
use thiserror::Error;

use crate::rpc::RpcError;

/// Errors that can occur when interacting with the Odoo API.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("error making request: {0:?}")]
    #[diagnostic(
        code(primecare_odoo::request_error),
        help("Check your network connection and that the Odoo server is reachable")
    )]
    Request(#[source] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    #[diagnostic(
        code(primecare_odoo::http_status),
        help("The Odoo server answered outside the 2xx range; the response body was logged")
    )]
    Http {
        status: reqwest::StatusCode,
        url: String,
        response_body: Option<String>,
    },

    #[error("error decoding response: {0:?}")]
    #[diagnostic(
        code(primecare_odoo::deserialization_error),
        help("The server returned data in an unexpected format")
    )]
    Deserialization(#[source] serde_json::Error, Option<String>),

    /// An error payload returned by Odoo inside an otherwise well-formed
    /// JSON-RPC response body.
    #[error("odoo returned an error: {0}")]
    #[diagnostic(
        code(primecare_odoo::api_error),
        help("Review the error payload returned by the Odoo server")
    )]
    Api(RpcError),

    #[error("response carried neither a result nor an error (url: {url})")]
    #[diagnostic(
        code(primecare_odoo::missing_result),
        help("The body was valid JSON but not a JSON-RPC response envelope")
    )]
    MissingResult { url: String },

    #[error("field `{field}` missing from {model} record")]
    #[diagnostic(
        code(primecare_odoo::missing_field),
        help("The record came back without a field the caller requested")
    )]
    MissingField { model: String, field: String },

    /// The session endpoint rejected the stored credentials (no usable uid in
    /// the response).
    #[error("login failed for {login} on database {database}")]
    #[diagnostic(
        code(primecare_odoo::login_failed),
        help("Verify ODOO_DB, ODOO_USERNAME and ODOO_PASSWORD against the Odoo instance")
    )]
    LoginFailed { database: String, login: String },

    #[error("record not found: {model} id {id}")]
    #[diagnostic(
        code(primecare_odoo::not_found),
        help("Verify that the {model} record exists and is visible to the service account")
    )]
    NotFound { model: String, id: i64 },

    #[error("endpoint could not be joined onto the base URL")]
    #[diagnostic(
        code(primecare_odoo::invalid_endpoint),
        help("Check that the Odoo base URL is a well-formed absolute URL")
    )]
    InvalidEndpoint,

    #[error("environment variable {name} is not set")]
    #[diagnostic(
        code(primecare_odoo::missing_env),
        help("Set {name} in the environment or in a .env file")
    )]
    Env { name: &'static str },
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Deserialization(e, None)
    }
}

/// Type alias for results from this crate.
///
/// This is already a Miette diagnostic result due to the implementation of
/// the Diagnostic trait for the Error type.
pub type Result<O> = std::result::Result<O, Error>;
