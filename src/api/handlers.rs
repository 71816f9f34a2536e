use axum::Json;
use axum::extract::{Path, State};

use crate::Client;
use crate::error::Error;
use crate::hr::employee::NewEmployee;
use crate::status;

use super::response::GatewayResponse;

const MSG_LOGIN_FAILED: &str = "Login failed.";
const MSG_POSTING_SUCCESSFUL: &str = "Posting Successful.";
const MSG_POSTING_FAILED: &str = "Posting failed.";
const MSG_EMPLOYEE_NOT_FOUND: &str = "Employee not found.";
const MSG_NO_ACTIVE_FIELD: &str = "Employee data not found or does not have 'active' field.";
const MSG_STATUS_ERROR: &str = "Error checking employee status.";

/// `POST /employee`: authenticate, then create the employee record.
pub(super) async fn save_employee(
    State(client): State<Client>,
    Json(new_employee): Json<NewEmployee>,
) -> GatewayResponse {
    if let Err(e) = client.authenticate().await {
        error!("authentication failed before employee creation: {e:?}");
        return GatewayResponse::failure(MSG_LOGIN_FAILED);
    }

    match client.employees().create(&new_employee).await {
        Ok(id) => GatewayResponse::success_with_content(MSG_POSTING_SUCCESSFUL, id.to_string()),
        Err(e) => {
            error!("employee creation failed: {e:?}");
            GatewayResponse::failure(MSG_POSTING_FAILED)
        }
    }
}

/// `GET /employee/{id}`: authenticate and report the at-work verdict.
///
/// A negative verdict is still a completed operation: `success` stays true
/// and the verdict text is the message.
pub(super) async fn employee_status(
    State(client): State<Client>,
    Path(id): Path<i64>,
) -> GatewayResponse {
    match status::check_employee_status(&client, id).await {
        Ok(work_status) => GatewayResponse::success(work_status.message()),
        Err(e) => {
            error!("status check for employee {id} failed: {e:?}");
            GatewayResponse::failure(status_failure_message(&e))
        }
    }
}

/// Maps a failure to its fixed outward message. Raw detail stays in the
/// server log and never crosses the boundary.
fn status_failure_message(error: &Error) -> &'static str {
    match error {
        Error::LoginFailed { .. } => MSG_LOGIN_FAILED,
        Error::NotFound { .. } => MSG_EMPLOYEE_NOT_FOUND,
        Error::MissingField { .. } => MSG_NO_ACTIVE_FIELD,
        _ => MSG_STATUS_ERROR,
    }
}
