//! The at-work decision: three independent remote facts (active flag, open
//! attendance entry, registered departure reason) combined into one verdict
//! and one caller-facing message.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::hr::{attendance, employee};
use crate::{
    Client,
    error::{Error, Result},
};

/// The facts behind an employee's at-work verdict, as read from Odoo.
#[derive(Debug, Clone, Serialize)]
pub struct WorkStatus {
    /// The employee's display name, used in the outward message.
    pub name: String,
    /// Odoo's `active` flag on the record.
    pub active: bool,
    /// Whether an attendance entry is currently open (checked in, not out).
    pub checked_in: bool,
    /// Whether a departure reason is registered on the record.
    pub departed: bool,
}

impl WorkStatus {
    /// The combined verdict: active, checked in, and not departed.
    #[must_use]
    pub fn at_work(&self) -> bool {
        self.active && self.checked_in && !self.departed
    }

    /// The caller-facing message for this verdict. One combined sentence
    /// regardless of which condition failed; callers cannot tell the cause
    /// apart from the message alone.
    #[must_use]
    pub fn message(&self) -> String {
        if self.at_work() {
            format!("Employee {} is active and checked in.", self.name)
        } else {
            format!(
                "Employee {} is not active or not checked in or resigned.",
                self.name
            )
        }
    }
}

/// Authenticates and computes the at-work verdict for one employee.
///
/// The remote calls run strictly in sequence: authenticate, read the record,
/// check for an open attendance entry, check for a departure reason. The
/// verdict is recomputed from remote state on every call; nothing is cached.
#[instrument(skip(client))]
pub async fn check_employee_status(client: &Client, employee_id: i64) -> Result<WorkStatus> {
    // Any failure at the session gate reports as a login failure, whatever
    // the transport-level cause was.
    client.authenticate().await.map_err(|e| match e {
        Error::LoginFailed { .. } => e,
        other => {
            warn!("authentication failed before status check: {other:?}");
            Error::LoginFailed {
                database: client.connection().database().to_string(),
                login: client.connection().login().to_string(),
            }
        }
    })?;

    let rows = match employee::read(client, employee_id, &["active", "name"]).await {
        Ok(rows) => rows,
        // A read payload that is not a row array counts as an absent record.
        Err(Error::Deserialization(..)) => Vec::new(),
        Err(e) => return Err(e),
    };
    let row = rows.into_iter().next().ok_or_else(|| Error::NotFound {
        model: employee::MODEL.to_string(),
        id: employee_id,
    })?;

    let active = row
        .get("active")
        .and_then(Value::as_bool)
        .ok_or_else(|| Error::MissingField {
            model: employee::MODEL.to_string(),
            field: "active".to_string(),
        })?;
    let name = display_name(&row);

    let checked_in = attendance::is_open(client, employee_id).await?;
    let departed = employee::has_departure_reason(client, employee_id).await?;

    let status = WorkStatus {
        name,
        active,
        checked_in,
        departed,
    };
    info!(
        employee_id,
        active,
        checked_in,
        departed,
        at_work = status.at_work(),
        "employee status computed"
    );
    Ok(status)
}

/// Extracts the display name; Odoo renders an unset name as `false`.
fn display_name(row: &Map<String, Value>) -> String {
    match row.get("name") {
        Some(Value::String(name)) => name.clone(),
        _ => String::new(),
    }
}
